//! Linear trend forecasting for per-period series
//!
//! Contains:
//! - [`fit_trend`]: closed-form least-squares line over positional indices
//! - [`forecast`]: non-negative projection of that line into future periods
//! - [`ForecastEngine`]: the same operations plus validated variants
//! - [`RollingTrend`]: a windowed tracker over the most recent periods
//!
//! Index `i` of a series is the `i`-th period after the series start, and
//! periods are assumed equally spaced and contiguous. Forecast period `k`
//! (zero-based) is evaluated at index `n + k`.
//!
//! Both core operations are total: empty, single-point and numerically
//! degenerate inputs fall back to a flat line instead of failing.

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Least-squares line `value(x) = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrendModel {
    pub slope: f64,
    pub intercept: f64,
}

impl TrendModel {
    /// Create a trend model from its coefficients
    pub fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    /// A horizontal line at `level`
    pub fn flat(level: f64) -> Self {
        Self {
            slope: 0.0,
            intercept: level,
        }
    }

    /// Evaluate the line at position `x`
    pub fn value_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Project `periods` values starting at position `start`.
    ///
    /// Every value is clamped to `[0, f64::MAX]`; a NaN projection becomes 0.
    pub fn project(&self, start: usize, periods: usize) -> Vec<f64> {
        (0..periods)
            .map(|offset| clamp_projection(self.value_at(start.saturating_add(offset) as f64)))
            .collect()
    }

    /// Unclamped in-sample values at positions `0..n`
    pub fn fitted(&self, n: usize) -> Vec<f64> {
        (0..n).map(|x| self.value_at(x as f64)).collect()
    }
}

/// Stateless entry point to the trend operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForecastEngine;

impl ForecastEngine {
    /// See [`fit_trend`]
    pub fn fit_trend(series: &[f64]) -> TrendModel {
        fit_trend(series)
    }

    /// See [`forecast`]
    pub fn forecast(series: &[f64], periods_ahead: usize) -> Vec<f64> {
        forecast(series, periods_ahead)
    }

    /// Reject series containing NaN or infinite observations
    pub fn validate_series(series: &[f64]) -> Result<()> {
        match series.iter().position(|value| !value.is_finite()) {
            Some(index) => Err(MathError::InvalidInput(format!(
                "observation at index {} is not finite ({})",
                index, series[index]
            ))),
            None => Ok(()),
        }
    }

    /// [`fit_trend`] after [`ForecastEngine::validate_series`]
    pub fn try_fit_trend(series: &[f64]) -> Result<TrendModel> {
        Self::validate_series(series)?;
        Ok(fit_trend(series))
    }

    /// [`forecast`] after [`ForecastEngine::validate_series`]
    pub fn try_forecast(series: &[f64], periods_ahead: usize) -> Result<Vec<f64>> {
        Self::validate_series(series)?;
        Ok(forecast(series, periods_ahead))
    }
}

/// Fit a least-squares line against the positional indices of `series`.
///
/// - empty series: `{slope: 0, intercept: 0}`
/// - one observation `v`: `{slope: 0, intercept: v}`
/// - otherwise the closed-form simple linear regression, falling back to a
///   flat line at the series mean when the denominator or either
///   coefficient is zero/non-finite
///
/// The returned coefficients are finite for every finite input.
pub fn fit_trend(series: &[f64]) -> TrendModel {
    match series {
        [] => TrendModel::default(),
        [only] => TrendModel::flat(finite_or_zero(*only)),
        _ => least_squares(series),
    }
}

/// Project `series` forward by `periods_ahead` periods.
///
/// The result always has exactly `periods_ahead` elements, each finite and
/// non-negative. An empty series projects zeros and a single observation
/// projects itself.
pub fn forecast(series: &[f64], periods_ahead: usize) -> Vec<f64> {
    match series {
        [] => vec![0.0; periods_ahead],
        [only] => vec![clamp_projection(*only); periods_ahead],
        _ => fit_trend(series).project(series.len(), periods_ahead),
    }
}

/// Coefficient of determination of `model` against `series`
pub fn r_squared(series: &[f64], model: &TrendModel) -> Result<f64> {
    if series.len() < 2 {
        return Err(MathError::InsufficientData(
            "Not enough data to calculate R-squared. Need at least 2 points.".to_string(),
        ));
    }

    let y_mean = series.iter().sum::<f64>() / series.len() as f64;

    let mut ss_total = 0.0;
    let mut ss_residual = 0.0;

    for (i, &y) in series.iter().enumerate() {
        let y_pred = model.value_at(i as f64);
        ss_total += (y - y_mean).powi(2);
        ss_residual += (y - y_pred).powi(2);
    }

    if !ss_total.is_finite() || !ss_residual.is_finite() {
        return Err(MathError::CalculationError(
            "Cannot calculate R-squared: sums of squares overflowed".to_string(),
        ));
    }

    if ss_total.abs() < 1e-10 {
        return Err(MathError::CalculationError(
            "Cannot calculate R-squared: total sum of squares is too small".to_string(),
        ));
    }

    Ok(1.0 - (ss_residual / ss_total))
}

fn least_squares(series: &[f64]) -> TrendModel {
    let n = series.len() as f64;

    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;

    for (i, &y) in series.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }

    let denominator = n * sum_x2 - sum_x * sum_x;
    if denominator == 0.0 || !denominator.is_finite() {
        return flat_mean(series, sum_y);
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;

    if slope.is_finite() && intercept.is_finite() {
        TrendModel { slope, intercept }
    } else {
        flat_mean(series, sum_y)
    }
}

// `sum_y / n` when it is representable, else a running mean that cannot
// overflow for finite observations.
fn flat_mean(series: &[f64], sum_y: f64) -> TrendModel {
    let mean = sum_y / series.len() as f64;
    let level = if mean.is_finite() {
        mean
    } else {
        running_mean(series)
    };
    TrendModel::flat(finite_or_zero(level))
}

fn running_mean(series: &[f64]) -> f64 {
    let mut mean = 0.0;
    for (i, &value) in series.iter().enumerate() {
        let count = (i + 1) as f64;
        mean += value / count - mean / count;
    }
    mean
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn clamp_projection(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, f64::MAX)
    }
}

/// Trend over the most recent `window` observations
#[derive(Debug, Clone)]
pub struct RollingTrend {
    window: usize,
    values: VecDeque<f64>,
    trend: TrendModel,
}

impl RollingTrend {
    /// Create a tracker keeping the last `window` observations
    pub fn new(window: usize) -> Result<Self> {
        if window < 2 {
            return Err(MathError::InvalidInput(
                "Window must be at least 2 for a trend".to_string(),
            ));
        }

        Ok(Self {
            window,
            values: VecDeque::with_capacity(window),
            trend: TrendModel::default(),
        })
    }

    /// Add the next period's observation and refit
    pub fn update(&mut self, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(MathError::InvalidInput(format!(
                "observation is not finite ({})",
                value
            )));
        }

        self.values.push_back(value);

        // Keep only the required number of values
        if self.values.len() > self.window {
            self.values.pop_front();
        }

        self.trend = fit_trend(self.values.make_contiguous());

        Ok(())
    }

    /// Current trend, positioned at the start of the window
    pub fn trend(&self) -> TrendModel {
        self.trend
    }

    /// Project the windowed trend `periods_ahead` periods past the newest value
    pub fn forecast(&self, periods_ahead: usize) -> Vec<f64> {
        self.trend.project(self.values.len(), periods_ahead)
    }

    /// R-squared of the current trend over the window
    pub fn r_squared(&self) -> Result<f64> {
        let values: Vec<f64> = self.values.iter().copied().collect();
        r_squared(&values, &self.trend)
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Clear all observations
    pub fn reset(&mut self) {
        self.values.clear();
        self.trend = TrendModel::default();
    }
}
