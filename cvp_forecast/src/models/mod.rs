//! Forecasting models for per-period sales series

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Debug;
use trend_math::TrendModel;

/// Forecast result containing projected values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult {
    /// Forecasted values
    values: Vec<f64>,
    /// Number of periods forecasted
    horizons: usize,
    /// Prediction intervals (optional)
    intervals: Option<Vec<(f64, f64)>>,
    /// Start date of each forecast period (optional)
    periods: Option<Vec<NaiveDate>>,
    /// Fitted trend behind the forecast (optional)
    trend: Option<TrendModel>,
    /// Goodness of fit of the trend (optional)
    r_squared: Option<f64>,
}

impl ForecastResult {
    /// Create a new forecast result
    pub fn new(values: Vec<f64>, horizons: usize) -> Result<Self> {
        if values.len() != horizons {
            return Err(ForecastError::ValidationError(format!(
                "Values length ({}) doesn't match horizons ({})",
                values.len(),
                horizons
            )));
        }

        Ok(Self {
            values,
            horizons,
            intervals: None,
            periods: None,
            trend: None,
            r_squared: None,
        })
    }

    /// Attach one `(lower, upper)` interval per forecast value
    pub fn with_intervals(mut self, intervals: Vec<(f64, f64)>) -> Result<Self> {
        if intervals.len() != self.values.len() {
            return Err(ForecastError::ValidationError(format!(
                "Values length ({}) doesn't match intervals length ({})",
                self.values.len(),
                intervals.len()
            )));
        }

        self.intervals = Some(intervals);
        Ok(self)
    }

    /// Attach the start date of each forecast period
    pub fn with_periods(mut self, periods: Vec<NaiveDate>) -> Result<Self> {
        if periods.len() != self.values.len() {
            return Err(ForecastError::ValidationError(format!(
                "Values length ({}) doesn't match periods length ({})",
                self.values.len(),
                periods.len()
            )));
        }

        self.periods = Some(periods);
        Ok(self)
    }

    /// Attach the fitted trend and its R-squared, when defined
    pub fn with_trend(mut self, trend: TrendModel, r_squared: Option<f64>) -> Self {
        self.trend = Some(trend);
        self.r_squared = r_squared;
        self
    }

    /// Get the forecasted values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the number of periods forecasted
    pub fn horizons(&self) -> usize {
        self.horizons
    }

    /// Get the prediction intervals, if available
    pub fn intervals(&self) -> Option<&[(f64, f64)]> {
        self.intervals.as_deref()
    }

    /// Get the period start dates, if available
    pub fn periods(&self) -> Option<&[NaiveDate]> {
        self.periods.as_deref()
    }

    pub fn trend(&self) -> Option<TrendModel> {
        self.trend
    }

    pub fn r_squared(&self) -> Option<f64> {
        self.r_squared
    }

    /// Calculate mean absolute error between forecast and actual values
    pub fn mean_absolute_error(&self, actual: &[f64]) -> Result<f64> {
        self.check_actual_len(actual)?;

        let sum: f64 = self
            .values
            .iter()
            .zip(actual.iter())
            .map(|(f, a)| (f - a).abs())
            .sum();

        Ok(sum / self.values.len() as f64)
    }

    /// Calculate mean squared error between forecast and actual values
    pub fn mean_squared_error(&self, actual: &[f64]) -> Result<f64> {
        self.check_actual_len(actual)?;

        let sum: f64 = self
            .values
            .iter()
            .zip(actual.iter())
            .map(|(f, a)| (f - a).powi(2))
            .sum();

        Ok(sum / self.values.len() as f64)
    }

    /// Serialize the result as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn check_actual_len(&self, actual: &[f64]) -> Result<()> {
        if self.values.is_empty() || self.values.len() != actual.len() {
            return Err(ForecastError::ValidationError(format!(
                "Forecast length ({}) doesn't match actual length ({})",
                self.values.len(),
                actual.len()
            )));
        }
        Ok(())
    }
}

/// Trained forecast model
pub trait TrainedForecastModel: Debug {
    /// Generate forecast for future periods
    fn forecast(&self, horizons: usize) -> Result<ForecastResult>;

    /// In-sample values for the periods the model was trained on
    fn predict(&self) -> Vec<f64>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Forecast model that can be trained on a per-period series
pub trait ForecastModel: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedForecastModel;

    /// Train the model on a series ordered oldest first
    fn train(&self, series: &[f64]) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

pub mod linear_trend;
