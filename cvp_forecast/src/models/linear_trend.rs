//! Least-squares linear trend model

use crate::config::ForecastConfig;
use crate::error::{ForecastError, Result};
use crate::models::{ForecastModel, ForecastResult, TrainedForecastModel};
use statrs::distribution::{ContinuousCDF, StudentsT};
use trend_math::{fit_trend, forecast, r_squared, ForecastEngine, TrendModel};

/// Linear trend model
#[derive(Debug, Clone)]
pub struct LinearTrend {
    /// Name of the model
    name: String,
    /// Number of most recent periods to fit (all when `None`)
    window: Option<usize>,
    /// Confidence level of the prediction intervals
    confidence_level: Option<f64>,
}

/// Trained linear trend model
#[derive(Debug, Clone)]
pub struct TrainedLinearTrend {
    name: String,
    /// Periods the trend was fitted on
    history: Vec<f64>,
    trend: TrendModel,
    r_squared: Option<f64>,
    confidence_level: Option<f64>,
}

impl LinearTrend {
    /// Create a model fitting the whole series without intervals
    pub fn new() -> Self {
        Self {
            name: "Linear Trend".to_string(),
            window: None,
            confidence_level: None,
        }
    }

    /// Fit only the last `window` periods
    pub fn with_window(mut self, window: usize) -> Result<Self> {
        if window < 2 {
            return Err(ForecastError::InvalidParameter(
                "Window must be at least 2 periods".to_string(),
            ));
        }

        self.name = format!("Linear Trend (window={})", window);
        self.window = Some(window);
        Ok(self)
    }

    /// Produce prediction intervals at `level` (between 0 and 1)
    pub fn with_confidence(mut self, level: f64) -> Result<Self> {
        if !(level > 0.0 && level < 1.0) {
            return Err(ForecastError::InvalidParameter(
                "Confidence level must be between 0 and 1".to_string(),
            ));
        }

        self.confidence_level = Some(level);
        Ok(self)
    }

    /// Build the model described by a configuration
    pub fn from_config(config: &ForecastConfig) -> Result<Self> {
        let mut model = Self::new();
        if let Some(window) = config.window {
            model = model.with_window(window)?;
        }
        if let Some(level) = config.confidence_level {
            model = model.with_confidence(level)?;
        }
        Ok(model)
    }

    pub fn window(&self) -> Option<usize> {
        self.window
    }

    pub fn confidence_level(&self) -> Option<f64> {
        self.confidence_level
    }
}

impl Default for LinearTrend {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastModel for LinearTrend {
    type Trained = TrainedLinearTrend;

    fn train(&self, series: &[f64]) -> Result<Self::Trained> {
        ForecastEngine::validate_series(series)?;

        let history = match self.window {
            Some(window) if series.len() > window => series[series.len() - window..].to_vec(),
            _ => series.to_vec(),
        };

        let trend = fit_trend(&history);
        let r_squared = r_squared(&history, &trend).ok();

        log::debug!(
            "{}: fitted slope {:.4}, intercept {:.4} over {} periods",
            self.name,
            trend.slope,
            trend.intercept,
            history.len()
        );

        Ok(TrainedLinearTrend {
            name: self.name.clone(),
            history,
            trend,
            r_squared,
            confidence_level: self.confidence_level,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedLinearTrend {
    pub fn trend(&self) -> TrendModel {
        self.trend
    }

    pub fn r_squared(&self) -> Option<f64> {
        self.r_squared
    }

    pub fn history(&self) -> &[f64] {
        &self.history
    }

    /// Prediction intervals for the next `horizons` periods.
    ///
    /// `None` with fewer than 3 periods, where the residual variance is
    /// undefined. Bounds are clamped to be non-negative. `level` must be
    /// between 0 and 1.
    pub fn prediction_intervals(
        &self,
        level: f64,
        horizons: usize,
    ) -> Result<Option<Vec<(f64, f64)>>> {
        if !(level > 0.0 && level < 1.0) {
            return Err(ForecastError::InvalidParameter(
                "Confidence level must be between 0 and 1".to_string(),
            ));
        }

        let n = self.history.len();
        if n < 3 {
            return Ok(None);
        }

        let nf = n as f64;
        let x_mean = (nf - 1.0) / 2.0;
        let sxx: f64 = (0..n).map(|x| (x as f64 - x_mean).powi(2)).sum();

        let sse: f64 = self
            .history
            .iter()
            .enumerate()
            .map(|(x, &y)| (y - self.trend.value_at(x as f64)).powi(2))
            .sum();
        let std_err = (sse / (nf - 2.0)).sqrt();

        if !std_err.is_finite() {
            log::warn!("{}: residual error overflowed, skipping intervals", self.name);
            return Ok(None);
        }

        let t = StudentsT::new(0.0, 1.0, nf - 2.0)?.inverse_cdf((1.0 + level) / 2.0);

        let intervals = (0..horizons)
            .map(|offset| {
                let x0 = (n + offset) as f64;
                let center = self.trend.value_at(x0);
                let margin = t * std_err * (1.0 + 1.0 / nf + (x0 - x_mean).powi(2) / sxx).sqrt();
                (non_negative(center - margin), non_negative(center + margin))
            })
            .collect();

        Ok(Some(intervals))
    }
}

impl TrainedForecastModel for TrainedLinearTrend {
    fn forecast(&self, horizons: usize) -> Result<ForecastResult> {
        let values = forecast(&self.history, horizons);
        let mut result = ForecastResult::new(values, horizons)?.with_trend(self.trend, self.r_squared);

        if let Some(level) = self.confidence_level {
            if let Some(intervals) = self.prediction_intervals(level, horizons)? {
                result = result.with_intervals(intervals)?;
            }
        }

        Ok(result)
    }

    fn predict(&self) -> Vec<f64> {
        self.trend.fitted(self.history.len())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, f64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_window_uses_recent_periods() {
        let series = [500.0, 400.0, 10.0, 20.0, 30.0];
        let model = LinearTrend::new().with_window(3).unwrap();
        let trained = model.train(&series).unwrap();

        assert_eq!(trained.history(), &[10.0, 20.0, 30.0]);
        assert_relative_eq!(trained.trend().slope, 10.0, max_relative = 1e-9);

        let result = trained.forecast(2).unwrap();
        assert_relative_eq!(result.values()[0], 40.0, max_relative = 1e-9);
        assert_relative_eq!(result.values()[1], 50.0, max_relative = 1e-9);
    }

    #[test]
    fn test_intervals_need_three_points() {
        let model = LinearTrend::new().with_confidence(0.9).unwrap();
        let trained = model.train(&[10.0, 20.0]).unwrap();

        assert_eq!(trained.prediction_intervals(0.9, 2).unwrap(), None);
        assert!(trained.forecast(2).unwrap().intervals().is_none());
    }

    #[test]
    fn test_perfect_line_has_zero_width_intervals() {
        let model = LinearTrend::new().with_confidence(0.95).unwrap();
        let trained = model.train(&[10.0, 20.0, 30.0, 40.0]).unwrap();
        let result = trained.forecast(2).unwrap();

        let intervals = result.intervals().unwrap();
        for ((lower, upper), value) in intervals.iter().zip(result.values()) {
            assert_relative_eq!(*lower, *value, max_relative = 1e-9);
            assert_relative_eq!(*upper, *value, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_intervals_reject_level_outside_unit_range() {
        let trained = LinearTrend::new().train(&[1.0, 3.0, 2.0, 5.0]).unwrap();

        for level in [1.5, -0.2, 0.0, 1.0, f64::NAN] {
            assert!(
                matches!(
                    trained.prediction_intervals(level, 2),
                    Err(ForecastError::InvalidParameter(_))
                ),
                "level {}",
                level
            );
        }

        // also rejected when there is too little history for intervals
        let short = LinearTrend::new().train(&[1.0, 3.0]).unwrap();
        assert!(short.prediction_intervals(2.0, 1).is_err());
    }

    #[test]
    fn test_intervals_clamp_on_declining_series() {
        // slope -99, intercept 301: point forecasts at positions 4, 5, 6 are negative
        let model = LinearTrend::new().with_confidence(0.95).unwrap();
        let result = model.train(&[300.0, 200.0, 110.0, 0.0]).unwrap().forecast(3).unwrap();

        let intervals = result.intervals().unwrap();
        assert_eq!(intervals.len(), 3);

        for ((lower, upper), value) in intervals.iter().zip(result.values()) {
            assert!(*lower >= 0.0);
            assert!(lower <= value && value <= upper);
            assert_eq!(*value, 0.0);
        }
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(LinearTrend::new().with_window(1).is_err());
        assert!(LinearTrend::new().with_confidence(1.0).is_err());
        assert!(LinearTrend::new().with_confidence(0.0).is_err());
        assert!(LinearTrend::new().with_confidence(f64::NAN).is_err());
    }
}
