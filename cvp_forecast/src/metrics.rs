//! Hold-out evaluation of forecasting models

use crate::error::{ForecastError, Result};
use crate::models::{ForecastModel, TrainedForecastModel};
use crate::utils::{forecast_accuracy, train_test_split, ForecastAccuracy};
use serde::Serialize;

/// Accuracy of a model forecasting the trailing part of a series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoldoutReport {
    pub model: String,
    pub train_len: usize,
    pub test_len: usize,
    pub accuracy: ForecastAccuracy,
}

impl std::fmt::Display for HoldoutReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Hold-out ({}): trained on {} periods, tested on {}",
            self.model, self.train_len, self.test_len
        )?;
        write!(f, "{}", self.accuracy)
    }
}

/// Train on the leading part of `series` and score the forecast of the rest.
///
/// `test_ratio` must be between 0 and 1 and leave at least one period on
/// each side.
pub fn evaluate_holdout<M: ForecastModel>(
    model: &M,
    series: &[f64],
    test_ratio: f64,
) -> Result<HoldoutReport> {
    if !(test_ratio > 0.0 && test_ratio < 1.0) {
        return Err(ForecastError::InvalidParameter(
            "Hold-out ratio must be between 0 and 1".to_string(),
        ));
    }

    let (train, test) = train_test_split(series, test_ratio);
    if train.is_empty() || test.is_empty() {
        return Err(ForecastError::ValidationError(format!(
            "Series of {} periods is too short for a {:.0}% hold-out",
            series.len(),
            test_ratio * 100.0
        )));
    }

    let trained = model.train(&train)?;
    let forecast = trained.forecast(test.len())?;
    let accuracy = forecast_accuracy(forecast.values(), &test)?;

    log::info!(
        "{}: hold-out MAE {:.4} over {} periods",
        trained.name(),
        accuracy.mae,
        test.len()
    );

    Ok(HoldoutReport {
        model: trained.name().to_string(),
        train_len: train.len(),
        test_len: test.len(),
        accuracy,
    })
}
