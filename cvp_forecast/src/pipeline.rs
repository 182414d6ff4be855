//! End-to-end forecast of dated sales records

use crate::config::ForecastConfig;
use crate::data::{PeriodSeries, SalesRecord};
use crate::error::Result;
use crate::metrics::{evaluate_holdout, HoldoutReport};
use crate::models::linear_trend::LinearTrend;
use crate::models::{ForecastModel, ForecastResult, TrainedForecastModel};
use serde::Serialize;
use std::fmt;

/// Aggregated history, its forecast and an optional hold-out score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesForecast {
    pub history: PeriodSeries,
    pub forecast: ForecastResult,
    pub holdout: Option<HoldoutReport>,
}

impl SalesForecast {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for SalesForecast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "History: {} {} periods",
            self.history.len(),
            self.history.granularity()
        )?;

        if let (Some(trend), Some(r2)) = (self.forecast.trend(), self.forecast.r_squared()) {
            writeln!(
                f,
                "Trend: slope {:.4} per period, intercept {:.4}, R² {:.4}",
                trend.slope, trend.intercept, r2
            )?;
        }

        for (i, value) in self.forecast.values().iter().enumerate() {
            match self.forecast.periods() {
                Some(periods) => write!(f, "  {}  {:>14.2}", periods[i], value)?,
                None => write!(f, "  +{:<9} {:>14.2}", i + 1, value)?,
            }
            if let Some(intervals) = self.forecast.intervals() {
                let (lower, upper) = intervals[i];
                write!(f, "  [{:.2}, {:.2}]", lower, upper)?;
            }
            writeln!(f)?;
        }

        if let Some(holdout) = &self.holdout {
            write!(f, "{}", holdout)?;
        }

        Ok(())
    }
}

/// Aggregate `records` and forecast them as described by `config`
pub fn forecast_records(records: &[SalesRecord], config: &ForecastConfig) -> Result<SalesForecast> {
    config.validate()?;

    let history = PeriodSeries::aggregate(records, config.granularity)?;
    let model = LinearTrend::from_config(config)?;

    let trained = model.train(history.totals())?;
    let mut forecast = trained.forecast(config.horizon)?;
    if !history.is_empty() {
        forecast = forecast.with_periods(history.future_starts(config.horizon)?)?;
    }

    log::info!(
        "{}: projected {} {} periods from {} periods of history",
        model.name(),
        config.horizon,
        config.granularity,
        history.len()
    );

    let holdout = match config.holdout_ratio {
        Some(ratio) => match evaluate_holdout(&model, history.totals(), ratio) {
            Ok(report) => Some(report),
            Err(err) => {
                log::warn!("skipping hold-out evaluation: {}", err);
                None
            }
        },
        None => None,
    };

    Ok(SalesForecast {
        history,
        forecast,
        holdout,
    })
}
