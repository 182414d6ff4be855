use crate::data::Granularity;
use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::ops::RangeBounds;
use std::path::Path;

/// Forecast run configuration.
///
/// Loaded from a TOML file and validated before use; every field is
/// optional in the file. See [`ForecastConfig::from_file`].
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForecastConfig {
    /// Number of future periods to project.
    pub horizon: usize,
    /// Length of one period.
    pub granularity: Granularity,

    /// Confidence level of prediction intervals, none when absent.
    pub confidence_level: Option<f64>,
    /// Share of trailing periods held out to score the model.
    pub holdout_ratio: Option<f64>,
    /// Number of most recent periods to fit.
    pub window: Option<usize>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon: 6,
            granularity: Granularity::Monthly,
            confidence_level: None,
            holdout_ratio: None,
            window: None,
        }
    }
}

impl ForecastConfig {
    /// Load a [`ForecastConfig`] from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if the
    /// configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Parse and validate a [`ForecastConfig`] from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: ForecastConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_num("horizon", self.horizon, 1..=1000)?;

        if let Some(level) = self.confidence_level {
            check_unit_interval("confidence_level", level)?;
        }
        if let Some(ratio) = self.holdout_ratio {
            check_unit_interval("holdout_ratio", ratio)?;
        }
        if let Some(window) = self.window {
            check_num("window", window, 2..)?;
        }

        Ok(())
    }
}

fn check_num<T, R>(name: &str, num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        return Err(ForecastError::ConfigError(format!(
            "{} must be in the range {:?}, but is {:?}",
            name, range, num
        )));
    }
    Ok(())
}

fn check_unit_interval(name: &str, value: f64) -> Result<()> {
    if !(value > 0.0 && value < 1.0) {
        return Err(ForecastError::ConfigError(format!(
            "{} must be between 0 and 1 (exclusive), but is {}",
            name, value
        )));
    }
    Ok(())
}
