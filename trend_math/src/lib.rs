//! # Trend Math
//!
//! Least-squares trend fitting and forward projection for per-period sales
//! and revenue series.
//!
//! A series is an ordered slice of `f64` where index `i` is the `i`-th
//! equal-length period after the series start. Callers are responsible for
//! bucketing dated records into contiguous periods before calling in here.
//!
//! ```
//! use trend_math::forecasting::{fit_trend, forecast};
//!
//! let sales = [10.0, 20.0, 30.0, 40.0, 50.0];
//! let trend = fit_trend(&sales);
//! assert!((trend.slope - 10.0).abs() < 1e-9);
//! assert_eq!(forecast(&sales, 3), vec![60.0, 70.0, 80.0]);
//! ```

use thiserror::Error;

pub mod forecasting;

pub use forecasting::{fit_trend, forecast, r_squared, ForecastEngine, RollingTrend, TrendModel};

/// Errors that can occur in trend calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for trend math operations
pub type Result<T> = std::result::Result<T, MathError>;
