//! # CVP Forecast Workspace
//!
//! Umbrella crate for the sales forecasting workspace.
//!
//! - [`trend_math`]: least-squares trend fitting and non-negative projection
//! - [`cvp_forecast`]: sales record loading, period aggregation, forecast
//!   reports, accuracy metrics and configuration
//!
//! ## Example
//!
//! ```
//! use cvp_forecast_workspace::trend_math::forecast;
//!
//! assert_eq!(forecast(&[100.0], 3), vec![100.0, 100.0, 100.0]);
//! assert_eq!(forecast(&[], 2), vec![0.0, 0.0]);
//! ```

pub use cvp_forecast;
pub use trend_math;
