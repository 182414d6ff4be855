//! # CVP Forecast
//!
//! Sales and revenue forecasting for cost-volume-profit dashboards.
//!
//! ## Features
//!
//! - Loading dated sales records from CSV
//! - Bucketing records into daily, weekly or monthly periods
//! - Linear trend forecasts with optional prediction intervals
//! - Hold-out accuracy metrics (MAE, RMSE, MAPE, SMAPE)
//! - TOML configuration and the `cvp-forecast` command line tool
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use cvp_forecast::{forecast_records, ForecastConfig, SalesRecord};
//!
//! let records: Vec<SalesRecord> = (1..=4)
//!     .map(|month| {
//!         let date = NaiveDate::from_ymd_opt(2024, month, 15).unwrap();
//!         SalesRecord::new(date, 1000.0 * month as f64)
//!     })
//!     .collect();
//!
//! let config = ForecastConfig {
//!     horizon: 2,
//!     ..ForecastConfig::default()
//! };
//!
//! let result = forecast_records(&records, &config)?;
//! assert_eq!(result.forecast.values().len(), 2);
//! # Ok::<(), cvp_forecast::ForecastError>(())
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod utils;

// Re-export commonly used types
pub use crate::config::ForecastConfig;
pub use crate::data::{DataLoader, Granularity, PeriodSeries, SalesRecord};
pub use crate::error::ForecastError;
pub use crate::models::linear_trend::LinearTrend;
pub use crate::models::{ForecastModel, ForecastResult, TrainedForecastModel};
pub use crate::pipeline::{forecast_records, SalesForecast};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
