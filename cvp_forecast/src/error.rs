//! Error types for the cvp_forecast crate

use thiserror::Error;

/// Custom error types for the cvp_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error related to parameter validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error in a configuration file
    #[error("Config error: {0}")]
    ConfigError(String),

    /// Error from the trend engine
    #[error("Math error: {0}")]
    Math(#[from] trend_math::MathError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from CSV decoding
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error parsing a date
    #[error("Date parse error: {0}")]
    DateParse(#[from] chrono::ParseError),

    /// Error serializing a report
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Error from a statistical distribution
    #[error("Statistics error: {0}")]
    Statistics(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<statrs::StatsError> for ForecastError {
    fn from(err: statrs::StatsError) -> Self {
        ForecastError::Statistics(err.to_string())
    }
}

impl From<toml::de::Error> for ForecastError {
    fn from(err: toml::de::Error) -> Self {
        ForecastError::ConfigError(err.to_string())
    }
}
