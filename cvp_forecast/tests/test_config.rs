use cvp_forecast::{ForecastConfig, ForecastError, Granularity};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_config_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "horizon = 12").unwrap();
    writeln!(file, "granularity = \"weekly\"").unwrap();
    writeln!(file, "confidence_level = 0.9").unwrap();
    writeln!(file, "window = 26").unwrap();

    let config = ForecastConfig::from_file(file.path()).unwrap();

    assert_eq!(
        config,
        ForecastConfig {
            horizon: 12,
            granularity: Granularity::Weekly,
            confidence_level: Some(0.9),
            holdout_ratio: None,
            window: Some(26),
        }
    );
}

#[rstest]
#[case("horizon = 0")]
#[case("horizon = 5000")]
#[case("confidence_level = 1.0")]
#[case("holdout_ratio = 0.0")]
#[case("window = 1")]
#[case("granularity = \"hourly\"")]
#[case("colour = \"blue\"")]
fn test_invalid_config(#[case] text: &str) {
    assert!(matches!(
        ForecastConfig::from_toml_str(text),
        Err(ForecastError::ConfigError(_))
    ));
}

#[test]
fn test_missing_config_file() {
    assert!(matches!(
        ForecastConfig::from_file("/nonexistent/forecast.toml"),
        Err(ForecastError::Io(_))
    ));
}
