use approx::assert_relative_eq;
use chrono::NaiveDate;
use cvp_forecast::{
    forecast_records, DataLoader, ForecastConfig, ForecastError, Granularity, LinearTrend,
    ForecastModel, TrainedForecastModel,
};
use std::io::Write;
use tempfile::NamedTempFile;

// Monthly revenue growing by 100 each month, spread over two sales per month
fn create_sample_data() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();

    writeln!(file, "date,product,amount").unwrap();
    for month in 1..=6 {
        let total = 1000.0 + 100.0 * (month - 1) as f64;
        writeln!(file, "2024-{:02}-03,widget,{}", month, total * 0.25).unwrap();
        writeln!(file, "2024-{:02}-21,gadget,{}", month, total * 0.75).unwrap();
    }

    file
}

#[test]
fn test_full_forecast_workflow() {
    // 1. Load data
    let data_file = create_sample_data();
    let records = DataLoader::from_csv(data_file.path()).unwrap();
    assert_eq!(records.len(), 12);

    // 2. Forecast three months ahead with intervals and a hold-out score
    let config = ForecastConfig {
        horizon: 3,
        granularity: Granularity::Monthly,
        confidence_level: Some(0.95),
        holdout_ratio: Some(0.34),
        window: None,
    };
    let result = forecast_records(&records, &config).unwrap();

    // 3. History is six monthly totals
    assert_eq!(result.history.len(), 6);
    assert_relative_eq!(result.history.totals()[5], 1500.0, max_relative = 1e-12);

    // 4. Forecast continues the line
    let values = result.forecast.values();
    assert_eq!(values.len(), 3);
    for (offset, expected) in [1600.0, 1700.0, 1800.0].iter().enumerate() {
        assert_relative_eq!(values[offset], *expected, max_relative = 1e-9);
    }

    let periods = result.forecast.periods().unwrap();
    assert_eq!(periods[0], NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
    assert_eq!(periods[2], NaiveDate::from_ymd_opt(2024, 9, 1).unwrap());

    assert!(result.forecast.r_squared().unwrap() > 0.999);
    assert_eq!(result.forecast.intervals().unwrap().len(), 3);

    // 5. Hold-out on a perfect line is exact
    let holdout = result.holdout.as_ref().unwrap();
    assert_eq!(holdout.train_len + holdout.test_len, 6);
    assert!(holdout.accuracy.mae < 1e-6);

    // 6. Reports render
    let json = result.to_json().unwrap();
    assert!(json.contains("\"2024-07-01\""));
    let text = result.to_string();
    assert!(text.contains("2024-08-01"));
    assert!(text.contains("Hold-out"));
}

#[test]
fn test_declining_sales_never_project_negative() {
    let records: Vec<_> = [900.0, 600.0, 300.0]
        .iter()
        .enumerate()
        .map(|(week, amount)| {
            let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(7 * week as u64);
            cvp_forecast::SalesRecord::new(date, *amount)
        })
        .collect();

    let config = ForecastConfig {
        horizon: 4,
        granularity: Granularity::Weekly,
        ..ForecastConfig::default()
    };
    let result = forecast_records(&records, &config).unwrap();

    assert_eq!(result.forecast.values(), &[0.0, 0.0, 0.0, 0.0]);
}

#[test]
fn test_empty_history_forecasts_zeros() {
    let result = forecast_records(&[], &ForecastConfig::default()).unwrap();

    assert!(result.history.is_empty());
    assert_eq!(result.forecast.values(), &[0.0; 6]);
    assert!(result.forecast.periods().is_none());
}

#[test]
fn test_short_history_skips_holdout() {
    let records = vec![cvp_forecast::SalesRecord::new(
        NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
        250.0,
    )];
    let config = ForecastConfig {
        horizon: 2,
        holdout_ratio: Some(0.5),
        ..ForecastConfig::default()
    };

    let result = forecast_records(&records, &config).unwrap();

    assert_eq!(result.forecast.values(), &[250.0, 250.0]);
    assert!(result.holdout.is_none());
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = ForecastConfig {
        horizon: 0,
        ..ForecastConfig::default()
    };

    assert!(matches!(
        forecast_records(&[], &config),
        Err(ForecastError::ConfigError(_))
    ));
}

#[test]
fn test_model_trait_workflow() {
    let model = LinearTrend::new();
    let trained = model.train(&[5.0, 7.0, 9.0]).unwrap();

    assert_eq!(trained.name(), model.name());
    assert_eq!(trained.predict().len(), 3);
    assert_relative_eq!(trained.forecast(1).unwrap().values()[0], 11.0, max_relative = 1e-9);
}
