use approx::assert_relative_eq;
use cvp_forecast::metrics::evaluate_holdout;
use cvp_forecast::utils::{forecast_accuracy, train_test_split};
use cvp_forecast::{ForecastError, LinearTrend};
use rstest::rstest;

#[test]
fn test_regression_metrics() {
    let actual = vec![10.0, 20.0, 30.0, 40.0, 50.0];
    let predicted = vec![12.0, 18.0, 33.0, 37.0, 52.0];

    let accuracy = forecast_accuracy(&predicted, &actual).unwrap();

    assert_relative_eq!(accuracy.mae, 2.4, epsilon = 1e-9);
    assert_relative_eq!(accuracy.mse, 6.0, epsilon = 1e-9);
    assert_relative_eq!(accuracy.rmse, 6.0_f64.sqrt(), epsilon = 1e-9);
    // (20 + 10 + 10 + 7.5 + 4) / 5
    assert_relative_eq!(accuracy.mape, 10.3, epsilon = 1e-9);
    assert!(accuracy.smape > 0.0 && accuracy.smape < 15.0);
}

#[test]
fn test_mape_ignores_zero_actuals() {
    let accuracy = forecast_accuracy(&[5.0, 110.0], &[0.0, 100.0]).unwrap();

    assert_relative_eq!(accuracy.mape, 10.0, epsilon = 1e-9);
    assert_relative_eq!(accuracy.smape, (200.0 + 200.0 * 10.0 / 210.0) / 2.0, epsilon = 1e-9);
}

#[test]
fn test_error_handling() {
    assert!(matches!(
        forecast_accuracy(&[], &[]),
        Err(ForecastError::ValidationError(_))
    ));
    assert!(forecast_accuracy(&[1.0, 2.0], &[1.0]).is_err());
}

#[rstest]
#[case(0.2, 8, 2)]
#[case(0.5, 5, 5)]
#[case(0.0, 10, 0)]
#[case(1.0, 10, 0)]
fn test_train_test_split(#[case] ratio: f64, #[case] train_len: usize, #[case] test_len: usize) {
    let data: Vec<f64> = (0..10).map(f64::from).collect();
    let (train, test) = train_test_split(&data, ratio);

    assert_eq!(train.len(), train_len);
    assert_eq!(test.len(), test_len);
    assert_eq!(train.iter().chain(test.iter()).count(), data.len());
}

#[test]
fn test_holdout_on_noisy_trend() {
    let series = [100.0, 112.0, 119.0, 131.0, 138.0, 152.0, 158.0, 171.0];
    let report = evaluate_holdout(&LinearTrend::new(), &series, 0.25).unwrap();

    assert_eq!(report.train_len, 6);
    assert_eq!(report.test_len, 2);
    assert!(report.accuracy.mae < 10.0);
    assert!(report.to_string().contains("Linear Trend"));
}

#[test]
fn test_holdout_rejects_bad_ratio_and_short_series() {
    assert!(matches!(
        evaluate_holdout(&LinearTrend::new(), &[1.0, 2.0, 3.0], 1.5),
        Err(ForecastError::InvalidParameter(_))
    ));
    assert!(matches!(
        evaluate_holdout(&LinearTrend::new(), &[1.0], 0.5),
        Err(ForecastError::ValidationError(_))
    ));
}
