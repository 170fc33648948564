use approx::assert_abs_diff_eq;
use chrono::{Duration, NaiveDate};
use ecowatt::features::{build_features, LagWindow};
use ecowatt::generator::{SeasonalProfile, SignalGenerator};
use ecowatt::predictor::{forecast, forecast_series};
use ecowatt::{EcoWattError, Frequency, LagRegression, Series};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn flat_series(points: usize) -> Series {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    SignalGenerator::new(SeasonalProfile::flat(100.0))
        .unwrap()
        .generate(start, points, Frequency::Daily)
        .unwrap()
}

fn drift_model() -> LagRegression {
    // next = previous + 1
    LagRegression::from_parts(vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0], 1.0).unwrap()
}

#[test]
fn test_flat_series_forecast() {
    let series = flat_series(14);
    let (features, targets) = build_features(&series, 7).unwrap();
    let model = LagRegression::fit(&features, &targets).unwrap();

    let result = forecast_series(&model, &series, 5, Frequency::Daily).unwrap();

    assert_eq!(result.horizon(), 5);
    for value in result.values() {
        assert_abs_diff_eq!(value, 100.0, epsilon = 1e-6);
    }
}

#[rstest]
#[case(1)]
#[case(5)]
#[case(30)]
#[case(365)]
fn test_horizon_length(#[case] horizon: usize) {
    let window = LagWindow::new(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]).unwrap();
    let values = forecast(&drift_model(), &window, horizon).unwrap();
    assert_eq!(values.len(), horizon);
}

#[test]
fn test_predictions_are_fed_back() {
    let window = LagWindow::new(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]).unwrap();
    let values = forecast(&drift_model(), &window, 5).unwrap();
    assert_eq!(values, vec![8.0, 9.0, 10.0, 11.0, 12.0]);
}

#[test]
fn test_window_is_replaced_by_predictions() {
    // predicts the oldest value in the window, so the initial window repeats
    let model =
        LagRegression::from_parts(vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0], 0.0).unwrap();
    let window = LagWindow::new(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]).unwrap();

    let values = forecast(&model, &window, 14).unwrap();

    assert_eq!(&values[..7], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    assert_eq!(&values[7..], &values[..7]);
}

#[test]
fn test_forecast_is_deterministic() {
    let series = flat_series(30);
    let model = drift_model();
    let a = forecast_series(&model, &series, 10, Frequency::Daily).unwrap();
    let b = forecast_series(&model, &series, 10, Frequency::Daily).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_forecast_timestamps_follow_series() {
    let series = flat_series(10);
    let last = series.last_timestamp().unwrap();

    let result = forecast_series(&drift_model(), &series, 3, Frequency::Daily).unwrap();

    let timestamps: Vec<_> = result.points().iter().map(|p| p.timestamp).collect();
    assert_eq!(
        timestamps,
        vec![
            last + Duration::days(1),
            last + Duration::days(2),
            last + Duration::days(3)
        ]
    );
}

#[test]
fn test_zero_horizon_rejected() {
    let window = LagWindow::new(&[1.0; 7]).unwrap();
    assert!(matches!(
        forecast(&drift_model(), &window, 0),
        Err(EcoWattError::InvalidArgument(_))
    ));
}

#[test]
fn test_series_shorter_than_lag() {
    let series = flat_series(5);
    assert!(matches!(
        forecast_series(&drift_model(), &series, 3, Frequency::Daily),
        Err(EcoWattError::InsufficientData { needed: 7, got: 5 })
    ));
}

#[test]
fn test_mean_absolute_error_against_actuals() {
    let series = flat_series(10);
    let result = forecast_series(&drift_model(), &series, 2, Frequency::Daily).unwrap();
    // predictions are 101, 102
    let mae = result.mean_absolute_error(&[100.0, 100.0]).unwrap();
    assert_abs_diff_eq!(mae, 1.5, epsilon = 1e-9);
    assert!(matches!(
        result.mean_absolute_error(&[100.0]),
        Err(EcoWattError::InvalidArgument(_))
    ));
    assert!(matches!(
        result.mean_absolute_error(&[]),
        Err(EcoWattError::InvalidArgument(_))
    ));
}
