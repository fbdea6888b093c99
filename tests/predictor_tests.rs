use intraday_forecast::error::ComputeError;
use intraday_forecast::model::series::{IntradayPoint, Series};
use intraday_forecast::predictor::compute;

fn point(ts: &str, high: f64, low: f64, close: f64) -> IntradayPoint {
    IntradayPoint {
        timestamp: ts.to_string(),
        open: Some(close),
        high,
        low,
        close,
        volume: None,
    }
}

fn aapl_series() -> Series {
    Series::reverse_chronological(vec![
        point("2024-01-02 16:00:00", 151.0, 149.5, 150.0),
        point("2024-01-02 15:55:00", 152.0, 150.0, 151.0),
        point("2024-01-02 15:50:00", 150.0, 148.0, 149.0),
    ])
}

#[test]
/// Three points with closes [150, 151, 149] newest-first: the average close is
/// 150 and the open price is the oldest point's close.
fn aapl_scenario() {
    let (stats, prediction) = compute(&aapl_series()).unwrap();

    assert_eq!(stats.average_close, 150.0);
    assert_eq!(stats.open_price, 149.0);
    assert_eq!(stats.average_high, 151.0);
    assert!((stats.average_low - 149.166_666_666_666_66).abs() < 1e-9);
    assert_eq!(prediction.predicted_close, 150.0);
}

#[test]
fn averages_are_arithmetic_means_and_prediction_equals_them() {
    let series = Series::reverse_chronological(vec![
        point("t4", 10.0, 1.0, 5.0),
        point("t3", 20.0, 2.0, 6.0),
        point("t2", 30.0, 3.0, 7.0),
        point("t1", 40.0, 4.0, 8.0),
    ]);
    let (stats, prediction) = compute(&series).unwrap();

    assert_eq!(stats.average_high, 25.0);
    assert_eq!(stats.average_low, 2.5);
    assert_eq!(stats.average_close, 6.5);
    assert_eq!(prediction.predicted_high, stats.average_high);
    assert_eq!(prediction.predicted_low, stats.average_low);
    assert_eq!(prediction.predicted_close, stats.average_close);
}

#[test]
fn empty_series_is_insufficient_data() {
    assert_eq!(
        compute(&Series::reverse_chronological(Vec::new())),
        Err(ComputeError::InsufficientData)
    );
    assert_eq!(
        compute(&Series::chronological(Vec::new())),
        Err(ComputeError::InsufficientData)
    );
}

#[test]
/// "NaN" strings survive parsing but must never reach the screen as averages.
fn nan_values_are_invalid_average() {
    let series = Series::reverse_chronological(vec![
        point("t2", f64::NAN, f64::NAN, f64::NAN),
        point("t1", f64::NAN, f64::NAN, f64::NAN),
    ]);
    assert_eq!(compute(&series), Err(ComputeError::InvalidAverage));
}

#[test]
fn a_single_nan_close_is_invalid_average() {
    let series = Series::reverse_chronological(vec![
        point("t2", 2.0, 1.0, f64::NAN),
        point("t1", 2.0, 1.0, 1.5),
    ]);
    assert_eq!(compute(&series), Err(ComputeError::InvalidAverage));
}

#[test]
fn statistics_are_independent_of_storage_order() {
    let reversed = aapl_series();
    let chronological = reversed.clone().into_chronological();
    assert_eq!(compute(&reversed), compute(&chronological));
}
