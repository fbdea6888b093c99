use crate::error::ComputeError;
use crate::indicator::mean::Mean;
use crate::model::series::Series;

/// Averages over the whole retrieved window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    /// Close of the oldest retrieved point, used as the "previous close" proxy
    /// for the session open. Not the true session open.
    pub open_price: f64,
    pub average_high: f64,
    pub average_low: f64,
    pub average_close: f64,
}

/// Next-period estimate. Values equal the window averages exactly; kept as its
/// own type because it is shown separately from the summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub predicted_high: f64,
    pub predicted_low: f64,
    pub predicted_close: f64,
}

impl Prediction {
    pub fn from_statistics(stats: &Statistics) -> Self {
        Self {
            predicted_high: stats.average_high,
            predicted_low: stats.average_low,
            predicted_close: stats.average_close,
        }
    }
}

pub fn compute(series: &Series) -> Result<(Statistics, Prediction), ComputeError> {
    let highs = series.highs();
    let lows = series.lows();
    let closes = series.closes();
    if highs.is_empty() && lows.is_empty() && closes.is_empty() {
        return Err(ComputeError::InsufficientData);
    }

    let average_high = highs.iter().copied().collect::<Mean>().value();
    let average_low = lows.iter().copied().collect::<Mean>().value();
    let average_close = closes.iter().copied().collect::<Mean>().value();
    let (Some(average_high), Some(average_low), Some(average_close)) =
        (average_high, average_low, average_close)
    else {
        return Err(ComputeError::InsufficientData);
    };

    if !(average_high.is_finite() && average_low.is_finite() && average_close.is_finite()) {
        tracing::warn!(
            average_high,
            average_low,
            average_close,
            "Non-finite average computed"
        );
        return Err(ComputeError::InvalidAverage);
    }

    let open_price = series
        .oldest()
        .map(|p| p.close)
        .ok_or(ComputeError::InsufficientData)?;

    let stats = Statistics {
        open_price,
        average_high,
        average_low,
        average_close,
    };
    Ok((stats, Prediction::from_statistics(&stats)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::series::IntradayPoint;

    fn point(high: f64, low: f64, close: f64) -> IntradayPoint {
        IntradayPoint {
            timestamp: String::new(),
            open: Some(close),
            high,
            low,
            close,
            volume: None,
        }
    }

    #[test]
    fn single_point_window() {
        let s = Series::reverse_chronological(vec![point(11.0, 9.0, 10.0)]);
        let (stats, pred) = compute(&s).unwrap();
        assert_eq!(stats.open_price, 10.0);
        assert_eq!(stats.average_high, 11.0);
        assert_eq!(pred.predicted_low, 9.0);
    }

    #[test]
    fn infinite_values_are_rejected() {
        let s = Series::reverse_chronological(vec![
            point(f64::MAX, 1.0, 1.0),
            point(f64::MAX, 1.0, 1.0),
        ]);
        assert_eq!(compute(&s), Err(ComputeError::InvalidAverage));
    }

    #[test]
    fn open_price_does_not_depend_on_storage_order() {
        let s = Series::reverse_chronological(vec![point(3.0, 1.0, 2.0), point(5.0, 3.0, 4.0)]);
        let (a, _) = compute(&s).unwrap();
        let (b, _) = compute(&s.into_chronological()).unwrap();
        assert_eq!(a.open_price, 4.0);
        assert_eq!(a.open_price, b.open_price);
    }
}
