use crate::model::query::Symbol;
use crate::model::series::Series;
use crate::predictor::{Prediction, Statistics};

/// Every price shown on screen goes through `format_price`.
pub const PRICE_DECIMALS: usize = 3;
pub const CLOSE_DATASET_LABEL: &str = "Closing Price";

pub fn format_price(value: f64) -> String {
    format!("{:.*}", PRICE_DECIMALS, value)
}

/// Chart-ready data: chronological timestamps and their closes.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub title: String,
    pub labels: Vec<String>,
    pub dataset_label: &'static str,
    pub closes: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryRecord {
    pub open_price: f64,
    pub average_high: f64,
    pub average_low: f64,
    pub average_close: f64,
}

impl SummaryRecord {
    pub const HEADERS: [&'static str; 4] = ["Opening", "High", "Low", "Closing"];

    pub fn cells(&self) -> [String; 4] {
        [
            format_price(self.open_price),
            format_price(self.average_high),
            format_price(self.average_low),
            format_price(self.average_close),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionRecord {
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl PredictionRecord {
    pub const HEADERS: [&'static str; 3] = ["High", "Low", "Closing"];

    pub fn cells(&self) -> [String; 3] {
        [
            format_price(self.high),
            format_price(self.low),
            format_price(self.close),
        ]
    }
}

/// Snapshot taken when the popup opens. It keeps its own symbol so a later
/// query cannot relabel it.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    Show {
        symbol: Symbol,
        record: PredictionRecord,
    },
    NoDataToPredict,
}

/// Everything a successful query makes available for display.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryReport {
    pub symbol: Symbol,
    pub series: Series,
    pub chart: ChartSeries,
    pub summary: SummaryRecord,
    pub prediction: Prediction,
}

impl QueryReport {
    pub fn prediction_record(&self) -> PredictionRecord {
        PredictionRecord {
            high: self.prediction.predicted_high,
            low: self.prediction.predicted_low,
            close: self.prediction.predicted_close,
        }
    }
}

/// Build the display projection. The series is stored oldest-first.
pub fn project(
    symbol: Symbol,
    series: Series,
    stats: &Statistics,
    prediction: Prediction,
) -> QueryReport {
    let series = series.into_chronological();
    let chart = ChartSeries {
        title: format!("{} Stock Price Chart", symbol),
        labels: series.points().iter().map(|p| p.timestamp.clone()).collect(),
        dataset_label: CLOSE_DATASET_LABEL,
        closes: series.closes(),
    };
    let summary = SummaryRecord {
        open_price: stats.open_price,
        average_high: stats.average_high,
        average_low: stats.average_low,
        average_close: stats.average_close,
    };
    QueryReport {
        symbol,
        series,
        chart,
        summary,
        prediction,
    }
}

/// Only called on explicit user request; no report means nothing to predict.
pub fn request_prediction(report: Option<&QueryReport>) -> PredictionOutcome {
    match report {
        Some(r) => PredictionOutcome::Show {
            symbol: r.symbol.clone(),
            record: r.prediction_record(),
        },
        None => PredictionOutcome::NoDataToPredict,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_price_uses_three_decimals() {
        assert_eq!(format_price(150.0), "150.000");
        assert_eq!(format_price(149.98765), "149.988");
    }

    #[test]
    fn no_report_means_no_prediction() {
        assert_eq!(request_prediction(None), PredictionOutcome::NoDataToPredict);
    }
}
