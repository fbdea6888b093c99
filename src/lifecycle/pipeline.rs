use crate::alphavantage::extract::extract;
use crate::alphavantage::rest::{MarketDataClient, Transport};
use crate::error::QueryError;
use crate::model::query::Query;
use crate::predictor::compute;
use crate::ui::projection::{project, QueryReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetching,
    Extracting,
    Computing,
    Ready,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Fetching => "Fetching",
            Stage::Extracting => "Extracting",
            Stage::Computing => "Computing",
            Stage::Ready => "Ready",
        }
    }
}

/// One full attempt: fetch, extract, compute, project. The only suspension
/// point is the provider request; everything after it runs synchronously.
pub async fn run_query<T: Transport>(
    client: &MarketDataClient<T>,
    query: &Query,
) -> Result<QueryReport, QueryError> {
    tracing::debug!(stage = Stage::Fetching.as_str(), input = query.raw_input());
    let payload = client.fetch_series(query).await?;

    tracing::debug!(stage = Stage::Extracting.as_str(), symbol = %payload.requested);
    let (symbol, series) = extract(&payload)?;

    tracing::debug!(
        stage = Stage::Computing.as_str(),
        symbol = %symbol,
        points = series.len()
    );
    let (stats, prediction) = compute(&series)?;

    let report = project(symbol, series, &stats, prediction);
    tracing::info!(
        stage = Stage::Ready.as_str(),
        symbol = %report.symbol,
        points = report.series.len(),
        average_close = report.summary.average_close,
        "Query ready"
    );
    Ok(report)
}
