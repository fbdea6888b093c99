use serde::Deserialize;
use serde_json::Value;

use crate::error::ExtractError;
use crate::model::query::Symbol;
use crate::model::series::{IntradayPoint, Series};

use super::types::{IntradayBar, RawPayload, SERIES_KEY};

/// Pull the 5-minute series out of a payload.
///
/// A payload without the series key, or with a null one, is the provider's
/// way of saying the symbol does not exist. Any entry whose high, low or close
/// fails to parse rejects the whole series. Points are returned newest-first,
/// as received.
pub fn extract(payload: &RawPayload) -> Result<(Symbol, Series), ExtractError> {
    let Some(series_value) = payload.body.get(SERIES_KEY).filter(|v| !v.is_null()) else {
        let detail = payload.provider_message();
        tracing::info!(
            symbol = %payload.requested,
            detail = detail.as_deref().unwrap_or(""),
            "Payload has no intraday series"
        );
        return Err(ExtractError::SymbolNotFound {
            symbol: payload.requested.to_string(),
            detail,
        });
    };

    let entries = series_value.as_object().ok_or_else(|| {
        ExtractError::MalformedPayload(format!("'{}' is not an object", SERIES_KEY))
    })?;

    let mut points = Vec::with_capacity(entries.len());
    for (timestamp, value) in entries {
        points.push(parse_point(timestamp, value)?);
    }

    let symbol = payload
        .meta_symbol()
        .unwrap_or_else(|| payload.requested.clone());

    tracing::debug!(symbol = %symbol, points = points.len(), "Extracted intraday series");
    Ok((symbol, Series::reverse_chronological(points)))
}

fn parse_point(timestamp: &str, value: &Value) -> Result<IntradayPoint, ExtractError> {
    let bar = IntradayBar::deserialize(value).map_err(|e| {
        ExtractError::MalformedPayload(format!("entry '{}': {}", timestamp, e))
    })?;
    Ok(IntradayPoint {
        timestamp: timestamp.to_string(),
        open: bar.open,
        high: bar.high,
        low: bar.low,
        close: bar.close,
        volume: bar.volume,
    })
}
