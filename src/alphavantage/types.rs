use serde::Deserialize;
use serde_json::{Map, Value};

use crate::model::query::Symbol;

/// Key under which the provider returns 5-minute intraday bars.
pub const SERIES_KEY: &str = "Time Series (5min)";
pub const META_DATA_KEY: &str = "Meta Data";
pub const META_SYMBOL_KEY: &str = "2. Symbol";

/// Free-text fields the provider uses to explain an empty answer.
pub const PROVIDER_MESSAGE_KEYS: [&str; 3] = ["Error Message", "Note", "Information"];

/// Deserialize a provider number that may arrive as a string or a JSON number.
/// `"NaN"` parses successfully and is left for the averaging step to reject.
pub fn string_or_number_to_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    match v {
        Value::String(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| serde::de::Error::custom("invalid number")),
        _ => Err(serde::de::Error::custom("expected a numeric string")),
    }
}

/// Lenient variant for fields nothing downstream depends on: a missing, null
/// or unparseable value becomes `None` instead of rejecting the entry.
pub fn lenient_string_or_number_to_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(match v {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    })
}

/// One entry of the intraday time-series object. Only high, low and close can
/// reject an entry.
#[derive(Debug, Deserialize)]
pub struct IntradayBar {
    #[serde(
        rename = "1. open",
        default,
        deserialize_with = "lenient_string_or_number_to_f64"
    )]
    pub open: Option<f64>,
    #[serde(rename = "2. high", deserialize_with = "string_or_number_to_f64")]
    pub high: f64,
    #[serde(rename = "3. low", deserialize_with = "string_or_number_to_f64")]
    pub low: f64,
    #[serde(rename = "4. close", deserialize_with = "string_or_number_to_f64")]
    pub close: f64,
    #[serde(
        rename = "5. volume",
        default,
        deserialize_with = "lenient_string_or_number_to_f64"
    )]
    pub volume: Option<f64>,
}

/// A 2xx response body that parsed as a JSON object, together with the symbol
/// it was requested for. Entry order of the object is preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPayload {
    pub requested: Symbol,
    pub body: Map<String, Value>,
}

impl RawPayload {
    pub fn new(requested: Symbol, body: Map<String, Value>) -> Self {
        Self { requested, body }
    }

    /// Symbol reported in the payload metadata, if present and non-blank.
    pub fn meta_symbol(&self) -> Option<Symbol> {
        self.body
            .get(META_DATA_KEY)
            .and_then(|meta| meta.get(META_SYMBOL_KEY))
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(Symbol::from)
    }

    pub fn provider_message(&self) -> Option<String> {
        PROVIDER_MESSAGE_KEYS
            .iter()
            .find_map(|key| self.body.get(*key))
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bar_accepts_string_and_numeric_fields() {
        let bar: IntradayBar = serde_json::from_value(json!({
            "1. open": "150.1000",
            "2. high": 151.5,
            "3. low": " 149.9 ",
            "4. close": "150.7500",
            "5. volume": "12000"
        }))
        .unwrap();
        assert!((bar.high - 151.5).abs() < f64::EPSILON);
        assert!((bar.low - 149.9).abs() < f64::EPSILON);
        assert_eq!(bar.open, Some(150.1));
        assert_eq!(bar.volume, Some(12_000.0));
    }

    #[test]
    fn bar_volume_is_optional() {
        let bar: IntradayBar = serde_json::from_value(json!({
            "1. open": "1", "2. high": "2", "3. low": "0.5", "4. close": "1.5"
        }))
        .unwrap();
        assert_eq!(bar.volume, None);
    }

    #[test]
    fn bar_tolerates_missing_open_and_odd_volume() {
        let bar: IntradayBar = serde_json::from_value(json!({
            "2. high": "2", "3. low": "0.5", "4. close": "1.5", "5. volume": "1200.5"
        }))
        .unwrap();
        assert_eq!(bar.open, None);
        assert_eq!(bar.volume, Some(1200.5));

        let bar: IntradayBar = serde_json::from_value(json!({
            "1. open": "-", "2. high": "2", "3. low": "0.5", "4. close": "1.5", "5. volume": "n/a"
        }))
        .unwrap();
        assert_eq!(bar.open, None);
        assert_eq!(bar.volume, None);
    }

    #[test]
    fn bar_rejects_unparseable_price() {
        let res: Result<IntradayBar, _> = serde_json::from_value(json!({
            "1. open": "1", "2. high": "n/a", "3. low": "0.5", "4. close": "1.5"
        }));
        assert!(res.is_err());
    }

    #[test]
    fn meta_symbol_ignores_blank_values() {
        let body = json!({ "Meta Data": { "2. Symbol": "  " } });
        let payload = RawPayload::new(
            Symbol::from("IBM"),
            body.as_object().cloned().unwrap_or_default(),
        );
        assert_eq!(payload.meta_symbol(), None);
    }
}
