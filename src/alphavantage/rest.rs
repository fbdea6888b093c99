use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::config::ProviderConfig;
use crate::error::FetchError;
use crate::model::query::{Query, Symbol};

use super::types::RawPayload;

pub const INTRADAY_INTERVAL: &str = "5min";
pub const INTRADAY_FUNCTION: &str = "TIME_SERIES_INTRADAY";
pub const RESPONSE_DATATYPE: &str = "json";
pub const OUTPUT_SIZE: &str = "compact";

/// Fixed wait imposed after the provider answers with HTTP 429.
pub const RATE_LIMIT_COOLDOWN: Duration = Duration::from_secs(40);

const HTTP_TOO_MANY_REQUESTS: u16 = 429;

/// A fully built outbound GET. Exactly two headers identify the API key and host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRequest {
    pub url: Url,
    pub headers: [(String, String); 2],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

/// The request never produced a response (DNS, connect, TLS, timeout, ...).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, request: &ProviderRequest) -> Result<HttpReply, TransportError>;
}

pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build market data HTTP client")?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, request: &ProviderRequest) -> Result<HttpReply, TransportError> {
        let mut builder = self.http.get(request.url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let response = builder
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError(format!("failed to read response body: {}", e)))?;
        Ok(HttpReply { status, body })
    }
}

pub struct MarketDataClient<T> {
    transport: T,
    base_url: Url,
    headers: [(String, String); 2],
}

impl MarketDataClient<ReqwestTransport> {
    pub fn from_config(provider: &ProviderConfig) -> Result<Self> {
        let transport =
            ReqwestTransport::new(Duration::from_millis(provider.request_timeout_ms))?;
        Self::new(transport, provider)
    }
}

impl<T: Transport> MarketDataClient<T> {
    pub fn new(transport: T, provider: &ProviderConfig) -> Result<Self> {
        let base_url = Url::parse(&provider.base_url)
            .with_context(|| format!("invalid provider base URL '{}'", provider.base_url))?;
        Ok(Self {
            transport,
            base_url,
            headers: provider.auth_headers(),
        })
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn build_request(&self, symbol: &Symbol) -> ProviderRequest {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("interval", INTRADAY_INTERVAL)
            .append_pair("function", INTRADAY_FUNCTION)
            .append_pair("symbol", symbol.as_str())
            .append_pair("datatype", RESPONSE_DATATYPE)
            .append_pair("output_size", OUTPUT_SIZE);
        ProviderRequest {
            url,
            headers: self.headers.clone(),
        }
    }

    /// Issues at most one request. Blank input fails before anything is sent;
    /// unknown symbols are still sent and judged by the response.
    pub async fn fetch_series(&self, query: &Query) -> Result<RawPayload, FetchError> {
        let symbol = query.symbol()?;
        let request = self.build_request(&symbol);

        tracing::info!(symbol = %symbol, url = %request.url, "Requesting intraday series");

        let reply = self.transport.get(&request).await.map_err(|e| {
            tracing::warn!(symbol = %symbol, error = %e, "Intraday request failed in transport");
            FetchError::NetworkError(e.0)
        })?;

        classify_reply(symbol, reply)
    }
}

pub fn classify_reply(symbol: Symbol, reply: HttpReply) -> Result<RawPayload, FetchError> {
    if reply.status == HTTP_TOO_MANY_REQUESTS {
        tracing::warn!(
            symbol = %symbol,
            cooldown_secs = RATE_LIMIT_COOLDOWN.as_secs(),
            "Provider rate limit hit"
        );
        return Err(FetchError::RateLimited {
            cooldown: RATE_LIMIT_COOLDOWN,
        });
    }
    if !(200..300).contains(&reply.status) {
        tracing::warn!(
            symbol = %symbol,
            status = reply.status,
            detail = %compact_body(&reply.body),
            "Intraday request returned non-success"
        );
        return Err(FetchError::HttpError(reply.status));
    }

    match serde_json::from_str::<Value>(&reply.body) {
        Ok(Value::Object(body)) => {
            tracing::debug!(symbol = %symbol, fields = body.len(), "Intraday payload received");
            Ok(RawPayload::new(symbol, body))
        }
        Ok(other) => Err(FetchError::MalformedPayload(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(FetchError::MalformedPayload(e.to_string())),
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn compact_body(body: &str) -> String {
    let normalized = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.chars().count() > 180 {
        let head: String = normalized.chars().take(180).collect();
        format!("{}...", head)
    } else {
        normalized
    }
}
