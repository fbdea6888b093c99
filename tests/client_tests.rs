use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use intraday_forecast::alphavantage::rest::{
    HttpReply, MarketDataClient, ProviderRequest, Transport, TransportError,
};
use intraday_forecast::config::ProviderConfig;
use intraday_forecast::error::FetchError;
use intraday_forecast::model::query::Query;

#[derive(Default)]
struct RecordingTransport {
    replies: Mutex<VecDeque<Result<HttpReply, TransportError>>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl RecordingTransport {
    fn replying(reply: Result<HttpReply, TransportError>) -> Self {
        let t = Self::default();
        t.replies.lock().unwrap().push_back(reply);
        t
    }

    fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn get(&self, request: &ProviderRequest) -> Result<HttpReply, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no reply queued".to_string())))
    }
}

fn provider() -> ProviderConfig {
    ProviderConfig {
        base_url: "https://alpha-vantage.p.rapidapi.com/query".to_string(),
        host: "alpha-vantage.p.rapidapi.com".to_string(),
        key_header: "X-RapidAPI-Key".to_string(),
        host_header: "X-RapidAPI-Host".to_string(),
        request_timeout_ms: 1_000,
        api_key: "test-key".to_string(),
    }
}

fn ok(body: &str) -> Result<HttpReply, TransportError> {
    Ok(HttpReply {
        status: 200,
        body: body.to_string(),
    })
}

#[test]
/// Blank input is rejected before the transport is touched.
fn blank_input_issues_no_request() {
    let client = MarketDataClient::new(RecordingTransport::default(), &provider()).unwrap();

    for input in ["", "   ", "\t\n"] {
        let out = tokio_test::block_on(client.fetch_series(&Query::new(input)));
        assert_eq!(out, Err(FetchError::InvalidInput));
    }
    assert!(client.transport().requests().is_empty());
}

#[test]
/// Exactly one GET per call, built from the fixed intraday template with the
/// derived symbol, carrying exactly the two configured headers.
fn request_uses_fixed_template_and_two_headers() {
    let client =
        MarketDataClient::new(RecordingTransport::replying(ok("{}")), &provider()).unwrap();

    let out = tokio_test::block_on(client.fetch_series(&Query::new("aapl | Apple Stocks ")));
    assert!(out.is_ok());

    let requests = client.transport().requests();
    assert_eq!(requests.len(), 1);
    let req = &requests[0];

    assert_eq!(req.url.host_str(), Some("alpha-vantage.p.rapidapi.com"));
    assert_eq!(req.url.path(), "/query");
    let params: Vec<(String, String)> = req.url.query_pairs().into_owned().collect();
    assert_eq!(
        params,
        vec![
            ("interval".to_string(), "5min".to_string()),
            ("function".to_string(), "TIME_SERIES_INTRADAY".to_string()),
            ("symbol".to_string(), "AAPL".to_string()),
            ("datatype".to_string(), "json".to_string()),
            ("output_size".to_string(), "compact".to_string()),
        ]
    );

    assert_eq!(req.headers.len(), 2);
    assert_eq!(
        req.headers[0],
        ("X-RapidAPI-Key".to_string(), "test-key".to_string())
    );
    assert_eq!(
        req.headers[1],
        (
            "X-RapidAPI-Host".to_string(),
            "alpha-vantage.p.rapidapi.com".to_string()
        )
    );
}

#[test]
fn unknown_symbols_are_still_sent() {
    let client =
        MarketDataClient::new(RecordingTransport::replying(ok("{}")), &provider()).unwrap();
    let payload = tokio_test::block_on(client.fetch_series(&Query::new("ZZZZINVALID"))).unwrap();

    assert_eq!(payload.requested.as_str(), "ZZZZINVALID");
    assert_eq!(client.transport().requests().len(), 1);
}

#[test]
fn transport_failure_is_network_error() {
    let transport =
        RecordingTransport::replying(Err(TransportError("connection refused".to_string())));
    let client = MarketDataClient::new(transport, &provider()).unwrap();

    let out = tokio_test::block_on(client.fetch_series(&Query::new("AAPL")));
    assert_eq!(
        out,
        Err(FetchError::NetworkError("connection refused".to_string()))
    );
}

#[test]
fn status_classification() {
    let cases = [
        (429, "{}", FetchError::RateLimited { cooldown: Duration::from_secs(40) }),
        (500, "{}", FetchError::HttpError(500)),
        (404, "not found", FetchError::HttpError(404)),
    ];
    for (status, body, expected) in cases {
        let transport = RecordingTransport::replying(Ok(HttpReply {
            status,
            body: body.to_string(),
        }));
        let client = MarketDataClient::new(transport, &provider()).unwrap();
        let out = tokio_test::block_on(client.fetch_series(&Query::new("AAPL")));
        assert_eq!(out, Err(expected));
        assert_eq!(client.transport().requests().len(), 1, "no automatic retry");
    }
}

#[test]
fn unparseable_success_body_is_malformed() {
    let client = MarketDataClient::new(
        RecordingTransport::replying(ok("<html>maintenance</html>")),
        &provider(),
    )
    .unwrap();
    let out = tokio_test::block_on(client.fetch_series(&Query::new("AAPL")));
    assert!(matches!(out, Err(FetchError::MalformedPayload(_))));
}

#[test]
fn invalid_base_url_is_rejected_at_construction() {
    let mut p = provider();
    p.base_url = "::not a url::".to_string();
    assert!(MarketDataClient::new(RecordingTransport::default(), &p).is_err());
}
