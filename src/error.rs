use std::time::Duration;

use thiserror::Error;

/// Outcome of a single provider request that did not yield a usable payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("invalid input: a stock symbol or company name is required")]
    InvalidInput,

    #[error("network error: {0}")]
    NetworkError(String),

    #[error("rate limited by provider (retry in {}s)", .cooldown.as_secs())]
    RateLimited { cooldown: Duration },

    #[error("HTTP error: status {0}")]
    HttpError(u16),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("symbol not found: {symbol}")]
    SymbolNotFound {
        symbol: String,
        detail: Option<String>,
    },

    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputeError {
    #[error("insufficient data for calculation")]
    InsufficientData,

    #[error("invalid average prices calculated")]
    InvalidAverage,
}

/// Every way a query attempt can end without a result. All of them are
/// terminal for the attempt and none of them is fatal to the process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("invalid input: a stock symbol or company name is required")]
    InvalidInput,

    #[error("network error: {0}")]
    NetworkError(String),

    #[error("rate limited by provider (retry in {}s)", .cooldown.as_secs())]
    RateLimited { cooldown: Duration },

    #[error("HTTP error: status {0}")]
    HttpError(u16),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound {
        symbol: String,
        detail: Option<String>,
    },

    #[error("insufficient data for calculation")]
    InsufficientData,

    #[error("invalid average prices calculated")]
    InvalidAverage,
}

impl QueryError {
    pub fn title(&self) -> &'static str {
        match self {
            Self::InvalidInput => "Invalid Input",
            Self::NetworkError(_) => "Network Error",
            Self::RateLimited { .. } => "Woah, Slow Down!",
            Self::HttpError(_) => "Request Failed",
            Self::MalformedPayload(_) => "Unexpected Response",
            Self::SymbolNotFound { .. } => "Stock Not Found",
            Self::InsufficientData => "Insufficient Data",
            Self::InvalidAverage => "Invalid Averages",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::InvalidInput => {
                "You need to type in a stock symbol or company name.".to_string()
            }
            Self::NetworkError(_) => {
                "Network error. Please check your internet connection and try again.".to_string()
            }
            Self::RateLimited { cooldown } => format!(
                "Too many requests. Search unlocks again in {} seconds.",
                cooldown.as_secs()
            ),
            Self::HttpError(status) => {
                format!("The market data service answered with HTTP status {}.", status)
            }
            Self::MalformedPayload(_) => {
                "The market data service returned data that could not be read.".to_string()
            }
            Self::SymbolNotFound { symbol, .. } => {
                format!("No stock named '{}' was found. Try another symbol.", symbol)
            }
            Self::InsufficientData => {
                "Not enough price data was returned to calculate averages.".to_string()
            }
            Self::InvalidAverage => {
                "The returned prices did not produce valid averages.".to_string()
            }
        }
    }

    /// Cooldown the UI must honor before accepting another query.
    pub fn cooldown(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { cooldown } => Some(*cooldown),
            _ => None,
        }
    }
}

impl From<FetchError> for QueryError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::InvalidInput => Self::InvalidInput,
            FetchError::NetworkError(msg) => Self::NetworkError(msg),
            FetchError::RateLimited { cooldown } => Self::RateLimited { cooldown },
            FetchError::HttpError(status) => Self::HttpError(status),
            FetchError::MalformedPayload(msg) => Self::MalformedPayload(msg),
        }
    }
}

impl From<ExtractError> for QueryError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::SymbolNotFound { symbol, detail } => {
                Self::SymbolNotFound { symbol, detail }
            }
            ExtractError::MalformedPayload(msg) => Self::MalformedPayload(msg),
        }
    }
}

impl From<ComputeError> for QueryError {
    fn from(err: ComputeError) -> Self {
        match err {
            ComputeError::InsufficientData => Self::InsufficientData,
            ComputeError::InvalidAverage => Self::InvalidAverage,
        }
    }
}
