use std::fmt;

use crate::error::FetchError;

/// Free-text search as typed by the user, e.g. `"AAPL | Apple Stocks"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    raw_input: String,
}

/// Ticker derived from a query: first whitespace-delimited token, uppercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol(String);

impl Query {
    pub fn new(raw_input: impl Into<String>) -> Self {
        Self {
            raw_input: raw_input.into(),
        }
    }

    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    /// Only the first token is significant; anything after it (such as the
    /// `| Company Name` suffix of an autocomplete entry) is ignored.
    pub fn symbol(&self) -> Result<Symbol, FetchError> {
        self.raw_input
            .split_whitespace()
            .next()
            .map(|token| Symbol(token.to_ascii_uppercase()))
            .ok_or(FetchError::InvalidInput)
    }
}

impl Symbol {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol(s.trim().to_ascii_uppercase())
    }
}
