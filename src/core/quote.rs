//! Quote types and the provider abstraction

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A point-in-time price for one symbol. This is also the wire shape served by
/// the market data proxy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl Quote {
    pub fn new(symbol: impl Into<String>, price: f64, change: f64, change_percent: f64) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            change,
            change_percent,
            timestamp: Utc::now(),
        }
    }

    /// Derives the absolute and percent change from the previous close.
    pub fn from_previous_close(symbol: impl Into<String>, price: f64, previous_close: f64) -> Self {
        let change = price - previous_close;
        Self::new(symbol, price, change, change / previous_close * 100.0)
    }
}

/// Why a provider could not produce a quote. These never leave the quote
/// service; they only drive logging.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider is not configured")]
    NotConfigured,
    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),
    #[error("rate limited: {0}")]
    RateLimited(String),
    #[error("HTTP error: {0}")]
    Status(reqwest::StatusCode),
    #[error("request error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),
}

#[async_trait]
pub trait QuoteProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fetches a quote for an internal symbol code.
    async fn fetch_quote(&self, symbol: &str) -> Result<Quote, ProviderError>;
}
