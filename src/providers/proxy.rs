use crate::core::quote::{ProviderError, Quote, QuoteProvider};
use crate::core::symbols;
use async_trait::async_trait;
use tracing::{debug, instrument};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3030";

/// Secondary quote source: the internal `/api/market-data` endpoint, which
/// forwards to the chart API and already answers in the canonical quote shape.
pub struct ProxyQuoteProvider {
    base_url: String,
    client: reqwest::Client,
}

impl ProxyQuoteProvider {
    pub fn new(base_url: &str, client: reqwest::Client) -> Self {
        ProxyQuoteProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }
}

#[async_trait]
impl QuoteProvider for ProxyQuoteProvider {
    fn name(&self) -> &'static str {
        "market_data_proxy"
    }

    #[instrument(name = "ProxyFetch", skip(self), fields(symbol = %symbol))]
    async fn fetch_quote(&self, symbol: &str) -> Result<Quote, ProviderError> {
        let info =
            symbols::lookup(symbol).ok_or_else(|| ProviderError::UnknownSymbol(symbol.to_string()))?;

        let url = format!("{}/api/market-data", self.base_url);
        debug!("Requesting {} from {}", info.yahoo_ticker, url);

        let response = self
            .client
            .get(&url)
            .query(&[("symbol", info.yahoo_ticker)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status()));
        }

        let text = response.text().await?;
        let quote: Quote = serde_json::from_str(&text)
            .map_err(|e| ProviderError::Malformed(format!("invalid quote payload: {e}")))?;

        if !quote.price.is_finite() || !quote.change.is_finite() || !quote.change_percent.is_finite()
        {
            return Err(ProviderError::Malformed("non-finite values".to_string()));
        }

        // The proxy answers with the provider ticker; callers key by code.
        Ok(Quote {
            symbol: symbol.to_string(),
            ..quote
        })
    }
}
