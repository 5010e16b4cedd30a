use super::util::parse_number;
use crate::core::quote::{ProviderError, Quote, QuoteProvider};
use crate::core::symbols;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co";

/// Value shipped in example configuration files in place of a real key.
const PLACEHOLDER_KEY: &str = "your_api_key_here";

/// Primary quote source, keyed by an API credential.
pub struct AlphaVantageProvider {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl AlphaVantageProvider {
    pub fn new(base_url: &str, api_key: Option<String>, client: reqwest::Client) -> Self {
        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty() && k != PLACEHOLDER_KEY);
        AlphaVantageProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[derive(Deserialize, Debug)]
struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    global_quote: Option<GlobalQuote>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

#[derive(Deserialize, Debug)]
struct GlobalQuote {
    #[serde(rename = "05. price")]
    price: Option<String>,
    #[serde(rename = "09. change")]
    change: Option<String>,
    #[serde(rename = "10. change percent")]
    change_percent: Option<String>,
}

fn required(field: Option<&String>, name: &str) -> Result<f64, ProviderError> {
    field
        .and_then(|raw| parse_number(raw))
        .ok_or_else(|| ProviderError::Malformed(format!("missing or invalid '{name}'")))
}

#[async_trait]
impl QuoteProvider for AlphaVantageProvider {
    fn name(&self) -> &'static str {
        "alpha_vantage"
    }

    #[instrument(name = "AlphaVantageFetch", skip(self), fields(symbol = %symbol))]
    async fn fetch_quote(&self, symbol: &str) -> Result<Quote, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::NotConfigured)?;
        let info =
            symbols::lookup(symbol).ok_or_else(|| ProviderError::UnknownSymbol(symbol.to_string()))?;

        let url = format!("{}/query", self.base_url);
        debug!("Requesting global quote for {} from {}", info.alpha_ticker, url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("function", "GLOBAL_QUOTE"),
                ("symbol", info.alpha_ticker),
                ("apikey", api_key),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status()));
        }

        let text = response.text().await?;
        let data: GlobalQuoteResponse = serde_json::from_str(&text)
            .map_err(|e| ProviderError::Malformed(format!("invalid JSON: {e}")))?;

        let Some(quote) = data.global_quote else {
            if let Some(message) = data.note.or(data.information) {
                return Err(ProviderError::RateLimited(message));
            }
            return Err(ProviderError::Malformed("missing 'Global Quote'".to_string()));
        };

        Ok(Quote::new(
            symbol,
            required(quote.price.as_ref(), "05. price")?,
            required(quote.change.as_ref(), "09. change")?,
            required(quote.change_percent.as_ref(), "10. change percent")?,
        ))
    }
}
