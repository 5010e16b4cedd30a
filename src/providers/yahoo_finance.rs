use crate::core::quote::{ProviderError, Quote};
use serde::Deserialize;
use tracing::{debug, instrument};

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// The chart API rejects requests without a browser-like agent.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0";

/// Chart API client used by the market data proxy. Tickers are passed
/// through verbatim in Yahoo syntax (`^GSPC`, `USDINR=X`).
pub struct YahooChartClient {
    base_url: String,
    client: reqwest::Client,
}

impl YahooChartClient {
    pub fn new(base_url: &str, client: reqwest::Client) -> Self {
        YahooChartClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// The ticker is a single escaped path segment, whatever it contains.
    fn chart_url(&self, ticker: &str) -> Result<reqwest::Url, ProviderError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| ProviderError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| ProviderError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", ticker]);
        Ok(url)
    }

    #[instrument(name = "YahooChartFetch", skip(self), fields(ticker = %ticker))]
    pub async fn fetch_quote(&self, ticker: &str) -> Result<Quote, ProviderError> {
        let url = self.chart_url(ticker)?;
        debug!("Requesting chart data from {}", url);

        let response = self
            .client
            .get(url)
            .query(&[("interval", "1d"), ("range", "1d")])
            .send()
            .await?;
        debug!(status = %response.status(), "Received Yahoo response");

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status()));
        }

        let text = response.text().await?;
        let data: ChartResponse = serde_json::from_str(&text)
            .map_err(|e| ProviderError::Malformed(format!("invalid chart JSON for {ticker}: {e}")))?;

        let meta = data
            .chart
            .result
            .and_then(|items| items.into_iter().next())
            .map(|item| item.meta)
            .ok_or_else(|| ProviderError::Malformed(format!("no chart data for {ticker}")))?;

        let price = meta
            .regular_market_price
            .filter(|p| p.is_finite())
            .ok_or_else(|| ProviderError::Malformed(format!("no market price for {ticker}")))?;

        // A zero close would turn the percent change into a non-finite value.
        let usable = |p: &f64| p.is_finite() && *p != 0.0;
        let previous_close = meta
            .previous_close
            .filter(usable)
            .or(meta.chart_previous_close.filter(usable))
            .ok_or_else(|| ProviderError::Malformed(format!("no previous close for {ticker}")))?;

        Ok(Quote::from_previous_close(ticker, price, previous_close))
    }
}

#[derive(Deserialize, Debug)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Deserialize, Debug)]
struct ChartResult {
    result: Option<Vec<ChartItem>>,
}

#[derive(Deserialize, Debug)]
struct ChartItem {
    meta: ChartMeta,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    regular_market_price: Option<f64>,
    previous_close: Option<f64>,
    chart_previous_close: Option<f64>,
}
