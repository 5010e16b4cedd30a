pub mod alpha_vantage;
pub mod proxy;
pub mod util;
pub mod yahoo_finance;

use crate::core::config::AppConfig;
use crate::core::{MarketQuoteService, QuoteProvider};
use crate::store::MemoryCache;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::debug;

/// Builds the quote service with providers in fallback order: Alpha Vantage
/// first, then the market data proxy.
pub fn quote_service(config: &AppConfig) -> Result<MarketQuoteService> {
    let client = util::http_client(util::USER_AGENT, config.request_timeout())
        .context("Failed to build HTTP client")?;

    let alpha = alpha_vantage::AlphaVantageProvider::new(
        config.alpha_vantage_url(),
        config.api_key(),
        client.clone(),
    );
    if !alpha.is_configured() {
        debug!("No Alpha Vantage key configured, quotes will come from the proxy");
    }
    let proxy = proxy::ProxyQuoteProvider::new(config.proxy_url(), client);

    let providers: Vec<Arc<dyn QuoteProvider>> = vec![Arc::new(alpha), Arc::new(proxy)];
    Ok(MarketQuoteService::with_ttl(
        providers,
        Arc::new(MemoryCache::new()),
        config.cache_ttl(),
    ))
}
