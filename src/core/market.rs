//! Cached, multi-provider quote retrieval.
//!
//! A symbol is served from the cache while its entry is younger than the TTL.
//! Otherwise each provider is tried in order and the first quote returned is
//! cached. Provider failures are logged and never reach the caller.

use super::cache::Cache;
use super::quote::{ProviderError, Quote, QuoteProvider};
use futures::future::join_all;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

pub const DEFAULT_QUOTE_TTL: Duration = Duration::from_secs(5 * 60);

pub struct MarketQuoteService {
    providers: Vec<Arc<dyn QuoteProvider>>,
    cache: Arc<dyn Cache<String, Quote>>,
    ttl: Duration,
}

impl MarketQuoteService {
    pub fn new(
        providers: Vec<Arc<dyn QuoteProvider>>,
        cache: Arc<dyn Cache<String, Quote>>,
    ) -> Self {
        Self::with_ttl(providers, cache, DEFAULT_QUOTE_TTL)
    }

    pub fn with_ttl(
        providers: Vec<Arc<dyn QuoteProvider>>,
        cache: Arc<dyn Cache<String, Quote>>,
        ttl: Duration,
    ) -> Self {
        Self {
            providers,
            cache,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns a quote for `symbol`, or `None` when no provider could supply
    /// one.
    #[instrument(name = "GetQuote", skip(self))]
    pub async fn get_quote(&self, symbol: &str) -> Option<Quote> {
        let key = symbol.to_string();
        if let Some(cached) = self.cache.get(&key).await {
            debug!("Serving {} from cache", symbol);
            return Some(cached);
        }

        for provider in &self.providers {
            debug!("Trying provider {}", provider.name());
            match provider.fetch_quote(symbol).await {
                Ok(quote) => {
                    debug!(price = quote.price, "Provider {} succeeded", provider.name());
                    self.cache.put(key, quote.clone(), Some(self.ttl)).await;
                    return Some(quote);
                }
                Err(ProviderError::NotConfigured) => {
                    debug!("Provider {} is not configured, skipping", provider.name());
                }
                Err(ProviderError::RateLimited(message)) => {
                    warn!("Provider {} is rate limited: {}", provider.name(), message);
                }
                Err(e) => {
                    debug!("Provider {} failed: {}", provider.name(), e);
                }
            }
        }

        debug!("No provider could resolve {}", symbol);
        None
    }

    /// Fetches all symbols concurrently. Symbols that could not be resolved
    /// are absent from the returned map.
    pub async fn get_quotes<S: AsRef<str>>(&self, symbols: &[S]) -> HashMap<String, Quote> {
        let mut seen = HashSet::new();
        let unique: Vec<&str> = symbols
            .iter()
            .map(AsRef::as_ref)
            .filter(|s| seen.insert(*s))
            .collect();

        let futures = unique.into_iter().map(|symbol| async move {
            self.get_quote(symbol)
                .await
                .map(|quote| (symbol.to_string(), quote))
        });

        join_all(futures).await.into_iter().flatten().collect()
    }
}
