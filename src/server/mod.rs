//! Market data proxy.
//!
//! Serves `GET /api/market-data?symbol=<ticker>` by forwarding to the chart
//! API, so clients that cannot call it directly still get quotes.

pub mod handlers;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::core::Quote;
use crate::core::cache::Cache;
use crate::core::config::AppConfig;
use crate::providers::util::http_client;
use crate::providers::yahoo_finance::{BROWSER_USER_AGENT, YahooChartClient};
use crate::store::MemoryCache;

pub use handlers::AppState;

/// The proxy server.
pub struct Server {
    addr: SocketAddr,
    state: Arc<AppState>,
}

impl Server {
    pub fn new(addr: SocketAddr, state: Arc<AppState>) -> Self {
        Self { addr, state }
    }

    pub fn from_config(config: &AppConfig, port: Option<u16>) -> Result<Self> {
        let host = config
            .server
            .host
            .parse()
            .with_context(|| format!("Invalid server host: {}", config.server.host))?;
        let addr = SocketAddr::new(host, port.unwrap_or(config.server.port));

        let client = http_client(BROWSER_USER_AGENT, config.request_timeout())
            .context("Failed to build HTTP client")?;
        let state = Arc::new(AppState {
            chart: YahooChartClient::new(config.yahoo_url(), client),
            cache: Arc::new(MemoryCache::new()),
            cache_ttl: handlers::UPSTREAM_CACHE_TTL,
        });
        Ok(Self::new(addr, state))
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Build the router.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        routes::create_router(self.state.clone())
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Start the server on the configured address.
    pub async fn start(&self) -> Result<()> {
        let listener = TcpListener::bind(self.addr)
            .await
            .with_context(|| format!("Failed to bind {}", self.addr))?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener.
    pub async fn serve(&self, listener: TcpListener) -> Result<()> {
        info!("Market data proxy listening on {}", listener.local_addr()?);
        let sweeper = spawn_cache_sweeper(self.state.cache.clone(), self.state.cache_ttl);
        let result = axum::serve(listener, self.router())
            .await
            .context("Server error");
        sweeper.abort();
        result
    }
}

/// Drops expired upstream answers every `period`, so tickers that are never
/// requested again do not stay in memory.
pub fn spawn_cache_sweeper(
    cache: Arc<dyn Cache<String, Quote>>,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period.max(Duration::from_millis(1)));
        loop {
            interval.tick().await;
            let evicted = cache.evict_stale().await;
            if evicted > 0 {
                debug!("Evicted {} stale proxy cache entries", evicted);
            }
        }
    })
}
