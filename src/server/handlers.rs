//! Request handlers.

use std::sync::Arc;
use std::time::Duration;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::core::Quote;
use crate::core::cache::Cache;
use crate::providers::yahoo_finance::YahooChartClient;

/// How long an upstream chart answer is reused for the same ticker.
pub const UPSTREAM_CACHE_TTL: Duration = Duration::from_secs(300);

/// Application state.
pub struct AppState {
    /// Upstream chart API
    pub chart: YahooChartClient,
    /// Recent upstream answers keyed by ticker
    pub cache: Arc<dyn Cache<String, Quote>>,
    pub cache_ttl: Duration,
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check handler.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Error response.
#[derive(Serialize)]
pub struct ErrorResponse {
    error: String,
}

impl ErrorResponse {
    fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MarketDataQuery {
    /// Ticker in chart API syntax, e.g. `^NSEI`.
    pub symbol: Option<String>,
}

/// Proxies one ticker to the chart API and answers in the canonical quote
/// shape.
pub async fn market_data(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MarketDataQuery>,
) -> Response {
    let Some(symbol) = query.symbol.filter(|s| !s.trim().is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Symbol required")),
        )
            .into_response();
    };

    if let Some(quote) = state.cache.get(&symbol).await {
        debug!("Serving {} from proxy cache", symbol);
        return Json(quote).into_response();
    }

    match state.chart.fetch_quote(&symbol).await {
        Ok(quote) => {
            state
                .cache
                .put(symbol, quote.clone(), Some(state.cache_ttl))
                .await;
            Json(quote).into_response()
        }
        Err(e) => {
            error!("Market data API error for {}: {}", symbol, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to fetch market data")),
            )
                .into_response()
        }
    }
}
