//! Route definitions.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::server::handlers::{self, AppState};

/// Create the API router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/market-data", get(handlers::market_data))
        .with_state(state)
}
