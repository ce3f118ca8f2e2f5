//! HTTP API route definitions.

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::handlers::{health, hello, AppState};

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/hello", get(hello))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
