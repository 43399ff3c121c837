//! Router configuration for the web server.

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::cors::CorsLayer;

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::metadata).post(handlers::annotate))
        .route("/health", get(handlers::health))
        // `annotate` enforces `AppState::max_body_bytes` itself.
        .layer(DefaultBodyLimit::disable())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
