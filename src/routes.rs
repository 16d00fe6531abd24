//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /api/send-email` - Registration notification (any other verb: 405)
//! - `GET  /health`         - Health check: mail configuration, rate limiter
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the routes with state and tracing applied.
///
/// Used directly by tests; [`app_router`] adds path normalization on top.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api::routes::public_routes())
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(api_router(state))
}
