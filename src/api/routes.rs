//! API route configuration.

use crate::api::handlers::{method_not_allowed_handler, send_email_handler};
use crate::state::AppState;
use axum::{Router, routing::post};

/// Public API routes.
///
/// # Endpoints
///
/// - `POST /send-email` - Notify the administrator about a registration;
///   every other verb answers `405`
pub fn public_routes() -> Router<AppState> {
    Router::new().route(
        "/send-email",
        post(send_email_handler).fallback(method_not_allowed_handler),
    )
}
