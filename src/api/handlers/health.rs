//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Mail**: API key and admin recipient are configured
/// 2. **Rate limiter**: Reports the number of tracked source keys
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "mail": { "status": "ok", "message": "Configured" },
///     "rate_limiter": { "status": "ok", "message": "Tracking 3 sources" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let mail_check = check_mail(&state);
    let limiter_check = check_rate_limiter(&state);

    let all_healthy = mail_check.is_ok() && limiter_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            mail: mail_check,
            rate_limiter: limiter_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Reports which mail settings are missing, if any.
fn check_mail(state: &AppState) -> CheckStatus {
    let missing = state.registration_service.settings().missing();

    if missing.is_empty() {
        CheckStatus::ok("Configured")
    } else {
        CheckStatus::error(format!("Missing: {}", missing.join(", ")))
    }
}

fn check_rate_limiter(state: &AppState) -> CheckStatus {
    CheckStatus::ok(format!(
        "Tracking {} sources",
        state.rate_limiter.tracked_sources()
    ))
}
