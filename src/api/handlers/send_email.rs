//! Handler for the registration notification endpoint.

use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{HeaderMap, header},
};
use tracing::{debug, warn};

use crate::api::dto::registration::SendEmailResponse;
use crate::domain::rate_limiter::RateLimitDecision;
use crate::domain::registration::RegistrationSubmission;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::source_key_from_headers;

/// Emails the administrator about a new registration.
///
/// # Endpoint
///
/// `POST /api/send-email`
///
/// # Request Flow
///
/// 1. Configuration check (API key, admin recipient)
/// 2. `Content-Type` must be JSON
/// 3. Per-source rate limit
/// 4. Read, parse and validate the body
/// 5. Render and deliver the notification
///
/// Each step short-circuits with its own error response. The body is only
/// buffered after steps 1-3, so an oversized upload still gets the earlier
/// answers.
///
/// # Request Body
///
/// ```json
/// {
///   "fullName": "Jane Doe",
///   "email": "jane@example.com",
///   "phoneNumber": "5551234567",
///   "countryCode": "+1"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "message": "Registration email sent successfully",
///   "emailId": "4ef9a417-02e9-4d39-ad75-9611e0fcc33c"
/// }
/// ```
///
/// # Errors
///
/// - 500 if configuration is missing or delivery fails
/// - 415 if the body is not declared as JSON
/// - 429 if the source exceeded its limit
/// - 413 if the body exceeds the request size limit
/// - 400 if the body is malformed or fails validation
pub async fn send_email_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SendEmailResponse>, AppError> {
    state.registration_service.ensure_configured()?;

    if !is_json_content_type(&headers) {
        debug!("Rejected registration with non-JSON content type");
        return Err(AppError::UnsupportedMediaType);
    }

    let source = source_key_from_headers(&headers);
    if let RateLimitDecision::Denied {
        retry_after_seconds,
    } = state.rate_limiter.check(&source)
    {
        warn!(source = %source, retry_after_seconds, "Rate limit exceeded");
        return Err(AppError::too_many_requests(retry_after_seconds));
    }

    let body = body.map_err(|rejection| {
        debug!(error = %rejection, source = %source, "Failed to read registration body");
        AppError::from(rejection)
    })?;

    let submission = RegistrationSubmission::from_json_slice(&body).inspect_err(|e| {
        debug!(error = %e, source = %source, "Rejected registration payload");
    })?;

    let email_id = state.registration_service.notify(&submission).await?;

    Ok(Json(SendEmailResponse::sent(email_id)))
}

/// Answers every verb other than POST on the registration endpoint.
pub async fn method_not_allowed_handler() -> AppError {
    AppError::MethodNotAllowed
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.to_ascii_lowercase().contains("application/json"))
}
