//! HTTP-facing error type for the registration endpoint.
//!
//! Every variant maps to exactly one status code and a JSON body of the form
//! `{"error": "...", "message": "..."}`, where `message` is optional.

use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_with::skip_serializing_none;
use thiserror::Error;

use crate::domain::registration::SubmissionError;

/// Generic text returned when the email provider fails, so provider details
/// never reach the caller.
pub const DELIVERY_FAILURE_MESSAGE: &str =
    "An error occurred while processing your registration. Please try again later.";

#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: Option<String>,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// A required setting is absent. Fatal for the request.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    #[error("unsupported content type")]
    UnsupportedMediaType,

    #[error("invalid registration data")]
    InvalidRegistration { message: Option<String> },

    #[error("request body too large")]
    PayloadTooLarge,

    #[error("rate limit exceeded, retry in {retry_after_seconds}s")]
    TooManyRequests { retry_after_seconds: u64 },

    /// The email provider failed. `details` is for server logs only.
    #[error("email delivery failed: {details}")]
    Delivery { details: String },

    #[error("method not allowed")]
    MethodNotAllowed,
}

impl AppError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
    pub fn invalid_registration() -> Self {
        Self::InvalidRegistration { message: None }
    }
    pub fn too_many_requests(retry_after_seconds: u64) -> Self {
        Self::TooManyRequests {
            retry_after_seconds,
        }
    }
    pub fn delivery(details: impl Into<String>) -> Self {
        Self::Delivery {
            details: details.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Configuration { .. } | AppError::Delivery { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::InvalidRegistration { .. } => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::TooManyRequests { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl From<SubmissionError> for AppError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::MalformedJson(_) => AppError::InvalidRegistration {
                message: Some("Request body is not valid JSON".to_string()),
            },
            SubmissionError::Shape(_) | SubmissionError::InvalidFields(_) => {
                AppError::invalid_registration()
            }
        }
    }
}

impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::InvalidRegistration {
                message: Some("Request body could not be read".to_string()),
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (error, message) = match &self {
            AppError::Configuration { message } => (message.clone(), None),
            AppError::UnsupportedMediaType => {
                ("Content-Type must be application/json".to_string(), None)
            }
            AppError::InvalidRegistration { message } => {
                ("Invalid registration data".to_string(), message.clone())
            }
            AppError::PayloadTooLarge => ("Request body is too large".to_string(), None),
            AppError::TooManyRequests {
                retry_after_seconds,
            } => (
                "Too many requests".to_string(),
                Some(format!(
                    "Please wait {retry_after_seconds} seconds before trying again."
                )),
            ),
            AppError::Delivery { .. } => (
                "Failed to send email".to_string(),
                Some(DELIVERY_FAILURE_MESSAGE.to_string()),
            ),
            AppError::MethodNotAllowed => (
                "Method not allowed. Use POST to send registration emails.".to_string(),
                None,
            ),
        };

        let mut response = (status, Json(ErrorBody { error, message })).into_response();

        if let AppError::TooManyRequests {
            retry_after_seconds,
        } = self
        {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(retry_after_seconds));
        }

        response
    }
}
