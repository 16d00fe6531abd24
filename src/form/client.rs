//! Submission of a validated form to the registration endpoint.

use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::domain::registration::RegistrationSubmission;

/// How long a successful submission stays on screen before the form resets.
pub const RESET_DELAY: Duration = Duration::from_secs(3);

pub const SUCCESS_MESSAGE: &str = "Registration successful! Admin has been notified.";

/// Why a submission did not succeed, phrased for the person filling the form.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The request never got an HTTP answer.
    #[error("Network error. Please check your connection and try again.")]
    Network(#[source] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("{message}")]
    Rejected { status: u16, message: String },
}

/// Successful endpoint answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub email_id: Option<String>,
}

/// What the form shows below the submit button.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmitStatus {
    /// Nothing submitted yet, or the form was reset after a success.
    #[default]
    Idle,
    Success(String),
    Error(String),
}

impl SubmitStatus {
    pub fn from_outcome(outcome: &Result<SubmitReceipt, SubmitError>) -> Self {
        match outcome {
            Ok(_) => Self::Success(SUCCESS_MESSAGE.to_string()),
            Err(e) => Self::Error(e.to_string()),
        }
    }
}

/// Any JSON the endpoint may answer with.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EndpointReply {
    error: Option<String>,
    email_id: Option<String>,
}

impl EndpointReply {
    fn unreadable() -> Self {
        Self {
            error: Some("Invalid response from server".to_string()),
            email_id: None,
        }
    }
}

/// Posts registrations to the notification endpoint.
#[derive(Debug, Clone)]
pub struct RegistrationClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl RegistrationClient {
    /// `endpoint` is the full URL of `POST /api/send-email`.
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sends `submission` as JSON.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::Network`] if the endpoint could not be reached
    ///
    /// A response whose body cannot be read or decoded is treated as
    /// `{"error": "Invalid response from server"}`.
    /// - [`SubmitError::Rejected`] with a user-facing message for any non-2xx status
    pub async fn submit(
        &self,
        submission: &RegistrationSubmission,
    ) -> Result<SubmitReceipt, SubmitError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(submission)
            .send()
            .await
            .map_err(SubmitError::Network)?;

        let status = response.status();
        let reply = match response.bytes().await {
            Ok(body) => {
                serde_json::from_slice(&body).unwrap_or_else(|_| EndpointReply::unreadable())
            }
            Err(e) => {
                tracing::debug!(error = %e, "Failed to read registration response body");
                EndpointReply::unreadable()
            }
        };

        if !status.is_success() {
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
                message: rejection_message(status, reply.error),
            });
        }

        Ok(SubmitReceipt {
            email_id: reply.email_id,
        })
    }
}

/// Maps an error status to the message shown to the user.
fn rejection_message(status: StatusCode, server_error: Option<String>) -> String {
    match status {
        StatusCode::TOO_MANY_REQUESTS => {
            "Too many requests. Please wait a minute and try again.".to_string()
        }
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "Invalid request format. Please try again.".to_string(),
        StatusCode::BAD_REQUEST => "Invalid form data. Please check your information.".to_string(),
        StatusCode::INTERNAL_SERVER_ERROR => {
            server_error.unwrap_or_else(|| "Server error. Please try again later.".to_string())
        }
        _ => server_error.unwrap_or_else(|| "Registration failed. Please try again.".to_string()),
    }
}
