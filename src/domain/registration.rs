//! Registration submission model and its structured parse/validate step.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use validator::{Validate, ValidationError};

/// Non-secret registration fields forwarded to the administrator.
///
/// Passwords never appear here: the form client strips them before sending,
/// and unknown JSON fields are ignored on the way in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationSubmission {
    #[validate(custom(function = "not_blank"))]
    pub full_name: String,

    #[validate(contains(pattern = "@"))]
    pub email: String,

    #[validate(custom(function = "not_blank"))]
    pub phone_number: String,

    #[validate(custom(function = "not_blank"))]
    pub country_code: String,
}

/// Reasons a registration payload is rejected before any work is done.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("request body is not valid JSON")]
    MalformedJson(#[source] serde_json::Error),

    #[error("registration payload has the wrong shape")]
    Shape(#[source] serde_json::Error),

    #[error("registration fields failed validation: {}", .0.join(", "))]
    InvalidFields(Vec<String>),
}

impl RegistrationSubmission {
    /// Parses and validates a raw request body.
    ///
    /// # Errors
    ///
    /// - [`SubmissionError::MalformedJson`] if the body is not JSON at all
    /// - [`SubmissionError::Shape`] if a field is missing or not a string
    /// - [`SubmissionError::InvalidFields`] if a field is blank or the email lacks `@`
    pub fn from_json_slice(body: &[u8]) -> Result<Self, SubmissionError> {
        let value: Value = serde_json::from_slice(body).map_err(SubmissionError::MalformedJson)?;
        Self::from_value(value)
    }

    /// Narrows an untyped JSON value into a validated submission.
    pub fn from_value(value: Value) -> Result<Self, SubmissionError> {
        let submission: Self = serde_json::from_value(value).map_err(SubmissionError::Shape)?;

        if let Err(errors) = submission.validate() {
            let mut fields: Vec<String> = errors
                .field_errors()
                .keys()
                .map(|field| field.to_string())
                .collect();
            fields.sort();
            return Err(SubmissionError::InvalidFields(fields));
        }

        Ok(submission)
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
