//! Email delivery trait and error types.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::notification::EmailNotification;

/// Errors that can occur while handing a message to the delivery provider.
#[derive(Debug, Error)]
pub enum EmailError {
    #[error("email provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("email provider rejected the message ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Result type for email delivery.
pub type EmailResult<T> = Result<T, EmailError>;

/// Capability to transmit a rendered notification.
///
/// # Implementations
///
/// - [`crate::infrastructure::email::ResendClient`] - Resend HTTP API
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Sends `notification` using `api_key` for provider authentication.
    ///
    /// # Returns
    ///
    /// The provider's message identifier, when it reports one.
    ///
    /// # Errors
    ///
    /// Returns [`EmailError`] if the provider cannot be reached or refuses the message.
    async fn send(&self, api_key: &str, notification: &EmailNotification)
    -> EmailResult<Option<String>>;
}
