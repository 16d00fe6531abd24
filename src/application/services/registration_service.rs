//! Registration notification service.

use chrono::Utc;
use std::sync::Arc;

use crate::config::MailSettings;
use crate::domain::notification::EmailNotification;
use crate::domain::registration::RegistrationSubmission;
use crate::error::AppError;
use crate::infrastructure::email::EmailSender;

/// Renders a registration into an email and hands it to the delivery provider.
pub struct RegistrationService {
    sender: Arc<dyn EmailSender>,
    settings: MailSettings,
}

impl RegistrationService {
    /// Creates a new registration service.
    ///
    /// # Arguments
    ///
    /// - `sender` - delivery capability used for every notification
    /// - `settings` - API key, admin recipient and sender address
    pub fn new(sender: Arc<dyn EmailSender>, settings: MailSettings) -> Self {
        Self { sender, settings }
    }

    pub fn settings(&self) -> &MailSettings {
        &self.settings
    }

    /// Checks that every setting needed for delivery is present.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Configuration`] if the API key or admin address is missing.
    pub fn ensure_configured(&self) -> Result<(), AppError> {
        self.settings.resolve().map(|_| ())
    }

    /// Notifies the administrator about `submission`.
    ///
    /// # Returns
    ///
    /// The provider's message identifier, if it reported one.
    ///
    /// # Errors
    ///
    /// - [`AppError::Configuration`] if a required setting is missing
    /// - [`AppError::Delivery`] if rendering fails or the provider rejects the message
    pub async fn notify(
        &self,
        submission: &RegistrationSubmission,
    ) -> Result<Option<String>, AppError> {
        let mail = self.settings.resolve()?;

        let notification = EmailNotification::for_registration(
            submission,
            mail.from_address,
            mail.admin_email,
            Utc::now(),
        )
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to render registration email");
            AppError::delivery(e.to_string())
        })?;

        match self.sender.send(mail.api_key, &notification).await {
            Ok(email_id) => {
                tracing::info!(email_id = ?email_id, "Registration email sent successfully");
                Ok(email_id)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error sending registration email");
                Err(AppError::delivery(e.to_string()))
            }
        }
    }
}
