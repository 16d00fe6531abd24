//! [Resend](https://resend.com) transactional email client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::service::{EmailError, EmailResult, EmailSender};
use crate::domain::notification::EmailNotification;

/// Public Resend API base URL.
pub const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com";

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    reply_to: &'a str,
    subject: &'a str,
    html: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResendErrorBody {
    message: Option<String>,
}

/// Sends notifications through `POST {base}/emails`.
#[derive(Debug, Clone)]
pub struct ResendClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl ResendClient {
    /// Creates a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid absolute URL.
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            http: reqwest::Client::new(),
            endpoint: base.join("emails")?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl EmailSender for ResendClient {
    async fn send(
        &self,
        api_key: &str,
        notification: &EmailNotification,
    ) -> EmailResult<Option<String>> {
        let request = SendEmailRequest {
            from: &notification.from,
            to: [&notification.to],
            reply_to: &notification.reply_to,
            subject: &notification.subject,
            html: &notification.html,
        };

        let response = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ResendErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or(body);

            return Err(EmailError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let sent: SendEmailResponse = response.json().await?;
        debug!(email_id = ?sent.id, "Resend accepted message");

        Ok(sent.id)
    }
}
