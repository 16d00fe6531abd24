#![allow(dead_code)]

use async_trait::async_trait;
use registration_notifier::application::services::RegistrationService;
use registration_notifier::config::{DEFAULT_EMAIL_FROM, MailSettings};
use registration_notifier::domain::notification::EmailNotification;
use registration_notifier::domain::rate_limiter::RateLimiter;
use registration_notifier::infrastructure::email::{EmailError, EmailResult, EmailSender};
use registration_notifier::routes::api_router;
use registration_notifier::state::AppState;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

pub const TEST_API_KEY: &str = "re_test_key";
pub const TEST_ADMIN: &str = "admin@example.com";
pub const PROVIDER_SECRET: &str = "domain example.org is not verified";

/// In-memory sender that records every delivered notification.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<(String, EmailNotification)>>,
    fail: bool,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<(String, EmailNotification)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for RecordingMailer {
    async fn send(
        &self,
        api_key: &str,
        notification: &EmailNotification,
    ) -> EmailResult<Option<String>> {
        if self.fail {
            return Err(EmailError::Rejected {
                status: 403,
                message: PROVIDER_SECRET.to_string(),
            });
        }

        let mut sent = self.sent.lock().unwrap();
        sent.push((api_key.to_string(), notification.clone()));
        Ok(Some(format!("email-{}", sent.len())))
    }
}

pub fn configured_settings() -> MailSettings {
    MailSettings::new(
        Some(TEST_API_KEY.to_string()),
        Some(TEST_ADMIN.to_string()),
        DEFAULT_EMAIL_FROM,
    )
}

pub fn create_test_state(settings: MailSettings, mailer: Arc<RecordingMailer>) -> AppState {
    let service = RegistrationService::new(mailer, settings);
    AppState::new(Arc::new(service), Arc::new(RateLimiter::new()))
}

pub fn valid_payload() -> Value {
    json!({
        "fullName": "Jane Doe",
        "email": "jane@example.com",
        "phoneNumber": "5551234567",
        "countryCode": "+1"
    })
}

/// Serves the full router on an ephemeral local port.
pub async fn spawn_app(state: AppState) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, api_router(state)).await.unwrap();
    });

    addr
}
