//! Administrator notification rendered from a registration.

use askama::Template;
use chrono::{DateTime, Utc};

use crate::domain::registration::RegistrationSubmission;
use crate::utils::html::escape_html;

/// Timestamp layout used in the notification body, en-US style in UTC.
const TIMESTAMP_FORMAT: &str = "%A, %B %-d, %Y at %-I:%M:%S %p UTC";

/// A ready-to-send email describing one new registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailNotification {
    pub from: String,
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub html: String,
}

/// HTML body of the notification.
///
/// Fields are escaped by [`escape_html`] before they reach the template,
/// which is why the template itself performs no escaping.
#[derive(Template)]
#[template(path = "notification.html", escape = "none")]
struct NotificationTemplate {
    full_name: String,
    email: String,
    phone_number: String,
    country_code: String,
    registered_at: String,
}

impl EmailNotification {
    /// Builds the notification for `submission`.
    ///
    /// `reply_to` is the submitter's address so the administrator can answer
    /// directly from their mail client.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn for_registration(
        submission: &RegistrationSubmission,
        from: &str,
        to: &str,
        registered_at: DateTime<Utc>,
    ) -> Result<Self, askama::Error> {
        Ok(Self {
            from: from.to_string(),
            to: to.to_string(),
            reply_to: submission.email.clone(),
            subject: format!("New Registration: {}", submission.full_name),
            html: render_notification(submission, registered_at)?,
        })
    }
}

/// Renders the self-contained HTML document for `submission`.
pub fn render_notification(
    submission: &RegistrationSubmission,
    registered_at: DateTime<Utc>,
) -> Result<String, askama::Error> {
    let template = NotificationTemplate {
        full_name: escape_html(&submission.full_name),
        email: escape_html(&submission.email),
        phone_number: escape_html(&submission.phone_number),
        country_code: escape_html(&submission.country_code),
        registered_at: format_timestamp(registered_at),
    };

    template.render().map(|html| html.trim().to_string())
}

/// Formats `at` as e.g. `Sunday, October 18, 2026 at 3:04:05 PM UTC`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}
