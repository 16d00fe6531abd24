//! DTOs for the registration notification endpoint.

use serde::Serialize;
use serde_with::skip_serializing_none;

/// Success body for `POST /api/send-email`.
#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailResponse {
    pub success: bool,
    pub message: String,
    /// Provider message id; omitted when the provider did not return one.
    pub email_id: Option<String>,
}

impl SendEmailResponse {
    pub fn sent(email_id: Option<String>) -> Self {
        Self {
            success: true,
            message: "Registration email sent successfully".to_string(),
            email_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sent_serializes_camel_case() {
        let value = serde_json::to_value(SendEmailResponse::sent(Some("abc".into()))).unwrap();

        assert_eq!(
            value,
            json!({
                "success": true,
                "message": "Registration email sent successfully",
                "emailId": "abc"
            })
        );
    }

    #[test]
    fn test_sent_without_id() {
        let value = serde_json::to_value(SendEmailResponse::sent(None)).unwrap();
        assert!(value.get("emailId").is_none());
    }
}
