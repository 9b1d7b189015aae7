//! Email API data models
//!
//! Structures for `/emails` and `/emails/batch`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Request body for `POST /emails` (and each entry of `POST /emails/batch`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendEmailRequest {
    /// Sender address, `Name <address@domain>` form accepted
    pub from: String,
    /// Recipient addresses
    pub to: Vec<String>,
    /// Subject line
    pub subject: String,
    /// HTML body (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    /// Plain-text body (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Carbon-copy recipients (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<Vec<String>>,
    /// Blind carbon-copy recipients (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcc: Option<Vec<String>>,
    /// Reply-to addresses (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<Vec<String>>,
    /// Delivery time, ISO 8601 or natural language (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<String>,
    /// Custom headers (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
    /// Tags attached to the email (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

/// Name/value tag attached to an email
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub value: String,
}

/// Response body for `POST /emails`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendEmailResponse {
    /// Identifier of the accepted email
    pub id: String,
}

/// Response body for `POST /emails/batch`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendBatchResponse {
    /// One entry per accepted email, in request order
    pub data: Vec<SendEmailResponse>,
}

/// A sent or scheduled email as returned by `GET /emails/:id`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Email {
    pub id: String,
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcc: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<Vec<String>>,
    /// Most recent delivery event (sent, delivered, bounced, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_event: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<String>,
}

/// Request body for `PATCH /emails/:id` (reschedule)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEmailRequest {
    /// New delivery time
    pub scheduled_at: String,
}

/// Response body for `PATCH /emails/:id` and `POST /emails/:id/cancel`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailIdResponse {
    pub id: String,
}

impl SendEmailRequest {
    /// Minimal request with the three required fields
    pub fn new(from: impl Into<String>, to: Vec<String>, subject: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to,
            subject: subject.into(),
            html: None,
            text: None,
            cc: None,
            bcc: None,
            reply_to: None,
            scheduled_at: None,
            headers: None,
            tags: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_request_omits_unset_fields() {
        let req = SendEmailRequest::new("me@example.com", vec!["you@example.com".into()], "hi");
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["from"], "me@example.com");
        assert_eq!(json["subject"], "hi");
        assert!(json.get("html").is_none());
        assert!(json.get("cc").is_none());
        assert!(json.get("scheduled_at").is_none());
    }

    #[test]
    fn test_email_deserializes_partial_payload() {
        let json = r#"{
            "id": "em_123",
            "from": "me@example.com",
            "to": ["you@example.com"],
            "subject": "hi",
            "last_event": "delivered",
            "created_at": "2026-05-01T10:30:00Z"
        }"#;
        let email: Email = serde_json::from_str(json).unwrap();
        assert_eq!(email.id, "em_123");
        assert_eq!(email.last_event.as_deref(), Some("delivered"));
        assert!(email.html.is_none());
    }
}
