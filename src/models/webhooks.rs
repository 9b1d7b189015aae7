//! Webhook API data models
//!
//! Structures for `/webhooks`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A webhook endpoint registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Webhook {
    pub id: String,
    /// URL the provider delivers events to
    pub endpoint: String,
    /// Event types the endpoint subscribes to
    #[serde(default)]
    pub events: Vec<String>,
    /// enabled or disabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Request body for `POST /webhooks`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWebhookRequest {
    pub endpoint: String,
    pub events: Vec<String>,
}

/// Response body for `POST /webhooks`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWebhookResponse {
    pub id: String,
    /// Secret for verifying delivery signatures; only returned on creation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signing_secret: Option<String>,
}

/// Request body for `PATCH /webhooks/:id`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateWebhookRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}
