//! Broadcast API data models
//!
//! Structures for `/broadcasts`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A broadcast (an email sent to a whole audience)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Broadcast {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Lifecycle status (draft, queued, sent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<String>,
}

/// Request body for `POST /broadcasts`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBroadcastRequest {
    pub audience_id: String,
    pub from: String,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<Vec<String>>,
}

/// Request body for `PATCH /broadcasts/:id`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBroadcastRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<Vec<String>>,
}

/// Request body for `POST /broadcasts/:id/send`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendBroadcastRequest {
    /// Delivery time; omitted means send immediately
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<String>,
}

/// Response body for broadcast create/update/send
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcastIdResponse {
    pub id: String,
}
