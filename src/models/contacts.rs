//! Contact API data models
//!
//! Structures for `/audiences/:id/contacts`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A contact within an audience
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Whether the contact opted out of marketing sends
    #[serde(default)]
    pub unsubscribed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Request body for `POST /audiences/:id/contacts`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateContactRequest {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unsubscribed: Option<bool>,
}

/// Request body for `PATCH /audiences/:id/contacts/:id`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateContactRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unsubscribed: Option<bool>,
}

/// Response body for contact create/update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactIdResponse {
    pub id: String,
}

impl CreateContactRequest {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            first_name: None,
            last_name: None,
            unsubscribed: None,
        }
    }
}
