//! Audience API data models
//!
//! Structures for `/audiences`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A contact list as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Audience {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Request body for `POST /audiences`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAudienceRequest {
    pub name: String,
}
