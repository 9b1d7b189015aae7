//! API key data models
//!
//! Structures for `/api-keys`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An API key as listed by the API (the token itself is never re-shown)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKeySummary {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Request body for `POST /api-keys`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateApiKeyRequest {
    pub name: String,
    /// full_access or sending_access
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,
    /// Restrict a sending_access key to one domain
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<String>,
}

/// Response body for `POST /api-keys`; `token` is shown exactly once
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateApiKeyResponse {
    pub id: String,
    pub token: String,
}
