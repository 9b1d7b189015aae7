//! Domain API data models
//!
//! Structures for `/domains`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A sending domain as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Domain {
    pub id: String,
    pub name: String,
    /// Verification status (not_started, pending, verified, failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Region the domain sends from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// DNS records required for verification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<Vec<DnsRecord>>,
}

/// One DNS record the domain owner must publish
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Record purpose (SPF, DKIM, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
}

/// Request body for `POST /domains`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDomainRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// Request body for `PATCH /domains/:id`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDomainRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub click_tracking: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_tracking: Option<bool>,
    /// TLS enforcement mode (enforced or opportunistic)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<String>,
}

/// Response body for `POST /domains/:id/verify`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyDomainResponse {
    pub id: String,
}
