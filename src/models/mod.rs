//! Data models module
//!
//! Defines request and response structures for every Relay API endpoint

use serde::{Deserialize, Serialize};

pub mod api_keys;
pub mod audiences;
pub mod broadcasts;
pub mod contacts;
pub mod domains;
pub mod emails;
pub mod webhooks;

/// Generic list envelope returned by every list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    /// Items in this page
    pub data: Vec<T>,
    /// Whether another page exists past the cursor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_more: Option<bool>,
}

/// Pagination parameters accepted by list endpoints.
///
/// Parameters the caller did not supply are omitted from the query string
/// entirely rather than sent as empty values.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    /// Maximum number of items to return
    pub limit: Option<u32>,
    /// Opaque cursor from a previous page
    pub cursor: Option<String>,
}

impl ListParams {
    pub fn new(limit: Option<u32>, cursor: Option<String>) -> Self {
        Self { limit, cursor }
    }

    /// Query pairs for the parameters that were actually supplied
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(cursor) = &self.cursor {
            query.push(("cursor", cursor.clone()));
        }
        query
    }
}

/// Response envelope for delete endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deleted {
    /// Identifier of the deleted resource
    pub id: String,
    /// Confirmation flag
    #[serde(default)]
    pub deleted: bool,
}
