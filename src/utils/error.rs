//! Error handling module
//!
//! Defines the API error shape and the command-layer error types

use serde_json::{json, Value};
use thiserror::Error;

/// Uniform error raised for every non-success API outcome.
///
/// `status` is the literal HTTP status of the failing response and is absent
/// for failures that never produced a response (timeouts, connection errors).
/// `details` carries the provider's error body verbatim when it was valid
/// JSON, and is absent otherwise.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ApiError {
    /// Human-readable message, taken from the provider's error body when available
    pub message: String,
    /// HTTP status code of the failing response
    pub status: Option<u16>,
    /// Error response body, verbatim
    pub details: Option<Value>,
}

impl ApiError {
    /// Error for a completed HTTP response outside the success range
    pub fn http(status: u16, message: impl Into<String>, details: Option<Value>) -> Self {
        Self {
            message: message.into(),
            status: Some(status),
            details,
        }
    }

    /// Error for a connection-level failure that produced no response
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            details: None,
        }
    }

    /// Error for an attempt that exceeded the configured timeout
    pub fn timeout(timeout_ms: u64) -> Self {
        Self {
            message: format!("request timed out after {}ms", timeout_ms),
            status: None,
            details: Some(json!({ "timeout_ms": timeout_ms })),
        }
    }

    /// Whether the failure is eligible for the engine's retry budget.
    ///
    /// Retryable failures are 5xx responses and failures with no response at
    /// all. 4xx responses are client errors that retrying cannot fix, 429
    /// included: rate-limit backoff is left to the caller.
    pub fn is_retryable(&self) -> bool {
        match self.status {
            Some(status) => status >= 500,
            None => true,
        }
    }
}

/// Command-layer error type
///
/// Everything a subcommand can fail with funnels into this enum; `main`
/// renders it as a single stderr line (plus a status line when known) and
/// exits non-zero.
#[derive(Debug, Error)]
pub enum CliError {
    /// API request failed
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Local input validation failed
    #[error("Invalid input: {0}")]
    Validation(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    /// HTTP status of the underlying API failure, when one exists
    pub fn status(&self) -> Option<u16> {
        match self {
            CliError::Api(err) => err.status,
            _ => None,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        CliError::Config(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        CliError::Validation(message.into())
    }
}

/// Result type alias for the command layer
pub type CliResult<T> = Result<T, CliError>;
