//! Service layer module
//!
//! Contains the API request engine and its retry policy helpers

pub mod client;
pub mod retry;

pub use client::{ApiResponse, ApiResult, Client, ClientConfig, RateLimit};
