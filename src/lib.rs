//! Relay CLI library
//!
//! A command-line client for the Relay email API. The heart of the crate is
//! the request engine in [`services::client`]; everything else is thin glue
//! between argument parsing and that engine.

pub mod cli;
pub mod commands;
pub mod config;
pub mod models;
pub mod services;
pub mod utils;

// Re-export common types
pub use config::Settings;
pub use services::client::{ApiResponse, ApiResult, Client, ClientConfig, RateLimit};
pub use utils::error::{ApiError, CliError, CliResult};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
