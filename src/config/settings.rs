//! Application configuration settings
//!
//! Resolves the credential and engine parameters from flags, environment
//! variables, and the config file, then validates them.

use crate::config::file::ConfigFile;
use crate::services::client::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_MS,
};
use crate::utils::error::{CliError, CliResult};
use std::env;

/// Environment variable carrying the API key
pub const API_KEY_ENV: &str = "RELAY_API_KEY";

/// Environment variable overriding the base URL
pub const BASE_URL_ENV: &str = "RELAY_BASE_URL";

/// Environment variable overriding the per-attempt timeout (milliseconds)
pub const TIMEOUT_ENV: &str = "RELAY_TIMEOUT_MS";

/// Environment variable overriding the attempt budget
pub const MAX_RETRIES_ENV: &str = "RELAY_MAX_RETRIES";

/// Resolved settings for one command invocation
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub base_url: String,
    pub timeout_ms: u64,
    pub max_retries: u32,
}

impl Settings {
    /// Resolve settings from flag > environment variable > config file.
    ///
    /// A `.env` file in the working directory is honored before environment
    /// lookups.
    pub fn resolve(flag_api_key: Option<&str>, flag_base_url: Option<&str>) -> CliResult<Self> {
        dotenv::dotenv().ok();

        let file = ConfigFile::load_default().unwrap_or_default();

        let api_key = flag_api_key
            .map(str::to_owned)
            .or_else(|| env::var(API_KEY_ENV).ok())
            .or(file.api_key)
            .ok_or_else(|| {
                CliError::config(format!(
                    "no API key found; pass --api-key, set {}, or run `relay config set --api-key <key>`",
                    API_KEY_ENV
                ))
            })?;

        let base_url = flag_base_url
            .map(str::to_owned)
            .or_else(|| env::var(BASE_URL_ENV).ok())
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_ms = match env::var(TIMEOUT_ENV) {
            Ok(raw) => raw
                .parse()
                .map_err(|_| CliError::config(format!("invalid {} value: {}", TIMEOUT_ENV, raw)))?,
            Err(_) => DEFAULT_TIMEOUT_MS,
        };

        let max_retries = match env::var(MAX_RETRIES_ENV) {
            Ok(raw) => raw.parse().map_err(|_| {
                CliError::config(format!("invalid {} value: {}", MAX_RETRIES_ENV, raw))
            })?,
            Err(_) => DEFAULT_MAX_RETRIES,
        };

        let settings = Self {
            api_key,
            base_url,
            timeout_ms,
            max_retries,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Validate configuration validity
    fn validate(&self) -> CliResult<()> {
        if self.api_key.is_empty() {
            return Err(CliError::config("API key cannot be empty"));
        }

        if self.api_key.contains(char::is_whitespace) {
            return Err(CliError::config(
                "API key cannot contain whitespace characters",
            ));
        }

        if self.api_key.len() < 8 {
            return Err(CliError::config(
                "API key must be at least 8 characters long",
            ));
        }

        if !self.base_url.starts_with("http") {
            return Err(CliError::config(
                "invalid base URL, should start with 'http'",
            ));
        }

        if self.timeout_ms == 0 {
            return Err(CliError::config("timeout cannot be 0"));
        }

        if self.max_retries == 0 {
            return Err(CliError::config("max retries cannot be 0"));
        }

        Ok(())
    }

    /// Engine configuration for these settings
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_key.clone())
            .with_base_url(self.base_url.trim_end_matches('/').to_string())
            .with_timeout_ms(self.timeout_ms)
            .with_max_retries(self.max_retries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        Settings {
            api_key: "re_test123".to_string(),
            base_url: "https://api.relay.com".to_string(),
            timeout_ms: 30_000,
            max_retries: 3,
        }
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(valid_settings().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_short_key() {
        let mut settings = valid_settings();
        settings.api_key = "re_1".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_whitespace_key() {
        let mut settings = valid_settings();
        settings.api_key = "re_test 123".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_http_base_url() {
        let mut settings = valid_settings();
        settings.base_url = "ftp://api.relay.com".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_client_config_strips_trailing_slash() {
        let mut settings = valid_settings();
        settings.base_url = "https://api.relay.com/".to_string();
        assert_eq!(settings.client_config().base_url, "https://api.relay.com");
    }
}
