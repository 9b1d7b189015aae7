//! File-based configuration
//!
//! Loads and saves the CLI config file (JSON) under the user config
//! directory, and masks the stored credential for display.

use crate::utils::error::{CliError, CliResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding the config directory (used by tests and
/// sandboxed installs)
pub const CONFIG_DIR_ENV: &str = "RELAY_CONFIG_DIR";

const CONFIG_FILE_NAME: &str = "config.json";

/// Persisted CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Stored API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl ConfigFile {
    /// Default config file location: `$RELAY_CONFIG_DIR/config.json` when
    /// the override is set, `<config dir>/relay/config.json` otherwise
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Some(PathBuf::from(dir).join(CONFIG_FILE_NAME));
        }
        dirs::config_dir().map(|dir| dir.join("relay").join(CONFIG_FILE_NAME))
    }

    /// Load from an explicit path
    pub fn load(path: &Path) -> CliResult<Self> {
        let contents = fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)
            .map_err(|e| CliError::config(format!("malformed config file {}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "config file loaded");
        Ok(config)
    }

    /// Load from the default location; a missing or unreadable file yields
    /// `None` so callers fall back to defaults
    pub fn load_default() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            return None;
        }
        Self::load(&path).ok()
    }

    /// Save to an explicit path, creating parent directories as needed
    pub fn save(&self, path: &Path) -> CliResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        debug!(path = %path.display(), "config file saved");
        Ok(())
    }

    /// Save to the default location
    pub fn save_default(&self) -> CliResult<()> {
        let path = Self::default_path()
            .ok_or_else(|| CliError::config("could not determine config directory"))?;
        self.save(&path)
    }
}

/// Mask a credential for display: keep the prefix and the last four
/// characters, hide the middle. Keys too short to mask safely are hidden
/// entirely.
pub fn mask_key(key: &str) -> String {
    if key.len() < 8 {
        return "********".to_string();
    }
    let prefix_len = key.find('_').map(|i| i + 1).unwrap_or(3).min(key.len() - 4);
    let suffix = &key[key.len() - 4..];
    format!("{}{}{}", &key[..prefix_len], "****", suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_key_keeps_prefix_and_suffix() {
        assert_eq!(mask_key("re_abcdefgh1234"), "re_****1234");
    }

    #[test]
    fn test_mask_key_without_underscore() {
        assert_eq!(mask_key("abcdefgh1234"), "abc****1234");
    }

    #[test]
    fn test_mask_key_short_keys_fully_hidden() {
        assert_eq!(mask_key("re_1"), "********");
        assert_eq!(mask_key(""), "********");
    }
}
