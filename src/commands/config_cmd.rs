//! Config command handlers
//!
//! These run without a resolved credential so a fresh install can store one.

use serde_json::json;

use crate::cli::ConfigCommands;
use crate::commands::emit;
use crate::config::file::{mask_key, ConfigFile};
use crate::utils::error::{CliError, CliResult};
use crate::utils::output::{detail, FormatContext};

pub fn run(ctx: &FormatContext, cmd: ConfigCommands) -> CliResult<()> {
    match cmd {
        ConfigCommands::Show => {
            let path = ConfigFile::default_path()
                .ok_or_else(|| CliError::config("could not determine config directory"))?;
            let file = ConfigFile::load_default().unwrap_or_default();

            let masked = file.api_key.as_deref().map(mask_key);
            let payload = json!({
                "path": path.display().to_string(),
                "api_key": masked.clone(),
                "base_url": file.base_url.clone(),
            });
            emit(ctx, &payload, || {
                detail(
                    ctx,
                    &[
                        ("Path", path.display().to_string()),
                        ("Api key", masked.clone().unwrap_or_else(|| "-".to_string())),
                        (
                            "Base URL",
                            file.base_url.clone().unwrap_or_else(|| "-".to_string()),
                        ),
                    ],
                )
            })
        }

        ConfigCommands::Set { api_key, base_url } => {
            if api_key.is_none() && base_url.is_none() {
                return Err(CliError::validation(
                    "pass at least one of --api-key, --base-url",
                ));
            }

            let mut file = ConfigFile::load_default().unwrap_or_default();
            if let Some(key) = api_key {
                if key.trim().is_empty() {
                    return Err(CliError::validation("API key cannot be empty"));
                }
                file.api_key = Some(key);
            }
            if let Some(url) = base_url {
                if !url.starts_with("http") {
                    return Err(CliError::validation(
                        "base URL should start with 'http'",
                    ));
                }
                file.base_url = Some(url);
            }

            file.save_default()?;
            let path = ConfigFile::default_path()
                .ok_or_else(|| CliError::config("could not determine config directory"))?;
            println!("Configuration saved to {}", path.display());
            Ok(())
        }
    }
}
