//! Command handlers
//!
//! One thin handler per subcommand: validate local input, call one engine
//! method, render the result. Handlers never retry errors the engine
//! deliberately surfaces (429 included).

use serde::Serialize;
use std::io::{self, IsTerminal, Write};

use crate::cli::{Cli, Commands};
use crate::config::Settings;
use crate::services::client::Client;
use crate::utils::error::CliResult;
use crate::utils::output::{FormatContext, OutputFormat};

pub mod api_key;
pub mod audience;
pub mod broadcast;
pub mod config_cmd;
pub mod contact;
pub mod domain;
pub mod email;
pub mod webhook;

/// Dispatch a parsed invocation to its handler
pub async fn run(cli: Cli) -> CliResult<()> {
    let color = !cli.no_color && io::stdout().is_terminal();
    let ctx = FormatContext::new(cli.output, color);

    match cli.command {
        // Config commands work without a resolved credential
        Commands::Config(cmd) => config_cmd::run(&ctx, cmd),
        command => {
            let settings = Settings::resolve(cli.api_key.as_deref(), cli.base_url.as_deref())?;
            let client = Client::new(settings.client_config())?;

            match command {
                Commands::Email(cmd) => email::run(&client, &ctx, cmd, cli.yes).await,
                Commands::Domain(cmd) => domain::run(&client, &ctx, cmd, cli.yes).await,
                Commands::Audience(cmd) => audience::run(&client, &ctx, cmd, cli.yes).await,
                Commands::Contact(cmd) => contact::run(&client, &ctx, cmd, cli.yes).await,
                Commands::Broadcast(cmd) => broadcast::run(&client, &ctx, cmd, cli.yes).await,
                Commands::Webhook(cmd) => webhook::run(&client, &ctx, cmd, cli.yes).await,
                Commands::ApiKey(cmd) => api_key::run(&client, &ctx, cmd, cli.yes).await,
                Commands::Config(_) => unreachable!("handled above"),
            }
        }
    }
}

/// Print a payload in the selected format: pretty JSON, or the table/detail
/// rendering the caller supplies
pub(crate) fn emit<T: Serialize>(
    ctx: &FormatContext,
    value: &T,
    render: impl FnOnce() -> String,
) -> CliResult<()> {
    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Table => println!("{}", render()),
    }
    Ok(())
}

/// Interactive yes/no prompt, skipped with `--yes`
pub(crate) fn confirm(prompt: &str, assume_yes: bool) -> CliResult<bool> {
    if assume_yes {
        return Ok(true);
    }
    eprint!("{} [y/N] ", prompt);
    io::stderr().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
