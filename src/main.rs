//! Relay CLI
//!
//! Every command resolves a credential, performs one API operation through
//! the request engine, and maps the outcome to process output and an exit
//! code.

use clap::Parser;

use relay_cli::cli::Cli;
use relay_cli::commands;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = commands::run(cli).await {
        eprintln!("Error: {}", err);
        if let Some(status) = err.status() {
            eprintln!("Status: {}", status);
        }
        std::process::exit(1);
    }
}

/// Initialize the logging system.
///
/// Logs go to stderr so they never mix with command output. `RUST_LOG`
/// always wins; otherwise `--verbose` selects debug and the default is warn.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
