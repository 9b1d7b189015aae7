//! Command-line definitions
//!
//! The clap derive tree: noun groups with verb subcommands, plus the global
//! flags shared by every command.

use crate::utils::output::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "relay")]
#[command(version, about = "Command-line client for the Relay email API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API key (overrides RELAY_API_KEY and the config file)
    #[arg(long, global = true, value_name = "KEY")]
    pub api_key: Option<String>,

    /// API base URL (overrides RELAY_BASE_URL and the config file)
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Skip confirmation prompts
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send and inspect emails
    #[command(subcommand)]
    Email(EmailCommands),

    /// Manage sending domains
    #[command(subcommand)]
    Domain(DomainCommands),

    /// Manage audiences (contact lists)
    #[command(subcommand)]
    Audience(AudienceCommands),

    /// Manage contacts within an audience
    #[command(subcommand)]
    Contact(ContactCommands),

    /// Manage broadcasts
    #[command(subcommand)]
    Broadcast(BroadcastCommands),

    /// Manage webhooks
    #[command(subcommand)]
    Webhook(WebhookCommands),

    /// Manage API keys
    #[command(name = "api-key", subcommand)]
    ApiKey(ApiKeyCommands),

    /// Show or edit the CLI configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug)]
pub enum EmailCommands {
    /// Send an email
    Send {
        /// Sender address
        #[arg(long)]
        from: String,

        /// Recipient addresses (comma-separated or repeated)
        #[arg(long, value_delimiter = ',', required = true)]
        to: Vec<String>,

        /// Subject line
        #[arg(long)]
        subject: String,

        /// HTML body
        #[arg(long)]
        html: Option<String>,

        /// Plain-text body
        #[arg(long)]
        text: Option<String>,

        /// CC addresses
        #[arg(long, value_delimiter = ',')]
        cc: Option<Vec<String>>,

        /// BCC addresses
        #[arg(long, value_delimiter = ',')]
        bcc: Option<Vec<String>>,

        /// Reply-to addresses
        #[arg(long, value_delimiter = ',')]
        reply_to: Option<Vec<String>>,

        /// Delivery time (ISO 8601, or natural language like "in 1 hour")
        #[arg(long)]
        scheduled_at: Option<String>,
    },

    /// Send a batch of emails from a JSON file (array of send requests)
    Batch {
        /// Path to the JSON file
        file: PathBuf,
    },

    /// Fetch an email by id
    Get { id: String },

    /// List emails
    #[command(alias = "ls")]
    List {
        /// Maximum number of results
        #[arg(long)]
        limit: Option<u32>,

        /// Pagination cursor from a previous page
        #[arg(long)]
        cursor: Option<String>,
    },

    /// Reschedule a scheduled email
    Update {
        id: String,

        /// New delivery time
        #[arg(long)]
        scheduled_at: String,
    },

    /// Cancel a scheduled email
    Cancel { id: String },
}

#[derive(Subcommand, Debug)]
pub enum DomainCommands {
    /// List domains
    #[command(alias = "ls")]
    List {
        #[arg(long)]
        limit: Option<u32>,

        #[arg(long)]
        cursor: Option<String>,
    },

    /// Add a sending domain
    Create {
        /// Domain name (e.g. mail.example.com)
        name: String,

        /// Sending region
        #[arg(long)]
        region: Option<String>,
    },

    /// Fetch a domain by id
    Get { id: String },

    /// Update domain settings
    Update {
        id: String,

        /// Enable or disable click tracking
        #[arg(long)]
        click_tracking: Option<bool>,

        /// Enable or disable open tracking
        #[arg(long)]
        open_tracking: Option<bool>,

        /// TLS enforcement mode (enforced or opportunistic)
        #[arg(long)]
        tls: Option<String>,
    },

    /// Delete a domain
    #[command(alias = "rm")]
    Delete { id: String },

    /// Trigger DNS verification
    Verify { id: String },
}

#[derive(Subcommand, Debug)]
pub enum AudienceCommands {
    /// List audiences
    #[command(alias = "ls")]
    List {
        #[arg(long)]
        limit: Option<u32>,

        #[arg(long)]
        cursor: Option<String>,
    },

    /// Create an audience
    Create {
        /// Audience name
        name: String,
    },

    /// Fetch an audience by id
    Get { id: String },

    /// Delete an audience
    #[command(alias = "rm")]
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ContactCommands {
    /// List contacts in an audience
    #[command(alias = "ls")]
    List {
        /// Audience id
        #[arg(long)]
        audience: String,

        #[arg(long)]
        limit: Option<u32>,

        #[arg(long)]
        cursor: Option<String>,
    },

    /// Add a contact to an audience
    Create {
        /// Audience id
        #[arg(long)]
        audience: String,

        /// Contact email address
        email: String,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        /// Create the contact already unsubscribed
        #[arg(long)]
        unsubscribed: bool,
    },

    /// Fetch a contact by id
    Get {
        /// Audience id
        #[arg(long)]
        audience: String,

        id: String,
    },

    /// Update a contact
    Update {
        /// Audience id
        #[arg(long)]
        audience: String,

        id: String,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        /// Set the unsubscribed flag
        #[arg(long)]
        unsubscribed: Option<bool>,
    },

    /// Remove a contact from an audience
    #[command(alias = "rm")]
    Delete {
        /// Audience id
        #[arg(long)]
        audience: String,

        id: String,
    },

    /// Import contacts from a CSV file (email,first_name,last_name,unsubscribed)
    Import {
        /// Audience id
        #[arg(long)]
        audience: String,

        /// Path to the CSV file
        file: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum BroadcastCommands {
    /// List broadcasts
    #[command(alias = "ls")]
    List {
        #[arg(long)]
        limit: Option<u32>,

        #[arg(long)]
        cursor: Option<String>,
    },

    /// Create a broadcast draft
    Create {
        /// Audience id to send to
        #[arg(long)]
        audience: String,

        /// Sender address
        #[arg(long)]
        from: String,

        /// Subject line
        #[arg(long)]
        subject: String,

        /// HTML body
        #[arg(long)]
        html: Option<String>,

        /// Plain-text body
        #[arg(long)]
        text: Option<String>,

        /// Internal name
        #[arg(long)]
        name: Option<String>,

        /// Reply-to addresses
        #[arg(long, value_delimiter = ',')]
        reply_to: Option<Vec<String>>,
    },

    /// Fetch a broadcast by id
    Get { id: String },

    /// Update a broadcast draft
    Update {
        id: String,

        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        subject: Option<String>,

        #[arg(long)]
        html: Option<String>,

        #[arg(long)]
        text: Option<String>,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, value_delimiter = ',')]
        reply_to: Option<Vec<String>>,
    },

    /// Delete a broadcast
    #[command(alias = "rm")]
    Delete { id: String },

    /// Send a broadcast, now or at a scheduled time
    Send {
        id: String,

        /// Delivery time; omit to send immediately
        #[arg(long)]
        scheduled_at: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum WebhookCommands {
    /// List webhooks
    #[command(alias = "ls")]
    List {
        #[arg(long)]
        limit: Option<u32>,

        #[arg(long)]
        cursor: Option<String>,
    },

    /// Register a webhook endpoint
    Create {
        /// Endpoint URL
        #[arg(long)]
        endpoint: String,

        /// Event types to subscribe to (comma-separated or repeated)
        #[arg(long = "event", value_delimiter = ',', required = true)]
        events: Vec<String>,
    },

    /// Fetch a webhook by id
    Get { id: String },

    /// Update a webhook
    Update {
        id: String,

        #[arg(long)]
        endpoint: Option<String>,

        #[arg(long = "event", value_delimiter = ',')]
        events: Option<Vec<String>>,

        /// enabled or disabled
        #[arg(long)]
        status: Option<String>,
    },

    /// Delete a webhook
    #[command(alias = "rm")]
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ApiKeyCommands {
    /// List API keys
    #[command(alias = "ls")]
    List {
        #[arg(long)]
        limit: Option<u32>,

        #[arg(long)]
        cursor: Option<String>,
    },

    /// Create an API key (the token is shown exactly once)
    Create {
        /// Key name
        name: String,

        /// full_access or sending_access
        #[arg(long)]
        permission: Option<String>,

        /// Restrict a sending_access key to one domain
        #[arg(long)]
        domain_id: Option<String>,
    },

    /// Delete an API key
    #[command(alias = "rm")]
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the stored configuration (API key masked)
    Show,

    /// Store configuration values
    Set {
        /// API key to store
        #[arg(long)]
        api_key: Option<String>,

        /// Base URL to store
        #[arg(long)]
        base_url: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_email_send() {
        let cli = Cli::try_parse_from([
            "relay", "email", "send", "--from", "me@example.com", "--to",
            "a@example.com,b@example.com", "--subject", "hi", "--text", "hello",
        ])
        .unwrap();

        match cli.command {
            Commands::Email(EmailCommands::Send { from, to, subject, .. }) => {
                assert_eq!(from, "me@example.com");
                assert_eq!(to, vec!["a@example.com", "b@example.com"]);
                assert_eq!(subject, "hi");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "relay", "domain", "list", "--output", "json", "--api-key", "re_test123",
        ])
        .unwrap();
        assert_eq!(cli.api_key.as_deref(), Some("re_test123"));
        assert_eq!(cli.output, OutputFormat::Json);
    }

    #[test]
    fn test_webhook_create_requires_events() {
        let result = Cli::try_parse_from([
            "relay", "webhook", "create", "--endpoint", "https://example.com/hook",
        ]);
        assert!(result.is_err());
    }
}
