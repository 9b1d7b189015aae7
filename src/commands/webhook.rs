//! Webhook command handlers

use crate::cli::WebhookCommands;
use crate::commands::{confirm, emit};
use crate::models::webhooks::{CreateWebhookRequest, UpdateWebhookRequest};
use crate::models::ListParams;
use crate::services::client::Client;
use crate::utils::error::{CliError, CliResult};
use crate::utils::output::{detail, opt, table, timestamp, FormatContext};

pub async fn run(
    client: &Client,
    ctx: &FormatContext,
    cmd: WebhookCommands,
    assume_yes: bool,
) -> CliResult<()> {
    match cmd {
        WebhookCommands::List { limit, cursor } => {
            let response = client.list_webhooks(&ListParams::new(limit, cursor)).await?;
            emit(ctx, &response.data, || table(ctx, &response.data.data))
        }

        WebhookCommands::Create { endpoint, events } => {
            if !endpoint.starts_with("http") {
                return Err(CliError::validation(
                    "endpoint must be an http(s) URL",
                ));
            }
            let request = CreateWebhookRequest { endpoint, events };
            let response = client.create_webhook(&request).await?;
            emit(ctx, &response.data, || {
                detail(
                    ctx,
                    &[
                        ("Id", response.data.id.clone()),
                        ("Secret", opt(&response.data.signing_secret)),
                    ],
                )
            })
        }

        WebhookCommands::Get { id } => {
            let response = client.get_webhook(&id).await?;
            let webhook = &response.data;
            emit(ctx, webhook, || {
                detail(
                    ctx,
                    &[
                        ("Id", webhook.id.clone()),
                        ("Endpoint", webhook.endpoint.clone()),
                        ("Events", webhook.events.join(", ")),
                        ("Status", opt(&webhook.status)),
                        ("Created", timestamp(&webhook.created_at)),
                    ],
                )
            })
        }

        WebhookCommands::Update {
            id,
            endpoint,
            events,
            status,
        } => {
            if endpoint.is_none() && events.is_none() && status.is_none() {
                return Err(CliError::validation(
                    "pass at least one of --endpoint, --event, --status",
                ));
            }
            let request = UpdateWebhookRequest {
                endpoint,
                events,
                status,
            };
            let response = client.update_webhook(&id, &request).await?;
            emit(ctx, &response.data, || {
                detail(ctx, &[("Id", response.data.id.clone())])
            })
        }

        WebhookCommands::Delete { id } => {
            if !confirm(&format!("Delete webhook {}?", id), assume_yes)? {
                println!("Aborted");
                return Ok(());
            }
            let response = client.delete_webhook(&id).await?;
            emit(ctx, &response.data, || {
                format!("Deleted {}", response.data.id)
            })
        }
    }
}
