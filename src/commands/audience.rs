//! Audience command handlers

use crate::cli::AudienceCommands;
use crate::commands::{confirm, emit};
use crate::models::audiences::CreateAudienceRequest;
use crate::models::ListParams;
use crate::services::client::Client;
use crate::utils::error::{CliError, CliResult};
use crate::utils::output::{detail, table, timestamp, FormatContext};

pub async fn run(
    client: &Client,
    ctx: &FormatContext,
    cmd: AudienceCommands,
    assume_yes: bool,
) -> CliResult<()> {
    match cmd {
        AudienceCommands::List { limit, cursor } => {
            let response = client
                .list_audiences(&ListParams::new(limit, cursor))
                .await?;
            emit(ctx, &response.data, || table(ctx, &response.data.data))
        }

        AudienceCommands::Create { name } => {
            if name.trim().is_empty() {
                return Err(CliError::validation("audience name cannot be empty"));
            }
            let request = CreateAudienceRequest { name };
            let response = client.create_audience(&request).await?;
            emit(ctx, &response.data, || {
                detail(
                    ctx,
                    &[
                        ("Id", response.data.id.clone()),
                        ("Name", response.data.name.clone()),
                    ],
                )
            })
        }

        AudienceCommands::Get { id } => {
            let response = client.get_audience(&id).await?;
            emit(ctx, &response.data, || {
                detail(
                    ctx,
                    &[
                        ("Id", response.data.id.clone()),
                        ("Name", response.data.name.clone()),
                        ("Created", timestamp(&response.data.created_at)),
                    ],
                )
            })
        }

        AudienceCommands::Delete { id } => {
            if !confirm(&format!("Delete audience {}?", id), assume_yes)? {
                println!("Aborted");
                return Ok(());
            }
            let response = client.delete_audience(&id).await?;
            emit(ctx, &response.data, || {
                format!("Deleted {}", response.data.id)
            })
        }
    }
}
