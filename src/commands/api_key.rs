//! API key command handlers

use crate::cli::ApiKeyCommands;
use crate::commands::{confirm, emit};
use crate::models::api_keys::CreateApiKeyRequest;
use crate::models::ListParams;
use crate::services::client::Client;
use crate::utils::error::{CliError, CliResult};
use crate::utils::output::{detail, table, FormatContext};

pub async fn run(
    client: &Client,
    ctx: &FormatContext,
    cmd: ApiKeyCommands,
    assume_yes: bool,
) -> CliResult<()> {
    match cmd {
        ApiKeyCommands::List { limit, cursor } => {
            let response = client.list_api_keys(&ListParams::new(limit, cursor)).await?;
            emit(ctx, &response.data, || table(ctx, &response.data.data))
        }

        ApiKeyCommands::Create {
            name,
            permission,
            domain_id,
        } => {
            if let Some(permission) = &permission {
                if permission != "full_access" && permission != "sending_access" {
                    return Err(CliError::validation(
                        "--permission must be full_access or sending_access",
                    ));
                }
            }
            let request = CreateApiKeyRequest {
                name,
                permission,
                domain_id,
            };
            let response = client.create_api_key(&request).await?;
            // The token is only ever returned here; print it once
            emit(ctx, &response.data, || {
                detail(
                    ctx,
                    &[
                        ("Id", response.data.id.clone()),
                        ("Token", response.data.token.clone()),
                    ],
                )
            })
        }

        ApiKeyCommands::Delete { id } => {
            if !confirm(&format!("Delete API key {}?", id), assume_yes)? {
                println!("Aborted");
                return Ok(());
            }
            let response = client.delete_api_key(&id).await?;
            emit(ctx, &response.data, || {
                format!("Deleted {}", response.data.id)
            })
        }
    }
}
