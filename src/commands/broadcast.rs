//! Broadcast command handlers

use crate::cli::BroadcastCommands;
use crate::commands::{confirm, emit};
use crate::models::broadcasts::{
    CreateBroadcastRequest, SendBroadcastRequest, UpdateBroadcastRequest,
};
use crate::models::ListParams;
use crate::services::client::Client;
use crate::utils::error::{CliError, CliResult};
use crate::utils::output::{detail, opt, table, timestamp, FormatContext};

pub async fn run(
    client: &Client,
    ctx: &FormatContext,
    cmd: BroadcastCommands,
    assume_yes: bool,
) -> CliResult<()> {
    match cmd {
        BroadcastCommands::List { limit, cursor } => {
            let response = client
                .list_broadcasts(&ListParams::new(limit, cursor))
                .await?;
            emit(ctx, &response.data, || table(ctx, &response.data.data))
        }

        BroadcastCommands::Create {
            audience,
            from,
            subject,
            html,
            text,
            name,
            reply_to,
        } => {
            if html.is_none() && text.is_none() {
                return Err(CliError::validation("either --html or --text is required"));
            }
            let request = CreateBroadcastRequest {
                audience_id: audience,
                from,
                subject,
                html,
                text,
                name,
                reply_to,
            };
            let response = client.create_broadcast(&request).await?;
            emit(ctx, &response.data, || {
                detail(ctx, &[("Id", response.data.id.clone())])
            })
        }

        BroadcastCommands::Get { id } => {
            let response = client.get_broadcast(&id).await?;
            let broadcast = &response.data;
            emit(ctx, broadcast, || {
                detail(
                    ctx,
                    &[
                        ("Id", broadcast.id.clone()),
                        ("Name", opt(&broadcast.name)),
                        ("Audience", opt(&broadcast.audience_id)),
                        ("From", opt(&broadcast.from)),
                        ("Subject", opt(&broadcast.subject)),
                        ("Status", opt(&broadcast.status)),
                        ("Created", timestamp(&broadcast.created_at)),
                        ("Scheduled", opt(&broadcast.scheduled_at)),
                    ],
                )
            })
        }

        BroadcastCommands::Update {
            id,
            from,
            subject,
            html,
            text,
            name,
            reply_to,
        } => {
            let request = UpdateBroadcastRequest {
                from,
                subject,
                html,
                text,
                name,
                reply_to,
            };
            let response = client.update_broadcast(&id, &request).await?;
            emit(ctx, &response.data, || {
                detail(ctx, &[("Id", response.data.id.clone())])
            })
        }

        BroadcastCommands::Delete { id } => {
            if !confirm(&format!("Delete broadcast {}?", id), assume_yes)? {
                println!("Aborted");
                return Ok(());
            }
            let response = client.delete_broadcast(&id).await?;
            emit(ctx, &response.data, || {
                format!("Deleted {}", response.data.id)
            })
        }

        BroadcastCommands::Send { id, scheduled_at } => {
            if !confirm(
                &format!("Send broadcast {} to its audience?", id),
                assume_yes,
            )? {
                println!("Aborted");
                return Ok(());
            }
            let request = SendBroadcastRequest { scheduled_at };
            let response = client.send_broadcast(&id, &request).await?;
            emit(ctx, &response.data, || {
                detail(ctx, &[("Id", response.data.id.clone())])
            })
        }
    }
}
