//! Email command handlers

use std::fs;

use crate::cli::EmailCommands;
use crate::commands::{confirm, emit};
use crate::models::emails::{SendEmailRequest, UpdateEmailRequest};
use crate::models::ListParams;
use crate::services::client::Client;
use crate::utils::error::{CliError, CliResult};
use crate::utils::output::{detail, opt, table, timestamp, FormatContext};

/// Maximum number of emails accepted by the batch endpoint
const MAX_BATCH_SIZE: usize = 100;

pub async fn run(
    client: &Client,
    ctx: &FormatContext,
    cmd: EmailCommands,
    assume_yes: bool,
) -> CliResult<()> {
    match cmd {
        EmailCommands::Send {
            from,
            to,
            subject,
            html,
            text,
            cc,
            bcc,
            reply_to,
            scheduled_at,
        } => {
            if html.is_none() && text.is_none() {
                return Err(CliError::validation("either --html or --text is required"));
            }

            let request = SendEmailRequest {
                from,
                to,
                subject,
                html,
                text,
                cc,
                bcc,
                reply_to,
                scheduled_at,
                headers: None,
                tags: None,
            };
            let response = client.send_email(&request).await?;
            emit(ctx, &response.data, || {
                detail(ctx, &[("Id", response.data.id.clone())])
            })
        }

        EmailCommands::Batch { file } => {
            let contents = fs::read_to_string(&file)?;
            let requests: Vec<SendEmailRequest> = serde_json::from_str(&contents).map_err(|e| {
                CliError::validation(format!("malformed batch file {}: {}", file.display(), e))
            })?;

            if requests.is_empty() {
                return Err(CliError::validation("batch file contains no emails"));
            }
            if requests.len() > MAX_BATCH_SIZE {
                return Err(CliError::validation(format!(
                    "batch contains {} emails, maximum is {}",
                    requests.len(),
                    MAX_BATCH_SIZE
                )));
            }

            let response = client.send_batch(&requests).await?;
            emit(ctx, &response.data, || {
                response
                    .data
                    .data
                    .iter()
                    .map(|entry| entry.id.clone())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }

        EmailCommands::Get { id } => {
            let response = client.get_email(&id).await?;
            let email = &response.data;
            emit(ctx, email, || {
                detail(
                    ctx,
                    &[
                        ("Id", email.id.clone()),
                        ("From", email.from.clone()),
                        ("To", email.to.join(", ")),
                        ("Subject", email.subject.clone()),
                        ("Status", opt(&email.last_event)),
                        ("Created", timestamp(&email.created_at)),
                        ("Scheduled", opt(&email.scheduled_at)),
                    ],
                )
            })
        }

        EmailCommands::List { limit, cursor } => {
            let response = client.list_emails(&ListParams::new(limit, cursor)).await?;
            emit(ctx, &response.data, || table(ctx, &response.data.data))
        }

        EmailCommands::Update { id, scheduled_at } => {
            let request = UpdateEmailRequest { scheduled_at };
            let response = client.update_email(&id, &request).await?;
            emit(ctx, &response.data, || {
                detail(ctx, &[("Id", response.data.id.clone())])
            })
        }

        EmailCommands::Cancel { id } => {
            if !confirm(&format!("Cancel scheduled email {}?", id), assume_yes)? {
                println!("Aborted");
                return Ok(());
            }
            let response = client.cancel_email(&id).await?;
            emit(ctx, &response.data, || {
                detail(ctx, &[("Id", response.data.id.clone())])
            })
        }
    }
}
