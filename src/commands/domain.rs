//! Domain command handlers

use crate::cli::DomainCommands;
use crate::commands::{confirm, emit};
use crate::models::domains::{CreateDomainRequest, UpdateDomainRequest};
use crate::models::ListParams;
use crate::services::client::Client;
use crate::utils::error::{CliError, CliResult};
use crate::utils::output::{detail, opt, table, timestamp, FormatContext};

pub async fn run(
    client: &Client,
    ctx: &FormatContext,
    cmd: DomainCommands,
    assume_yes: bool,
) -> CliResult<()> {
    match cmd {
        DomainCommands::List { limit, cursor } => {
            let response = client.list_domains(&ListParams::new(limit, cursor)).await?;
            emit(ctx, &response.data, || table(ctx, &response.data.data))
        }

        DomainCommands::Create { name, region } => {
            if !name.contains('.') {
                return Err(CliError::validation(format!(
                    "{:?} does not look like a domain name",
                    name
                )));
            }
            let request = CreateDomainRequest { name, region };
            let response = client.create_domain(&request).await?;
            emit(ctx, &response.data, || render_domain(ctx, &response.data))
        }

        DomainCommands::Get { id } => {
            let response = client.get_domain(&id).await?;
            emit(ctx, &response.data, || render_domain(ctx, &response.data))
        }

        DomainCommands::Update {
            id,
            click_tracking,
            open_tracking,
            tls,
        } => {
            if click_tracking.is_none() && open_tracking.is_none() && tls.is_none() {
                return Err(CliError::validation(
                    "pass at least one of --click-tracking, --open-tracking, --tls",
                ));
            }
            let request = UpdateDomainRequest {
                click_tracking,
                open_tracking,
                tls,
            };
            let response = client.update_domain(&id, &request).await?;
            emit(ctx, &response.data, || render_domain(ctx, &response.data))
        }

        DomainCommands::Delete { id } => {
            if !confirm(&format!("Delete domain {}?", id), assume_yes)? {
                println!("Aborted");
                return Ok(());
            }
            let response = client.delete_domain(&id).await?;
            emit(ctx, &response.data, || {
                format!("Deleted {}", response.data.id)
            })
        }

        DomainCommands::Verify { id } => {
            let response = client.verify_domain(&id).await?;
            emit(ctx, &response.data, || {
                format!("Verification started for {}", response.data.id)
            })
        }
    }
}

/// Domain detail block, with the DNS records table when present
fn render_domain(ctx: &FormatContext, domain: &crate::models::domains::Domain) -> String {
    let mut out = detail(
        ctx,
        &[
            ("Id", domain.id.clone()),
            ("Name", domain.name.clone()),
            ("Status", opt(&domain.status)),
            ("Region", opt(&domain.region)),
            ("Created", timestamp(&domain.created_at)),
        ],
    );

    if let Some(records) = &domain.records {
        if !records.is_empty() {
            out.push_str("\n\n");
            out.push_str(&table(ctx, records));
        }
    }
    out
}
