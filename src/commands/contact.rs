//! Contact command handlers
//!
//! Includes CSV import: rows are fully validated before the first network
//! call, then created strictly sequentially through the engine.

use serde::Deserialize;
use std::path::Path;
use tracing::warn;

use crate::cli::ContactCommands;
use crate::commands::{confirm, emit};
use crate::models::contacts::{CreateContactRequest, UpdateContactRequest};
use crate::models::ListParams;
use crate::services::client::Client;
use crate::utils::error::{CliError, CliResult};
use crate::utils::output::{detail, opt, table, timestamp, FormatContext};

pub async fn run(
    client: &Client,
    ctx: &FormatContext,
    cmd: ContactCommands,
    assume_yes: bool,
) -> CliResult<()> {
    match cmd {
        ContactCommands::List {
            audience,
            limit,
            cursor,
        } => {
            let response = client
                .list_contacts(&audience, &ListParams::new(limit, cursor))
                .await?;
            emit(ctx, &response.data, || table(ctx, &response.data.data))
        }

        ContactCommands::Create {
            audience,
            email,
            first_name,
            last_name,
            unsubscribed,
        } => {
            validate_email(&email)?;
            let request = CreateContactRequest {
                email,
                first_name,
                last_name,
                unsubscribed: unsubscribed.then_some(true),
            };
            let response = client.create_contact(&audience, &request).await?;
            emit(ctx, &response.data, || {
                detail(ctx, &[("Id", response.data.id.clone())])
            })
        }

        ContactCommands::Get { audience, id } => {
            let response = client.get_contact(&audience, &id).await?;
            let contact = &response.data;
            emit(ctx, contact, || {
                detail(
                    ctx,
                    &[
                        ("Id", contact.id.clone()),
                        ("Email", contact.email.clone()),
                        ("First name", opt(&contact.first_name)),
                        ("Last name", opt(&contact.last_name)),
                        ("Unsubscribed", contact.unsubscribed.to_string()),
                        ("Created", timestamp(&contact.created_at)),
                    ],
                )
            })
        }

        ContactCommands::Update {
            audience,
            id,
            first_name,
            last_name,
            unsubscribed,
        } => {
            if first_name.is_none() && last_name.is_none() && unsubscribed.is_none() {
                return Err(CliError::validation(
                    "pass at least one of --first-name, --last-name, --unsubscribed",
                ));
            }
            let request = UpdateContactRequest {
                first_name,
                last_name,
                unsubscribed,
            };
            let response = client.update_contact(&audience, &id, &request).await?;
            emit(ctx, &response.data, || {
                detail(ctx, &[("Id", response.data.id.clone())])
            })
        }

        ContactCommands::Delete { audience, id } => {
            if !confirm(&format!("Delete contact {}?", id), assume_yes)? {
                println!("Aborted");
                return Ok(());
            }
            let response = client.delete_contact(&audience, &id).await?;
            emit(ctx, &response.data, || {
                format!("Deleted {}", response.data.id)
            })
        }

        ContactCommands::Import { audience, file } => {
            let contacts = read_contacts_csv(&file)?;
            println!("Importing {} contacts...", contacts.len());

            let mut imported = 0usize;
            let mut failed = 0usize;
            for contact in &contacts {
                match client.create_contact(&audience, contact).await {
                    Ok(_) => imported += 1,
                    Err(err) => {
                        warn!(email = %contact.email, error = %err, "contact import failed");
                        eprintln!("Failed to import {}: {}", contact.email, err);
                        failed += 1;
                    }
                }
            }

            if failed > 0 {
                println!("Imported {} contacts, {} failed", imported, failed);
            } else {
                println!("Imported {} contacts", imported);
            }
            Ok(())
        }
    }
}

#[derive(Debug, Deserialize)]
struct CsvContactRow {
    email: String,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    unsubscribed: Option<bool>,
}

fn validate_email(email: &str) -> CliResult<()> {
    let trimmed = email.trim();
    if trimmed.is_empty() || !trimmed.contains('@') {
        return Err(CliError::validation(format!(
            "{:?} is not a valid email address",
            email
        )));
    }
    Ok(())
}

/// Parse and validate the whole CSV before any contact is created
fn read_contacts_csv(path: &Path) -> CliResult<Vec<CreateContactRequest>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut contacts = Vec::new();

    for (index, record) in reader.deserialize::<CsvContactRow>().enumerate() {
        // Header is line 1, first record is line 2
        let line = index + 2;
        let row = record.map_err(|e| CliError::validation(format!("line {}: {}", line, e)))?;

        validate_email(&row.email)
            .map_err(|_| CliError::validation(format!("line {}: invalid email {:?}", line, row.email)))?;

        contacts.push(CreateContactRequest {
            email: row.email.trim().to_string(),
            first_name: row.first_name.filter(|s| !s.is_empty()),
            last_name: row.last_name.filter(|s| !s.is_empty()),
            unsubscribed: row.unsubscribed,
        });
    }

    if contacts.is_empty() {
        return Err(CliError::validation("CSV file contains no contacts"));
    }
    Ok(contacts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_import_parses_full_rows() {
        let file = write_csv(
            "email,first_name,last_name,unsubscribed\n\
             a@example.com,Ada,Lovelace,false\n\
             b@example.com,,,true\n",
        );
        let contacts = read_contacts_csv(file.path()).unwrap();
        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].email, "a@example.com");
        assert_eq!(contacts[0].first_name.as_deref(), Some("Ada"));
        assert!(contacts[1].first_name.is_none());
        assert_eq!(contacts[1].unsubscribed, Some(true));
    }

    #[test]
    fn test_import_accepts_email_only_header() {
        let file = write_csv("email\na@example.com\n");
        let contacts = read_contacts_csv(file.path()).unwrap();
        assert_eq!(contacts.len(), 1);
        assert!(contacts[0].unsubscribed.is_none());
    }

    #[test]
    fn test_import_rejects_invalid_email() {
        let file = write_csv("email\nnot-an-address\n");
        let err = read_contacts_csv(file.path()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_import_rejects_empty_file() {
        let file = write_csv("email,first_name\n");
        assert!(read_contacts_csv(file.path()).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@example.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("nope").is_err());
    }
}
