//! Output formatting
//!
//! Renders API payloads as plain tables, key/value detail blocks, or pretty
//! JSON. All styling decisions flow through an explicit [`FormatContext`]
//! constructed once from the CLI flags; there is no process-wide color
//! state.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::models::api_keys::ApiKeySummary;
use crate::models::audiences::Audience;
use crate::models::broadcasts::Broadcast;
use crate::models::contacts::Contact;
use crate::models::domains::{DnsRecord, Domain};
use crate::models::emails::Email;
use crate::models::webhooks::Webhook;

/// Output format selected with `--output`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable columns
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Formatting decisions for one command invocation
#[derive(Debug, Clone, Copy)]
pub struct FormatContext {
    pub format: OutputFormat,
    pub color: bool,
}

impl FormatContext {
    pub fn new(format: OutputFormat, color: bool) -> Self {
        Self { format, color }
    }

    fn emphasize(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn label(&self, text: &str) -> String {
        if self.color {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    }
}

/// A value that can render itself as one table row
pub trait Tabular {
    fn headers() -> &'static [&'static str];
    fn row(&self) -> Vec<String>;
}

/// Render a column-padded table for a list of items
pub fn table<T: Tabular>(ctx: &FormatContext, items: &[T]) -> String {
    let headers = T::headers();
    if items.is_empty() {
        return "(no results)".to_string();
    }

    let rows: Vec<Vec<String>> = items.iter().map(Tabular::row).collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }

    let mut out = String::new();
    for (i, header) in headers.iter().enumerate() {
        out.push_str(&ctx.emphasize(&pad(header, widths[i])));
        if i + 1 < headers.len() {
            out.push_str("  ");
        }
    }
    out.push('\n');
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            out.push_str(&pad(cell, widths[i]));
            if i + 1 < row.len() {
                out.push_str("  ");
            }
        }
        out.push('\n');
    }
    out.pop();
    out
}

/// Render an aligned key/value detail block for a single item
pub fn detail(ctx: &FormatContext, pairs: &[(&str, String)]) -> String {
    let key_width = pairs.iter().map(|(key, _)| key.width()).max().unwrap_or(0);
    pairs
        .iter()
        .map(|(key, value)| format!("{}  {}", ctx.label(&pad(key, key_width)), value))
        .collect::<Vec<_>>()
        .join("\n")
}

fn pad(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(padding))
}

/// Placeholder for absent optional fields
pub fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

/// Short timestamp rendering for table cells
pub fn timestamp(value: &Option<DateTime<Utc>>) -> String {
    value
        .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

impl Tabular for Email {
    fn headers() -> &'static [&'static str] {
        &["ID", "FROM", "TO", "SUBJECT", "STATUS", "CREATED"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.from.clone(),
            self.to.join(", "),
            self.subject.clone(),
            opt(&self.last_event),
            timestamp(&self.created_at),
        ]
    }
}

impl Tabular for Domain {
    fn headers() -> &'static [&'static str] {
        &["ID", "NAME", "STATUS", "REGION", "CREATED"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            opt(&self.status),
            opt(&self.region),
            timestamp(&self.created_at),
        ]
    }
}

impl Tabular for DnsRecord {
    fn headers() -> &'static [&'static str] {
        &["RECORD", "NAME", "TYPE", "VALUE", "STATUS"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            opt(&self.record),
            self.name.clone(),
            self.record_type.clone(),
            self.value.clone(),
            opt(&self.status),
        ]
    }
}

impl Tabular for Audience {
    fn headers() -> &'static [&'static str] {
        &["ID", "NAME", "CREATED"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            timestamp(&self.created_at),
        ]
    }
}

impl Tabular for Contact {
    fn headers() -> &'static [&'static str] {
        &["ID", "EMAIL", "FIRST NAME", "LAST NAME", "UNSUBSCRIBED", "CREATED"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.email.clone(),
            opt(&self.first_name),
            opt(&self.last_name),
            self.unsubscribed.to_string(),
            timestamp(&self.created_at),
        ]
    }
}

impl Tabular for Broadcast {
    fn headers() -> &'static [&'static str] {
        &["ID", "NAME", "AUDIENCE", "SUBJECT", "STATUS", "CREATED"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            opt(&self.name),
            opt(&self.audience_id),
            opt(&self.subject),
            opt(&self.status),
            timestamp(&self.created_at),
        ]
    }
}

impl Tabular for Webhook {
    fn headers() -> &'static [&'static str] {
        &["ID", "ENDPOINT", "EVENTS", "STATUS", "CREATED"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.endpoint.clone(),
            self.events.join(", "),
            opt(&self.status),
            timestamp(&self.created_at),
        ]
    }
}

impl Tabular for ApiKeySummary {
    fn headers() -> &'static [&'static str] {
        &["ID", "NAME", "CREATED"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            timestamp(&self.created_at),
        ]
    }
}
