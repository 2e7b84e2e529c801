//! Link commands: shorten, resolve, info

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;

use crate::interfaces::cli::CliError;
use crate::runtime::lifetime::startup::StartupContext;
use crate::services::ExpirationOption;
use crate::storage::{RecordState, UrlRecord};

/// Record as printed by `info`, with its lifecycle state
#[derive(Serialize)]
struct RecordView<'a> {
    #[serde(flatten)]
    record: &'a UrlRecord,
    state: RecordState,
}

pub async fn shorten_link(
    context: &StartupContext,
    url: String,
    alias: Option<String>,
    expiration: Option<String>,
) -> Result<(), CliError> {
    let option = ExpirationOption::from(expiration.as_deref());
    if expiration.is_some() && option == ExpirationOption::Unspecified {
        println!(
            "{} Unknown expiration '{}', applying the unmatched policy ({})",
            "ℹ".bold().blue(),
            expiration.as_deref().unwrap_or_default().yellow(),
            context.shorten_service.settings().unmatched_expiration
        );
    }

    let token = context
        .shorten_service
        .shorten(&url, alias.as_deref(), option)
        .await?;

    println!(
        "{} Shortened: {} -> {}",
        "✓".bold().green(),
        context.public_url.link_for(&token).cyan(),
        url.blue().underline()
    );
    Ok(())
}

pub async fn resolve_link(context: &StartupContext, token: String) -> Result<(), CliError> {
    let url = context.redirect_service.resolve(&token).await?;
    println!("{}", url);
    Ok(())
}

pub async fn link_info(context: &StartupContext, token: String) -> Result<(), CliError> {
    let record = context.redirect_service.info(&token).await?;
    let json = render_info(&record, Utc::now())
        .map_err(|e| CliError::CommandError(format!("Failed to serialize record: {}", e)))?;
    println!("{}", json);
    Ok(())
}

fn render_info(record: &UrlRecord, now: DateTime<Utc>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&RecordView {
        record,
        state: record.state_at(now),
    })
}
