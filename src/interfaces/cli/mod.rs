//! CLI interface module
//!
//! Runs one command against the configured database and prints the result.

pub mod commands;

use std::fmt;

use crate::cli::{Commands, ConfigCommands};
use crate::config::StaticConfig;
use crate::errors::UrlShortError;
use crate::runtime::lifetime::startup::StartupContext;
use crate::storage::StorageFactory;

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    ParseError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<UrlShortError> for CliError {
    fn from(err: UrlShortError) -> Self {
        match err {
            UrlShortError::DatabaseConfig(_)
            | UrlShortError::DatabaseConnection(_)
            | UrlShortError::DatabaseOperation(_) => CliError::StorageError(err.to_string()),
            UrlShortError::Validation(_) => CliError::ParseError(err.message().to_string()),
            other => CliError::CommandError(other.message().to_string()),
        }
    }
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(config: &StaticConfig, cmd: Commands) -> Result<(), CliError> {
    // Generate doesn't need a database connection
    if let Commands::Config {
        action: ConfigCommands::Generate { output_path, force },
    } = cmd
    {
        return commands::config_generate(output_path, force);
    }

    let storage = StorageFactory::create(&config.database).await?;
    let context = StartupContext::from_storage(storage, config);

    match cmd {
        Commands::Shorten {
            url,
            alias,
            expiration,
        } => commands::shorten_link(&context, url, alias, expiration).await,
        Commands::Resolve { token } => commands::resolve_link(&context, token).await,
        Commands::Info { token } => commands::link_info(&context, token).await,
        Commands::Serve => Err(CliError::CommandError(
            "serve is handled by the server runtime".to_string(),
        )),
        Commands::Config { .. } => Ok(()),
    }
}
