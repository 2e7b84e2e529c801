//! CLI mode

use crate::cli::Commands;
use crate::config::StaticConfig;
use crate::interfaces::cli::CliError;

/// Run a single CLI command against the configured database
pub async fn run_cli(config: &StaticConfig, command: Commands) -> Result<(), CliError> {
    crate::interfaces::cli::run_cli_command(config, command).await
}
