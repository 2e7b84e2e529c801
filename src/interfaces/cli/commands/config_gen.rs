//! Generate config command

use std::path::Path;

use colored::Colorize;

use crate::config::StaticConfig;
use crate::interfaces::cli::CliError;

/// Write a sample configuration file with every default spelled out
pub fn config_generate(output_path: Option<String>, force: bool) -> Result<(), CliError> {
    let path = output_path.unwrap_or_else(|| "config.example.toml".to_string());

    if !force && Path::new(&path).exists() {
        return Err(CliError::CommandError(format!(
            "{} already exists (use --force to overwrite)",
            path
        )));
    }

    println!(
        "{} {}",
        "Generating configuration file...".yellow(),
        path.blue()
    );

    StaticConfig::default().save_to_file(&path).map_err(|e| {
        CliError::CommandError(format!("Unable to write configuration file: {}", e))
    })?;

    println!(
        "  {} {}",
        "Configuration file generated successfully".green(),
        path.blue()
    );
    Ok(())
}
