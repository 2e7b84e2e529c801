//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// urlshort - A small URL shortener service
#[derive(Parser, Debug)]
#[command(name = "urlshort")]
#[command(version)]
#[command(about = "A small URL shortener service", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server (default when no command is given)
    Serve,

    /// Shorten a URL
    ///
    /// Without --alias a random token is generated.
    Shorten {
        /// Destination URL
        url: String,

        /// Custom alias to use instead of a generated token
        #[arg(long, short = 'a')]
        alias: Option<String>,

        /// Expiration: "1 Day", "1 Month", "1 Year" or "Lifetime"
        #[arg(long, short = 'e')]
        expiration: Option<String>,
    },

    /// Resolve a token to its destination (counts as an access)
    Resolve {
        /// Generated token or custom alias
        token: String,
    },

    /// Show the stored record of a token as JSON
    Info {
        /// Generated token or custom alias
        token: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// Whether this invocation should start the HTTP server
    pub fn is_server_mode(&self) -> bool {
        matches!(self.command, None | Some(Commands::Serve))
    }
}
