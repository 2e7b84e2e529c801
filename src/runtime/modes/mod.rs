//! Mode routing
//!
//! The HTTP server runs when no subcommand (or `serve`) is given; any other
//! subcommand goes to the CLI.

pub mod server;

#[cfg(feature = "cli")]
pub mod cli;

pub use server::run_server;

#[cfg(feature = "cli")]
pub use cli::run_cli;
