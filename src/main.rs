use anyhow::Result;
use clap::Parser;

use urlshort::cli::{Cli, Commands};
use urlshort::config::{StaticConfig, get_config, init_config};
use urlshort::runtime::modes;
use urlshort::system::init_logging;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_config(cli.config.as_deref());
    let config = get_config();

    if cli.is_server_mode() {
        let _guard = init_logging(&config.logging)?;
        return modes::run_server(&config).await;
    }

    run_command(&config, cli.command).await
}

#[cfg(feature = "cli")]
async fn run_command(config: &StaticConfig, command: Option<Commands>) -> Result<()> {
    if let Some(command) = command
        && let Err(e) = modes::run_cli(config, command).await
    {
        eprintln!("{}", e.format_colored());
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(not(feature = "cli"))]
async fn run_command(_config: &StaticConfig, _command: Option<Commands>) -> Result<()> {
    anyhow::bail!("This build only supports the `serve` command")
}
