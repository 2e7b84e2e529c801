//! Logging system initialization

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;

use crate::config::LoggingConfig;

/// Install the global tracing subscriber
///
/// Output goes to stdout unless `logging.file` is set, in which case it is
/// appended to that file, rotated daily when `enable_rotation` is on.
/// `RUST_LOG`-style directives in `logging.level` are honored.
///
/// The returned guard must be kept alive for the whole program so buffered
/// lines are flushed on exit. Call once, after the configuration is loaded.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let log_file = config.file.as_deref().filter(|f| !f.is_empty());

    let writer: Box<dyn std::io::Write + Send + Sync> = match log_file {
        Some(log_file) if config.enable_rotation => {
            let path = Path::new(log_file);
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let prefix = path
                .file_name()
                .and_then(|f| f.to_str())
                .unwrap_or("urlshort.log")
                .trim_end_matches(".log")
                .to_string();

            let appender = rolling::Builder::new()
                .rotation(rolling::Rotation::DAILY)
                .filename_prefix(prefix)
                .filename_suffix("log")
                .max_log_files(config.max_backups.max(1) as usize)
                .build(dir)
                .context("Failed to create rolling log appender")?;
            Box::new(appender)
        }
        Some(log_file) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file)
                .with_context(|| format!("Failed to open log file {}", log_file))?;
            Box::new(file)
        }
        None => Box::new(std::io::stdout()),
    };

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .with_context(|| format!("Invalid log level '{}'", config.level))?;

    let subscriber_builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(log_file.is_none());

    let installed = if config.format == "json" {
        subscriber_builder.json().try_init()
    } else {
        subscriber_builder.try_init()
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    Ok(guard)
}
