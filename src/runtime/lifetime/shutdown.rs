use std::time::Duration;

use sea_orm::DatabaseConnection;
use tokio::signal;
use tokio::time::timeout;
use tracing::{error, info, warn};

/// Upper bound for closing the connection pool
const SHUTDOWN_TIMEOUT_SECS: u64 = 10;

/// Resolve once Ctrl+C (or SIGTERM on Unix) is received, after closing the pool
pub async fn listen_for_shutdown(db: &DatabaseConnection) {
    wait_for_signal().await;
    info!("Shutdown signal received, closing database connections...");

    match timeout(
        Duration::from_secs(SHUTDOWN_TIMEOUT_SECS),
        db.clone().close(),
    )
    .await
    {
        Ok(Ok(())) => info!("Database connections closed"),
        Ok(Err(e)) => warn!("Failed to close database connections cleanly: {}", e),
        Err(_) => error!(
            "Closing database connections timed out after {} seconds",
            SHUTDOWN_TIMEOUT_SECS
        ),
    }
}

async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(
                "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
                e
            );
        }
    };

    #[cfg(unix)]
    {
        let terminate = async {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                }
                Err(e) => {
                    warn!("Failed to listen for SIGTERM: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        };

        tokio::select! {
            _ = ctrl_c => {}
            _ = terminate => {}
        }
    }

    #[cfg(not(unix))]
    ctrl_c.await;
}
