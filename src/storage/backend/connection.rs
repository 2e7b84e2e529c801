use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::errors::{Result, UrlShortError};
use migration::{Migrator, MigratorTrait};

/// Connect to SQLite, creating the file if missing
pub async fn connect_sqlite(database_url: &str) -> Result<DatabaseConnection> {
    use sea_orm::SqlxSqliteConnector;
    use sea_orm::sqlx::SqlitePool;
    use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
    use std::str::FromStr;

    // Bare file names are accepted as well as sqlite:// URLs.
    let url = if database_url.starts_with("sqlite:") {
        database_url.to_string()
    } else {
        format!("sqlite://{}", database_url)
    };

    let opt = SqliteConnectOptions::from_str(&url)
        .map_err(|e| UrlShortError::database_config(format!("Invalid SQLite URL: {}", e)))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(5));

    let pool = SqlitePool::connect_with(opt).await.map_err(|e| {
        UrlShortError::database_connection(format!("Failed to connect to SQLite: {}", e))
    })?;

    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

/// Connect to MySQL/PostgreSQL with the configured pool size
pub async fn connect_generic(database_url: &str, backend_name: &str) -> Result<DatabaseConnection> {
    let pool_size = crate::config::get_config().database.pool_size;

    let mut opt = ConnectOptions::new(database_url.to_owned());
    opt.max_connections(pool_size)
        .min_connections(pool_size.min(5))
        .connect_timeout(std::time::Duration::from_secs(8))
        .acquire_timeout(std::time::Duration::from_secs(8))
        .idle_timeout(std::time::Duration::from_secs(300))
        .max_lifetime(std::time::Duration::from_secs(3600))
        .sqlx_logging(false);

    Database::connect(opt).await.map_err(|e| {
        UrlShortError::database_connection(format!(
            "Failed to connect to {}: {}",
            backend_name.to_uppercase(),
            e
        ))
    })
}

pub async fn run_migrations(db: &DatabaseConnection) -> Result<()> {
    Migrator::up(db, None)
        .await
        .map_err(|e| UrlShortError::database_operation(format!("Migration failed: {}", e)))?;

    info!("Database migrations completed");
    Ok(())
}
