//! SeaORM storage backend
//!
//! Single-table store for URL records, supporting SQLite, MySQL/MariaDB
//! and PostgreSQL.

mod connection;
mod converters;
mod mutations;
mod query;
pub mod retry;

use sea_orm::DatabaseConnection;
use tracing::info;

use crate::errors::{Result, UrlShortError};
use crate::storage::models::StorageConfig;

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use converters::{model_to_record, new_record_to_active_model};

/// Infer the database type from its URL
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite://")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(UrlShortError::database_config(format!(
            "Cannot infer database type from URL: {}. Supported: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// SeaORM-based storage backend
///
/// Cheap to clone; the connection pool is shared between clones.
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
    retry_policy: retry::RetryPolicy,
}

impl SeaOrmStorage {
    /// Connect and bring the schema up to date
    pub async fn new(database_url: &str, backend_name: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(UrlShortError::database_config("database_url is not set"));
        }

        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, backend_name).await?
        };

        run_migrations(&db).await?;

        info!("{} storage initialized", backend_name.to_uppercase());
        Ok(SeaOrmStorage {
            db,
            backend_name: backend_name.to_string(),
            retry_policy: retry::RetryPolicy::default(),
        })
    }

    pub fn with_retry_policy(mut self, retry_policy: retry::RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    pub fn get_backend_config(&self) -> StorageConfig {
        StorageConfig {
            storage_type: self.backend_name.clone(),
        }
    }

    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}
