use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::errors::Result;

pub mod backend;
pub mod models;

pub use backend::SeaOrmStorage;
pub use models::{NewUrlRecord, RecordState, StorageConfig, UrlRecord};

pub struct StorageFactory;

impl StorageFactory {
    /// Connect to the configured database and run pending migrations
    pub async fn create(config: &DatabaseConfig) -> Result<Arc<SeaOrmStorage>> {
        let backend_type = backend::infer_backend_from_url(&config.database_url)?;

        let storage = SeaOrmStorage::new(&config.database_url, &backend_type)
            .await?
            .with_retry_policy(backend::retry::RetryPolicy::from_config(config));
        Ok(Arc::new(storage))
    }
}
