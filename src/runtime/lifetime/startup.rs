use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::api::PublicUrl;
use crate::config::StaticConfig;
use crate::services::{RandomTokenGenerator, RedirectService, ShortenService, ShortenSettings};
use crate::storage::{SeaOrmStorage, StorageFactory};

/// Everything the HTTP server and the CLI need after boot
pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub shorten_service: Arc<ShortenService>,
    pub redirect_service: Arc<RedirectService>,
    pub public_url: PublicUrl,
}

impl StartupContext {
    /// Wire the services around an already opened storage
    pub fn from_storage(storage: Arc<SeaOrmStorage>, config: &StaticConfig) -> Self {
        let generator = Arc::new(RandomTokenGenerator::new(config.features.token_length));
        let shorten_service = Arc::new(ShortenService::new(
            storage.clone(),
            generator,
            ShortenSettings::from(&config.features),
        ));
        let redirect_service = Arc::new(RedirectService::new(storage.clone()));

        Self {
            storage,
            shorten_service,
            redirect_service,
            public_url: PublicUrl::new(config.server.public_url.clone()),
        }
    }
}

/// Open the database, run migrations and build the services
pub async fn prepare_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = StorageFactory::create(&config.database)
        .await
        .context("Failed to create storage backend")?;
    info!(
        "Using storage backend: {}",
        storage.get_backend_config().storage_type
    );

    let context = StartupContext::from_storage(storage, config);

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );
    Ok(context)
}
