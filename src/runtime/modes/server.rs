//! Server mode
//!
//! Boots storage and services, then serves HTTP until the server exits or a
//! shutdown signal arrives.

use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::api::configure_routes;
use crate::api::middleware::TimingMiddleware;
use crate::config::StaticConfig;
use crate::runtime::lifetime;

pub async fn run_server(config: &StaticConfig) -> Result<()> {
    let context = lifetime::startup::prepare_startup(config).await?;

    let storage = context.storage.clone();
    let shorten_service = context.shorten_service.clone();
    let redirect_service = context.redirect_service.clone();
    let public_url = context.public_url.clone();

    let db_for_shutdown = storage.get_db().clone();
    let cpu_count = config.server.cpu_count.max(1);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    info!(
        "Starting server at http://{} ({} workers, links under {}/s/)",
        bind_address, cpu_count, public_url.0
    );

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TimingMiddleware)
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("Cache-Control", "no-cache, no-store, must-revalidate")))
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(shorten_service.clone()))
            .app_data(web::Data::new(redirect_service.clone()))
            .app_data(web::Data::new(public_url.clone()))
            .app_data(web::FormConfig::default().limit(64 * 1024))
            .configure(configure_routes)
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .workers(cpu_count)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    tokio::select! {
        res = server => {
            res.context("HTTP server terminated with an error")?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(&db_for_shutdown) => {
            warn!("Graceful shutdown completed");
        }
    }

    Ok(())
}
