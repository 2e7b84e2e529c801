use std::sync::Arc;
use std::time::Duration;

use actix_web::{HttpResponse, web};
use serde::Serialize;
use tracing::{error, trace};

use crate::storage::SeaOrmStorage;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct HealthHandler;

impl HealthHandler {
    /// `GET /health`: 200 when the store answers a count query, 503 otherwise
    pub async fn health_check(storage: web::Data<Arc<SeaOrmStorage>>) -> HttpResponse {
        trace!("Received health check request");
        let backend = storage.get_backend_config().storage_type;

        let (links, error) =
            match tokio::time::timeout(Duration::from_secs(5), storage.count()).await {
                Ok(Ok(count)) => (Some(count), None),
                Ok(Err(e)) => {
                    error!("Storage health check failed: {}", e);
                    (None, Some("database error".to_string()))
                }
                Err(_) => {
                    error!("Storage health check timed out");
                    (None, Some("timeout".to_string()))
                }
            };

        let healthy = error.is_none();
        let body = HealthResponse {
            status: if healthy { "healthy" } else { "unhealthy" },
            backend,
            links,
            error,
        };

        if healthy {
            HttpResponse::Ok().json(body)
        } else {
            HttpResponse::ServiceUnavailable().json(body)
        }
    }
}
