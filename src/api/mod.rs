//! HTTP layer
//!
//! Thin actix-web handlers over the service layer.

pub mod handlers;
pub mod middleware;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use tracing::error;

use crate::errors::UrlShortError;

/// Base URL used when rendering shortened links
#[derive(Clone, Debug)]
pub struct PublicUrl(pub String);

impl PublicUrl {
    pub fn new(base: impl Into<String>) -> Self {
        Self(base.into().trim_end_matches('/').to_string())
    }

    pub fn link_for(&self, token: &str) -> String {
        format!("{}/s/{}", self.0, urlencoding::encode(token))
    }
}

/// Render a service error
///
/// User errors carry their message; internal errors are logged and
/// answered with an opaque body.
pub fn error_response(err: &UrlShortError) -> HttpResponse {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let body = if err.is_internal() {
        error!("Request failed: {}", err);
        "Internal Server Error".to_string()
    } else {
        err.message().to_string()
    };

    HttpResponse::build(status)
        .insert_header(("Content-Type", "text/plain; charset=utf-8"))
        .body(body)
}

/// Register every route of the service
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    use handlers::{FrontendHandler, HealthHandler, RedirectHandler, ShortenHandler};

    cfg.route("/", web::get().to(FrontendHandler::handle_index))
        .route("/shorten", web::post().to(ShortenHandler::handle_shorten))
        .route("/health", web::get().to(HealthHandler::health_check))
        .service(
            web::resource("/s/{token:.*}")
                .route(web::get().to(RedirectHandler::handle_redirect))
                .route(web::head().to(RedirectHandler::handle_redirect)),
        );
}
