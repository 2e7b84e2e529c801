use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header::{HeaderValue, LOCATION};
use actix_web::{HttpResponse, web};
use chrono::Utc;
use tracing::trace;

use crate::api::error_response;
use crate::errors::UrlShortError;
use crate::services::RedirectService;

pub struct RedirectHandler;

impl RedirectHandler {
    /// `GET /s/{token}`: 302 to the stored URL
    ///
    /// The access is counted only once the `Location` header is known to be
    /// valid.
    pub async fn handle_redirect(
        path: web::Path<String>,
        service: web::Data<Arc<RedirectService>>,
    ) -> HttpResponse {
        let token = path.into_inner();
        trace!("Requested token: {}", token);

        let now = Utc::now();
        let record = match service.locate(&token, now).await {
            Ok(record) => record,
            Err(e) => return error_response(&e),
        };

        let location = match HeaderValue::from_str(&record.original_url) {
            Ok(location) => location,
            Err(e) => {
                return error_response(&UrlShortError::serialization(format!(
                    "Stored URL for '{}' is not a valid Location header: {}",
                    token, e
                )));
            }
        };

        service.count_access(&record, now).await;
        HttpResponse::build(StatusCode::FOUND)
            .insert_header((LOCATION, location))
            .finish()
    }
}
