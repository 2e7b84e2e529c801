use std::sync::Arc;

use actix_web::{HttpResponse, web};
use askama::Template;
use serde::Deserialize;

use crate::api::{PublicUrl, error_response};
use crate::errors::UrlShortError;
use crate::services::{ExpirationOption, ShortenService};

/// Form posted by the landing page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShortenForm {
    #[serde(default)]
    pub url: String,
    #[serde(default, rename = "customAlias")]
    pub custom_alias: String,
    #[serde(default)]
    pub expiration: String,
}

#[derive(Template)]
#[template(
    source = "Shortened URL: <a href=\"{{ link }}\" target=\"_blank\">{{ link }}</a>",
    ext = "html"
)]
struct ShortenedTemplate<'a> {
    link: &'a str,
}

pub struct ShortenHandler;

impl ShortenHandler {
    /// `POST /shorten`: answers with an HTML fragment linking to the new token
    pub async fn handle_shorten(
        form: web::Form<ShortenForm>,
        service: web::Data<Arc<ShortenService>>,
        public_url: web::Data<PublicUrl>,
    ) -> HttpResponse {
        let form = form.into_inner();
        let expiration = ExpirationOption::from_name(&form.expiration);

        match service
            .shorten(&form.url, Some(form.custom_alias.as_str()), expiration)
            .await
        {
            Ok(token) => {
                let link = public_url.link_for(&token);
                match (ShortenedTemplate { link: &link }).render() {
                    Ok(fragment) => HttpResponse::Ok()
                        .content_type("text/html; charset=utf-8")
                        .body(fragment),
                    Err(e) => error_response(&UrlShortError::serialization(format!(
                        "Failed to render fragment: {}",
                        e
                    ))),
                }
            }
            Err(e) => error_response(&e),
        }
    }
}
