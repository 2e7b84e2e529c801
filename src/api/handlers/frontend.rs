use actix_web::HttpResponse;
use rust_embed::Embed;
use tracing::{error, trace};

/// Landing page and its assets, embedded at build time
#[derive(Embed)]
#[folder = "static/"]
struct StaticAssets;

pub struct FrontendHandler;

impl FrontendHandler {
    /// `GET /`: the landing page with the shorten form
    pub async fn handle_index() -> HttpResponse {
        trace!("Serving landing page");

        match StaticAssets::get("index.html") {
            Some(content) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(content.data.into_owned()),
            None => {
                error!("index.html missing from embedded assets");
                HttpResponse::NotFound()
                    .content_type("text/plain; charset=utf-8")
                    .body("Not Found")
            }
        }
    }
}
