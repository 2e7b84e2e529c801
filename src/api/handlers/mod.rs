pub mod frontend;
pub mod health;
pub mod redirect;
pub mod shorten;

pub use frontend::FrontendHandler;
pub use health::HealthHandler;
pub use redirect::RedirectHandler;
pub use shorten::{ShortenForm, ShortenHandler};
