//! Service layer
//!
//! Business logic shared by the HTTP handlers and the CLI. Services receive
//! their storage handle at construction time.

mod expiration;
mod redirect;
mod shorten;
mod token;

pub use expiration::ExpirationOption;
pub use redirect::RedirectService;
pub use shorten::{ALIAS_IN_USE_MESSAGE, ShortenService, ShortenSettings};
pub use token::{DEFAULT_TOKEN_LENGTH, RandomTokenGenerator, TokenGenerator};
