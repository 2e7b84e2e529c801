//! CLI command implementations

mod config_gen;
mod links;

pub use config_gen::config_generate;
pub use links::{link_info, resolve_link, shorten_link};
