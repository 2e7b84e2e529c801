use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use super::StaticConfig;

static CONFIG: OnceLock<ArcSwap<StaticConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Falls back to defaults if `init_config` was never called, so library
/// users and tests that build their own services don't need to initialize it.
pub fn get_config() -> Arc<StaticConfig> {
    CONFIG
        .get_or_init(|| ArcSwap::from_pointee(StaticConfig::default()))
        .load_full()
}

/// Initialize the global configuration
///
/// Loads `path` (or `config.toml` in the current directory) plus
/// `URLSHORT__*` environment overrides. Only the first call has an effect.
///
/// # Examples
/// ```no_run
/// use urlshort::config::init_config;
/// init_config(None);
/// ```
pub fn init_config(path: Option<&str>) {
    CONFIG.get_or_init(|| ArcSwap::from_pointee(StaticConfig::load(path)));
}
