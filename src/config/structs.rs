use serde::{Deserialize, Serialize};

use crate::errors::{Result, UrlShortError};

/// What an expiration option outside the known table resolves to
///
/// `Never` treats a blank or unknown option like "Lifetime". `Immediate`
/// keeps the historical behavior where the link expires at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnmatchedExpiration {
    #[default]
    Never,
    Immediate,
}

impl std::fmt::Display for UnmatchedExpiration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Never => write!(f, "never"),
            Self::Immediate => write!(f, "immediate"),
        }
    }
}

impl std::str::FromStr for UnmatchedExpiration {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "never" => Ok(Self::Never),
            "immediate" => Ok(Self::Immediate),
            _ => Err(format!(
                "Invalid unmatched expiration policy: '{}'. Valid: never, immediate",
                s
            )),
        }
    }
}

/// Static configuration, loaded once at startup
///
/// Priority: ENV > TOML file > defaults.
/// ENV prefix `URLSHORT`, separator `__`, e.g. `URLSHORT__SERVER__PORT=9999`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub features: FeaturesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

impl StaticConfig {
    /// Load from `path` (or `config.toml`) and the environment
    ///
    /// A missing file is not an error. A file or variable that fails to
    /// deserialize falls back to defaults with a message on stderr, since
    /// logging is not initialized yet at this point.
    pub fn load(path: Option<&str>) -> Self {
        use config::{Config, Environment, File};

        let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

        let builder = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("URLSHORT")
                    .separator("__")
                    .try_parsing(true),
            );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<StaticConfig>() {
                Ok(config) => {
                    if std::path::Path::new(path).exists() {
                        eprintln!("[INFO] Configuration loaded from: {}", path);
                    }
                    config
                }
                Err(e) => {
                    eprintln!("[ERROR] Failed to deserialize config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] Failed to build config: {}", e);
                Self::default()
            }
        }
    }

    pub fn generate_sample_config() -> Result<String> {
        Ok(toml::to_string_pretty(&Self::default())?)
    }

    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path.as_ref(), content).map_err(|e| {
            UrlShortError::file_operation(format!(
                "Failed to write {}: {}",
                path.as_ref().display(),
                e
            ))
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
    /// Base used to build the link handed back by `/shorten`
    #[serde(default = "default_public_url")]
    pub public_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_database_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturesConfig {
    #[serde(default = "default_token_length")]
    pub token_length: usize,
    #[serde(default = "default_max_token_attempts")]
    pub max_token_attempts: u32,
    #[serde(default)]
    pub unmatched_expiration: UnmatchedExpiration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Defaults
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_public_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_database_url() -> String {
    "urlshortener.db".to_string()
}

fn default_database_pool_size() -> u32 {
    10
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_base_delay_ms() -> u64 {
    100
}

fn default_retry_max_delay_ms() -> u64 {
    2000
}

fn default_token_length() -> usize {
    8
}

fn default_max_token_attempts() -> u32 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
            public_url: default_public_url(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            pool_size: default_database_pool_size(),
            retry_count: default_retry_count(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
        }
    }
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            token_length: default_token_length(),
            max_token_attempts: default_max_token_attempts(),
            unmatched_expiration: UnmatchedExpiration::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StaticConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.database_url, "urlshortener.db");
        assert_eq!(config.features.token_length, 8);
        assert_eq!(config.features.max_token_attempts, 10);
        assert_eq!(
            config.features.unmatched_expiration,
            UnmatchedExpiration::Never
        );
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: StaticConfig = toml::from_str(
            r#"
            [features]
            unmatched_expiration = "immediate"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.features.unmatched_expiration,
            UnmatchedExpiration::Immediate
        );
        assert_eq!(config.features.token_length, 8);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_unmatched_expiration_from_str() {
        assert_eq!(
            "NEVER".parse::<UnmatchedExpiration>(),
            Ok(UnmatchedExpiration::Never)
        );
        assert_eq!(
            "immediate".parse::<UnmatchedExpiration>(),
            Ok(UnmatchedExpiration::Immediate)
        );
        assert!("sometimes".parse::<UnmatchedExpiration>().is_err());
    }

    #[test]
    fn test_sample_config_roundtrips() {
        let sample = StaticConfig::generate_sample_config().unwrap();
        assert!(sample.contains("[server]"));
        let parsed: StaticConfig = toml::from_str(&sample).unwrap();
        assert_eq!(parsed.server.public_url, "http://127.0.0.1:8080");
    }
}
