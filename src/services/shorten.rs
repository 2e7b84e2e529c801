//! Link creation
//!
//! Resolves the token for a new link (user alias or generated), computes
//! its expiration and persists it.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::expiration::ExpirationOption;
use super::token::TokenGenerator;
use crate::config::{FeaturesConfig, UnmatchedExpiration};
use crate::errors::{Result, UrlShortError};
use crate::storage::{NewUrlRecord, SeaOrmStorage};

pub const ALIAS_IN_USE_MESSAGE: &str = "Custom alias already in use";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortenSettings {
    /// Generated candidates tried before giving up
    pub max_token_attempts: u32,
    pub unmatched_expiration: UnmatchedExpiration,
}

impl Default for ShortenSettings {
    fn default() -> Self {
        Self::from(&FeaturesConfig::default())
    }
}

impl From<&FeaturesConfig> for ShortenSettings {
    fn from(features: &FeaturesConfig) -> Self {
        Self {
            max_token_attempts: features.max_token_attempts.max(1),
            unmatched_expiration: features.unmatched_expiration,
        }
    }
}

pub struct ShortenService {
    storage: Arc<SeaOrmStorage>,
    generator: Arc<dyn TokenGenerator>,
    settings: ShortenSettings,
}

impl ShortenService {
    pub fn new(
        storage: Arc<SeaOrmStorage>,
        generator: Arc<dyn TokenGenerator>,
        settings: ShortenSettings,
    ) -> Self {
        Self {
            storage,
            generator,
            settings,
        }
    }

    pub fn settings(&self) -> ShortenSettings {
        self.settings
    }

    /// Create a short link and return its token
    ///
    /// A non-empty `custom_alias` is used verbatim; otherwise a random token
    /// is generated. Either way the token must be free in the shared
    /// keyspace of generated tokens and aliases.
    pub async fn shorten(
        &self,
        original_url: &str,
        custom_alias: Option<&str>,
        expiration: ExpirationOption,
    ) -> Result<String> {
        if original_url.trim().is_empty() {
            return Err(UrlShortError::validation("URL must not be empty"));
        }

        let now = Utc::now();
        let expires_at = expiration.expires_at(now, self.settings.unmatched_expiration);

        match custom_alias.filter(|alias| !alias.is_empty()) {
            Some(alias) => {
                if self.storage.token_exists(alias).await? {
                    debug!("Alias '{}' rejected: already taken", alias);
                    return Err(UrlShortError::alias_in_use(ALIAS_IN_USE_MESSAGE));
                }

                let record = NewUrlRecord::aliased(alias, original_url, now, expires_at);
                match self.storage.insert(record).await {
                    Ok(_) => {}
                    // Lost a race against a concurrent insert of the same alias.
                    Err(UrlShortError::TokenConflict(_)) => {
                        return Err(UrlShortError::alias_in_use(ALIAS_IN_USE_MESSAGE));
                    }
                    Err(e) => return Err(e),
                }

                info!(
                    "Shortened '{}' -> alias '{}' ({})",
                    original_url,
                    alias,
                    expiration.name()
                );
                Ok(alias.to_string())
            }
            None => {
                let token = self.insert_generated(original_url, now, expires_at).await?;
                info!(
                    "Shortened '{}' -> token '{}' ({})",
                    original_url,
                    token,
                    expiration.name()
                );
                Ok(token)
            }
        }
    }

    async fn insert_generated(
        &self,
        original_url: &str,
        now: chrono::DateTime<Utc>,
        expires_at: Option<chrono::DateTime<Utc>>,
    ) -> Result<String> {
        let max_attempts = self.settings.max_token_attempts;

        for attempt in 1..=max_attempts {
            let token = self.generator.generate()?;

            if self.storage.token_exists(&token).await? {
                debug!(
                    "Generated token '{}' collides (attempt {}/{})",
                    token, attempt, max_attempts
                );
                continue;
            }

            let record = NewUrlRecord::generated(&token, original_url, now, expires_at);
            match self.storage.insert(record).await {
                Ok(_) => return Ok(token),
                Err(UrlShortError::TokenConflict(_)) => {
                    debug!(
                        "Generated token '{}' taken concurrently (attempt {}/{})",
                        token, attempt, max_attempts
                    );
                }
                Err(e) => return Err(e),
            }
        }

        warn!(
            "No free token found after {} attempts for '{}'",
            max_attempts, original_url
        );
        Err(UrlShortError::token_exhausted(format!(
            "No free token after {} attempts",
            max_attempts
        )))
    }
}
