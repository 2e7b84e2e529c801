//! Link resolution

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, trace, warn};

use crate::errors::{Result, UrlShortError};
use crate::storage::{SeaOrmStorage, UrlRecord};

pub struct RedirectService {
    storage: Arc<SeaOrmStorage>,
}

impl RedirectService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// Resolve `token` to its destination, counting the access
    pub async fn resolve(&self, token: &str) -> Result<String> {
        self.resolve_at(token, Utc::now()).await
    }

    /// Resolve as of `now`
    ///
    /// Expired links fail before any stats are written. The stats update
    /// itself is best effort: a failure is logged and the URL is still
    /// returned.
    pub async fn resolve_at(&self, token: &str, now: DateTime<Utc>) -> Result<String> {
        let record = self.locate(token, now).await?;
        self.count_access(&record, now).await;

        trace!("Resolved '{}' -> '{}'", token, record.original_url);
        Ok(record.original_url)
    }

    /// Live record for `token` as of `now`, without counting the access
    pub async fn locate(&self, token: &str, now: DateTime<Utc>) -> Result<UrlRecord> {
        let record = self.lookup(token).await?;

        if record.is_expired_at(now) {
            debug!("Token '{}' expired at {:?}", token, record.expires_at);
            return Err(UrlShortError::expired("This URL has expired"));
        }
        Ok(record)
    }

    /// Bump the access count and timestamp; failures are only logged
    pub async fn count_access(&self, record: &UrlRecord, now: DateTime<Utc>) {
        if let Err(e) = self.storage.record_access(record.id, now).await {
            warn!(
                "Failed to update access count and timestamp for '{}': {}",
                record.token(),
                e
            );
        }
    }

    /// Full record for `token`, expired or not, without touching stats
    pub async fn info(&self, token: &str) -> Result<UrlRecord> {
        self.lookup(token).await
    }

    async fn lookup(&self, token: &str) -> Result<UrlRecord> {
        if token.is_empty() {
            return Err(UrlShortError::not_found("Empty token"));
        }

        self.storage
            .find_by_token(token)
            .await?
            .ok_or_else(|| UrlShortError::not_found(format!("No link for '{}'", token)))
    }
}
