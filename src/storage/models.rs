use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored short link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRecord {
    pub id: i64,
    /// Generated token, `None` when the record was created with an alias
    pub short_url: Option<String>,
    pub custom_alias: Option<String>,
    pub original_url: String,
    #[serde(default)]
    pub access_count: u64,
    pub created_at: DateTime<Utc>,
    pub last_accessed_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Redirect-side view of a record's lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordState {
    Active,
    Expired,
}

impl UrlRecord {
    /// The token that addresses this record
    pub fn token(&self) -> &str {
        self.custom_alias
            .as_deref()
            .or(self.short_url.as_deref())
            .unwrap_or_default()
    }

    /// A record is expired strictly after its `expires_at` instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now > expires_at)
    }

    pub fn state_at(&self, now: DateTime<Utc>) -> RecordState {
        if self.is_expired_at(now) {
            RecordState::Expired
        } else {
            RecordState::Active
        }
    }
}

/// Insert payload; `id`, counters and access time are assigned by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlRecord {
    pub short_url: Option<String>,
    pub custom_alias: Option<String>,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl NewUrlRecord {
    pub fn generated(
        token: impl Into<String>,
        original_url: impl Into<String>,
        created_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            short_url: Some(token.into()),
            custom_alias: None,
            original_url: original_url.into(),
            created_at,
            expires_at,
        }
    }

    pub fn aliased(
        alias: impl Into<String>,
        original_url: impl Into<String>,
        created_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            short_url: None,
            custom_alias: Some(alias.into()),
            original_url: original_url.into(),
            created_at,
            expires_at,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StorageConfig {
    pub storage_type: String,
}
