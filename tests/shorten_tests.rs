//! Shorten service tests
//!
//! Token generation, custom aliases, collision handling and expiration
//! against a real SQLite database.

use std::sync::Arc;
use std::sync::Mutex;

use chrono::{Duration, Utc};
use sea_orm::ConnectionTrait;
use tempfile::TempDir;

use urlshort::config::UnmatchedExpiration;
use urlshort::errors::{Result, UrlShortError};
use urlshort::services::{
    ExpirationOption, RandomTokenGenerator, RedirectService, ShortenService, ShortenSettings,
    TokenGenerator,
};
use urlshort::storage::{NewUrlRecord, SeaOrmStorage};

// =============================================================================
// Test Setup
// =============================================================================

async fn create_temp_storage() -> (Arc<SeaOrmStorage>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("shorten_test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = SeaOrmStorage::new(&db_url, "sqlite")
        .await
        .expect("Failed to create storage");
    (Arc::new(storage), temp_dir)
}

fn random_service(storage: Arc<SeaOrmStorage>) -> ShortenService {
    ShortenService::new(
        storage,
        Arc::new(RandomTokenGenerator::default()),
        ShortenSettings::default(),
    )
}

/// Hands out a fixed sequence of tokens, then fails
struct SequenceGenerator {
    tokens: Mutex<Vec<String>>,
}

impl SequenceGenerator {
    fn new(tokens: &[&str]) -> Self {
        let mut tokens: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
        tokens.reverse();
        Self {
            tokens: Mutex::new(tokens),
        }
    }
}

impl TokenGenerator for SequenceGenerator {
    fn generate(&self) -> Result<String> {
        self.tokens
            .lock()
            .unwrap()
            .pop()
            .ok_or_else(|| UrlShortError::random_source("sequence exhausted"))
    }
}

/// Always produces the same token
struct FixedGenerator(&'static str);

impl TokenGenerator for FixedGenerator {
    fn generate(&self) -> Result<String> {
        Ok(self.0.to_string())
    }
}

/// Simulates an unavailable entropy source
struct BrokenGenerator;

impl TokenGenerator for BrokenGenerator {
    fn generate(&self) -> Result<String> {
        Err(UrlShortError::random_source("entropy source unavailable"))
    }
}

// =============================================================================
// Generated tokens
// =============================================================================

#[tokio::test]
async fn test_generated_token_resolves() {
    let (storage, _dir) = create_temp_storage().await;
    let shorten = random_service(storage.clone());
    let redirect = RedirectService::new(storage);

    let token = shorten
        .shorten("https://example.com", None, ExpirationOption::OneDay)
        .await
        .unwrap();

    assert_eq!(token.len(), 8);
    assert!(
        token
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    );

    let url = redirect.resolve(&token).await.unwrap();
    assert_eq!(url, "https://example.com");

    let record = redirect.info(&token).await.unwrap();
    assert_eq!(record.access_count, 1);
    assert_eq!(record.short_url.as_deref(), Some(token.as_str()));
    assert!(record.custom_alias.is_none());
}

#[tokio::test]
async fn test_empty_alias_generates_token() {
    let (storage, _dir) = create_temp_storage().await;
    let shorten = random_service(storage);

    let token = shorten
        .shorten("https://example.com", Some(""), ExpirationOption::OneDay)
        .await
        .unwrap();
    assert_eq!(token.len(), 8);
}

#[tokio::test]
async fn test_many_generated_tokens_coexist() {
    let (storage, _dir) = create_temp_storage().await;
    let shorten = random_service(storage.clone());

    let mut tokens = std::collections::HashSet::new();
    for i in 0..20 {
        let token = shorten
            .shorten(
                &format!("https://example.com/{}", i),
                None,
                ExpirationOption::Lifetime,
            )
            .await
            .unwrap();
        tokens.insert(token);
    }

    assert_eq!(tokens.len(), 20);
    assert_eq!(storage.count().await.unwrap(), 20);
}

#[tokio::test]
async fn test_generator_collision_is_retried() {
    let (storage, _dir) = create_temp_storage().await;
    let now = Utc::now();
    storage
        .insert(NewUrlRecord::generated("taken001", "https://a.example", now, None))
        .await
        .unwrap();

    let shorten = ShortenService::new(
        storage,
        Arc::new(SequenceGenerator::new(&["taken001", "fresh002"])),
        ShortenSettings::default(),
    );

    let token = shorten
        .shorten("https://b.example", None, ExpirationOption::Lifetime)
        .await
        .unwrap();
    assert_eq!(token, "fresh002");
}

#[tokio::test]
async fn test_generator_collision_with_alias_is_retried() {
    let (storage, _dir) = create_temp_storage().await;
    let now = Utc::now();
    storage
        .insert(NewUrlRecord::aliased("mylink01", "https://a.example", now, None))
        .await
        .unwrap();

    let shorten = ShortenService::new(
        storage,
        Arc::new(SequenceGenerator::new(&["mylink01", "fresh002"])),
        ShortenSettings::default(),
    );

    let token = shorten
        .shorten("https://b.example", None, ExpirationOption::Lifetime)
        .await
        .unwrap();
    assert_eq!(token, "fresh002");
}

#[tokio::test]
async fn test_collision_cap_exhausted() {
    let (storage, _dir) = create_temp_storage().await;
    storage
        .insert(NewUrlRecord::generated(
            "samesame",
            "https://a.example",
            Utc::now(),
            None,
        ))
        .await
        .unwrap();

    let shorten = ShortenService::new(
        storage.clone(),
        Arc::new(FixedGenerator("samesame")),
        ShortenSettings {
            max_token_attempts: 3,
            unmatched_expiration: UnmatchedExpiration::Never,
        },
    );

    let err = shorten
        .shorten("https://b.example", None, ExpirationOption::Lifetime)
        .await
        .unwrap_err();
    assert!(matches!(err, UrlShortError::TokenExhausted(_)));
    assert_eq!(storage.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_generator_failure_propagates() {
    let (storage, _dir) = create_temp_storage().await;
    let shorten = ShortenService::new(
        storage.clone(),
        Arc::new(BrokenGenerator),
        ShortenSettings::default(),
    );

    let err = shorten
        .shorten("https://example.com", None, ExpirationOption::OneDay)
        .await
        .unwrap_err();
    assert!(matches!(err, UrlShortError::RandomSource(_)));
    assert_eq!(err.http_status(), 500);
    assert_eq!(storage.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_generated_token_lost_at_insert_is_retried() {
    // The trigger claims "taken001" between the existence check and the
    // insert, so only the UNIQUE index catches it.
    let (storage, _dir) = create_temp_storage().await;
    storage
        .get_db()
        .execute_unprepared(
            "CREATE TRIGGER claim_token BEFORE INSERT ON urls \
             WHEN NEW.short_url = 'taken001' BEGIN \
             INSERT INTO urls (short_url, original_url, access_count, created_at) \
             VALUES ('taken001', 'https://other.example', 0, '2024-01-01 00:00:00'); END;",
        )
        .await
        .unwrap();

    let shorten = ShortenService::new(
        storage.clone(),
        Arc::new(SequenceGenerator::new(&["taken001", "fresh002"])),
        ShortenSettings::default(),
    );

    let token = shorten
        .shorten("https://b.example", None, ExpirationOption::Lifetime)
        .await
        .unwrap();
    assert_eq!(token, "fresh002");
    assert_eq!(storage.count().await.unwrap(), 1);
    assert!(!storage.token_exists("taken001").await.unwrap());
}

// =============================================================================
// Custom aliases
// =============================================================================

#[tokio::test]
async fn test_alias_returned_verbatim_and_reuse_rejected() {
    let (storage, _dir) = create_temp_storage().await;
    let shorten = random_service(storage.clone());
    let redirect = RedirectService::new(storage);

    let token = shorten
        .shorten(
            "https://example.com",
            Some("mylink"),
            ExpirationOption::Lifetime,
        )
        .await
        .unwrap();
    assert_eq!(token, "mylink");
    assert_eq!(redirect.resolve("mylink").await.unwrap(), "https://example.com");

    let err = shorten
        .shorten(
            "https://other.example",
            Some("mylink"),
            ExpirationOption::Lifetime,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, UrlShortError::AliasInUse(_)));
    assert_eq!(err.message(), "Custom alias already in use");
    assert_eq!(err.http_status(), 400);

    // The original mapping is untouched
    assert_eq!(redirect.resolve("mylink").await.unwrap(), "https://example.com");
}

#[tokio::test]
async fn test_alias_matching_generated_token_rejected() {
    let (storage, _dir) = create_temp_storage().await;
    let shorten = random_service(storage);

    let token = shorten
        .shorten("https://example.com", None, ExpirationOption::OneDay)
        .await
        .unwrap();

    let err = shorten
        .shorten(
            "https://other.example",
            Some(&token),
            ExpirationOption::OneDay,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, UrlShortError::AliasInUse(_)));
}

#[tokio::test]
async fn test_alias_in_use_even_when_expired() {
    let (storage, _dir) = create_temp_storage().await;
    let now = Utc::now();
    storage
        .insert(NewUrlRecord::aliased(
            "oldlink",
            "https://a.example",
            now - Duration::days(2),
            Some(now - Duration::days(1)),
        ))
        .await
        .unwrap();

    let shorten = random_service(storage);
    let err = shorten
        .shorten("https://b.example", Some("oldlink"), ExpirationOption::OneDay)
        .await
        .unwrap_err();
    assert!(matches!(err, UrlShortError::AliasInUse(_)));
}

#[tokio::test]
async fn test_alias_lost_at_insert_is_in_use() {
    let (storage, _dir) = create_temp_storage().await;
    storage
        .get_db()
        .execute_unprepared(
            "CREATE TRIGGER claim_alias BEFORE INSERT ON urls \
             WHEN NEW.custom_alias = 'race' BEGIN \
             INSERT INTO urls (custom_alias, original_url, access_count, created_at) \
             VALUES ('race', 'https://other.example', 0, '2024-01-01 00:00:00'); END;",
        )
        .await
        .unwrap();

    let shorten = random_service(storage.clone());
    let err = shorten
        .shorten("https://b.example", Some("race"), ExpirationOption::Lifetime)
        .await
        .unwrap_err();
    assert!(matches!(err, UrlShortError::AliasInUse(_)));
    assert_eq!(err.message(), "Custom alias already in use");
    assert_eq!(storage.count().await.unwrap(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_alias_claims_have_one_winner() {
    let (storage, _dir) = create_temp_storage().await;
    let shorten = Arc::new(random_service(storage.clone()));

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let shorten = shorten.clone();
            tokio::spawn(async move {
                shorten
                    .shorten(
                        &format!("https://example.com/{}", i),
                        Some("race"),
                        ExpirationOption::Lifetime,
                    )
                    .await
            })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(token) => {
                assert_eq!(token, "race");
                winners += 1;
            }
            Err(e) => assert!(matches!(e, UrlShortError::AliasInUse(_)), "{:?}", e),
        }
    }

    assert_eq!(winners, 1);
    assert_eq!(storage.count().await.unwrap(), 1);
}

// =============================================================================
// Validation & expiration
// =============================================================================

#[tokio::test]
async fn test_empty_url_rejected() {
    let (storage, _dir) = create_temp_storage().await;
    let shorten = random_service(storage.clone());

    for url in ["", "   "] {
        let err = shorten
            .shorten(url, None, ExpirationOption::OneDay)
            .await
            .unwrap_err();
        assert!(matches!(err, UrlShortError::Validation(_)));
    }
    assert_eq!(storage.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_named_expirations_are_stored() {
    let (storage, _dir) = create_temp_storage().await;
    let shorten = random_service(storage.clone());
    let redirect = RedirectService::new(storage);

    let before = Utc::now();
    let day = shorten
        .shorten("https://example.com", None, ExpirationOption::OneDay)
        .await
        .unwrap();
    let lifetime = shorten
        .shorten("https://example.com", None, ExpirationOption::Lifetime)
        .await
        .unwrap();
    let after = Utc::now();

    let day_record = redirect.info(&day).await.unwrap();
    let expires_at = day_record.expires_at.expect("1 Day must set an expiry");
    assert!(expires_at >= before + Duration::days(1));
    assert!(expires_at <= after + Duration::days(1));

    let lifetime_record = redirect.info(&lifetime).await.unwrap();
    assert!(lifetime_record.expires_at.is_none());
}

#[tokio::test]
async fn test_unmatched_expiration_never() {
    let (storage, _dir) = create_temp_storage().await;
    let shorten = ShortenService::new(
        storage.clone(),
        Arc::new(RandomTokenGenerator::default()),
        ShortenSettings {
            max_token_attempts: 10,
            unmatched_expiration: UnmatchedExpiration::Never,
        },
    );
    let redirect = RedirectService::new(storage);

    let token = shorten
        .shorten(
            "https://example.com",
            None,
            ExpirationOption::from("2 Weeks"),
        )
        .await
        .unwrap();

    assert!(redirect.info(&token).await.unwrap().expires_at.is_none());
    assert_eq!(redirect.resolve(&token).await.unwrap(), "https://example.com");
}

#[tokio::test]
async fn test_unmatched_expiration_immediate() {
    let (storage, _dir) = create_temp_storage().await;
    let shorten = ShortenService::new(
        storage.clone(),
        Arc::new(RandomTokenGenerator::default()),
        ShortenSettings {
            max_token_attempts: 10,
            unmatched_expiration: UnmatchedExpiration::Immediate,
        },
    );
    let redirect = RedirectService::new(storage);

    let token = shorten
        .shorten("https://example.com", None, ExpirationOption::from(""))
        .await
        .unwrap();

    let record = redirect.info(&token).await.unwrap();
    assert_eq!(record.expires_at, Some(record.created_at));

    let later = record.created_at + Duration::seconds(1);
    let err = redirect.resolve_at(&token, later).await.unwrap_err();
    assert!(matches!(err, UrlShortError::Expired(_)));
}
