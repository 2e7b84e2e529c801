//! Retry of transient database failures
//!
//! Only connection problems and lock contention are retried. Constraint
//! violations and other logical errors are returned on the first attempt.

use sea_orm::DbErr;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::DatabaseConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 100,
            max_delay_ms: 2000,
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &DatabaseConfig) -> Self {
        Self {
            max_retries: config.retry_count,
            base_delay_ms: config.retry_base_delay_ms,
            max_delay_ms: config.retry_max_delay_ms,
        }
    }

    /// Exponential delay for `attempt` (1-based), capped, without jitter
    pub fn base_delay(&self, attempt: u32) -> u64 {
        let exp = self
            .base_delay_ms
            .saturating_mul(2u64.saturating_pow(attempt.saturating_sub(1)));
        exp.min(self.max_delay_ms)
    }

    /// `base_delay` plus up to 25% random jitter
    fn backoff(&self, attempt: u32) -> u64 {
        use rand::RngExt;
        let capped = self.base_delay(attempt);
        let jitter = rand::rng().random_range(0..=capped / 4);
        capped.saturating_add(jitter)
    }
}

pub fn is_retryable_error(err: &DbErr) -> bool {
    match err {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => true,
        DbErr::Exec(runtime_err) | DbErr::Query(runtime_err) => {
            is_retryable_runtime_error(runtime_err)
        }
        _ => false,
    }
}

fn is_retryable_runtime_error(err: &sea_orm::error::RuntimeErr) -> bool {
    use sea_orm::error::RuntimeErr;

    match err {
        RuntimeErr::SqlxError(sqlx_err) => {
            use std::ops::Deref;
            if let Some(db_err) = sqlx_err.deref().as_database_error()
                && let Some(code) = db_err.code()
            {
                return matches!(
                    code.as_ref(),
                    // MySQL deadlock / lock wait timeout
                    "1213" | "1205" |
                    // PostgreSQL serialization failure / deadlock
                    "40001" | "40P01" |
                    // SQLite BUSY / LOCKED
                    "5" | "6"
                );
            }
            is_retryable_message(&sqlx_err.to_string().to_lowercase())
        }
        RuntimeErr::Internal(msg) => is_retryable_message(&msg.to_lowercase()),
        #[allow(unreachable_patterns)]
        _ => false,
    }
}

fn is_retryable_message(msg: &str) -> bool {
    msg.contains("deadlock")
        || msg.contains("lock wait timeout")
        || msg.contains("database is locked")
        || msg.contains("serialization failure")
}

/// Run `operation`, retrying transient failures with exponential backoff
pub async fn with_retry<T, F, Fut>(
    operation_name: &str,
    policy: RetryPolicy,
    mut operation: F,
) -> Result<T, DbErr>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbErr>>,
{
    let mut attempt = 0;
    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    debug!("'{}' succeeded after {} retries", operation_name, attempt);
                }
                return Ok(result);
            }
            Err(e) if is_retryable_error(&e) && attempt < policy.max_retries => {
                attempt += 1;
                let delay = policy.backoff(attempt);
                warn!(
                    "'{}' failed (attempt {}/{}): {}; retrying in {} ms",
                    operation_name,
                    attempt,
                    policy.max_retries + 1,
                    e,
                    delay
                );
                sleep(Duration::from_millis(delay)).await;
            }
            Err(e) => return Err(e),
        }
    }
}
