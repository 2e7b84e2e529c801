//! Read operations for SeaOrmStorage

use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter};
use tracing::trace;

use super::converters::model_to_record;
use super::{SeaOrmStorage, retry};
use crate::errors::{Result, UrlShortError};
use crate::storage::UrlRecord;

use migration::entities::url_record;

/// Generated tokens and aliases share one keyspace, so every token lookup
/// checks both columns.
fn token_condition(token: &str) -> Condition {
    Condition::any()
        .add(url_record::Column::ShortUrl.eq(token))
        .add(url_record::Column::CustomAlias.eq(token))
}

impl SeaOrmStorage {
    /// Find the record addressed by `token`, either generated or alias
    pub async fn find_by_token(&self, token: &str) -> Result<Option<UrlRecord>> {
        let db = &self.db;

        let model = retry::with_retry(
            &format!("find_by_token({})", token),
            self.retry_policy,
            || async {
                url_record::Entity::find()
                    .filter(token_condition(token))
                    .one(db)
                    .await
            },
        )
        .await
        .map_err(|e| {
            UrlShortError::database_operation(format!("Failed to look up '{}': {}", token, e))
        })?;

        trace!("find_by_token({}) hit={}", token, model.is_some());
        Ok(model.map(model_to_record))
    }

    /// Whether `token` is taken in either namespace
    pub async fn token_exists(&self, token: &str) -> Result<bool> {
        let db = &self.db;

        let count = retry::with_retry(
            &format!("token_exists({})", token),
            self.retry_policy,
            || async {
                url_record::Entity::find()
                    .filter(token_condition(token))
                    .count(db)
                    .await
            },
        )
        .await
        .map_err(|e| {
            UrlShortError::database_operation(format!(
                "Failed to check token '{}': {}",
                token, e
            ))
        })?;

        Ok(count > 0)
    }

    /// Total number of stored records, expired ones included
    pub async fn count(&self) -> Result<u64> {
        let db = &self.db;

        retry::with_retry("count", self.retry_policy, || async {
            url_record::Entity::find().count(db).await
        })
        .await
        .map_err(|e| UrlShortError::database_operation(format!("Failed to count records: {}", e)))
    }
}
