//! Write operations for SeaOrmStorage

use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, ExprTrait, QueryFilter, SqlErr};
use tracing::{debug, info};

use super::converters::{model_to_record, new_record_to_active_model};
use super::{SeaOrmStorage, retry};
use crate::errors::{Result, UrlShortError};
use crate::storage::{NewUrlRecord, UrlRecord};

use migration::entities::url_record;

impl SeaOrmStorage {
    /// Insert a new record
    ///
    /// A UNIQUE index violation on `short_url` or `custom_alias` comes back
    /// as `TokenConflict` so callers can tell a lost race from a store failure.
    pub async fn insert(&self, record: NewUrlRecord) -> Result<UrlRecord> {
        let db = &self.db;
        let token = record
            .custom_alias
            .as_deref()
            .or(record.short_url.as_deref())
            .unwrap_or_default()
            .to_string();
        let active = new_record_to_active_model(&record);

        let result = retry::with_retry(&format!("insert({})", token), self.retry_policy, || {
            let active = active.clone();
            async move { active.insert(db).await }
        })
        .await;

        match result {
            Ok(model) => {
                info!("URL record #{} stored for '{}'", model.id, token);
                Ok(model_to_record(model))
            }
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(detail)) => {
                    debug!("Unique violation inserting '{}': {}", token, detail);
                    Err(UrlShortError::token_conflict(format!(
                        "Token '{}' is already taken",
                        token
                    )))
                }
                _ => Err(UrlShortError::database_operation(format!(
                    "Failed to insert '{}': {}",
                    token, e
                ))),
            },
        }
    }

    /// Bump `access_count` and stamp `last_accessed_at` in one statement
    pub async fn record_access(&self, id: i64, at: DateTime<Utc>) -> Result<()> {
        let db = &self.db;

        let result = retry::with_retry(&format!("record_access({})", id), self.retry_policy, || async {
            url_record::Entity::update_many()
                .col_expr(
                    url_record::Column::AccessCount,
                    Expr::col(url_record::Column::AccessCount).add(Expr::val(1i64)),
                )
                .col_expr(url_record::Column::LastAccessedAt, Expr::val(at))
                .filter(url_record::Column::Id.eq(id))
                .exec(db)
                .await
        })
        .await
        .map_err(|e| {
            UrlShortError::database_operation(format!(
                "Failed to update access stats for #{}: {}",
                id, e
            ))
        })?;

        if result.rows_affected == 0 {
            return Err(UrlShortError::not_found(format!("URL record #{} not found", id)));
        }
        Ok(())
    }
}
