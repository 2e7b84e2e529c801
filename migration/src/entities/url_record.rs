//! `urls` table entity
//!
//! A record is addressed either by its generated `short_url` or by its
//! user-chosen `custom_alias`; exactly one of the two is populated.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "urls")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique, nullable)]
    pub short_url: Option<String>,
    #[sea_orm(unique, nullable)]
    pub custom_alias: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub original_url: String,
    pub access_count: i64,
    pub created_at: DateTimeUtc,
    pub last_accessed_at: Option<DateTimeUtc>,
    pub expires_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
