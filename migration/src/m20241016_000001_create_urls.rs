//! Creates the `urls` table
//!
//! `short_url` and `custom_alias` each carry a UNIQUE index. NULLs are
//! allowed in both, so a record populates only the column that identifies it.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Urls::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Urls::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Urls::ShortUrl).string_len(255).null())
                    .col(ColumnDef::new(Urls::CustomAlias).string_len(255).null())
                    .col(ColumnDef::new(Urls::OriginalUrl).text().not_null())
                    .col(
                        ColumnDef::new(Urls::AccessCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Urls::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Urls::LastAccessedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Urls::ExpiresAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // The two unique indexes are the real guard against concurrent
        // allocation of the same token.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_urls_short_url")
                    .table(Urls::Table)
                    .col(Urls::ShortUrl)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_urls_custom_alias")
                    .table(Urls::Table)
                    .col(Urls::CustomAlias)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_urls_custom_alias")
                    .table(Urls::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_urls_short_url")
                    .table(Urls::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Urls::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Urls {
    Table,
    Id,
    ShortUrl,
    CustomAlias,
    OriginalUrl,
    AccessCount,
    CreatedAt,
    LastAccessedAt,
    ExpiresAt,
}
