//! Visit history table
//!
//! One row per recorded redirect. Rows are only ever appended.

use sea_orm_migration::prelude::*;

use crate::timestamp_column;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();

        manager
            .create_table(
                Table::create()
                    .table(UrlVisits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UrlVisits::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UrlVisits::ShortId).string_len(16).not_null())
                    .col(timestamp_column(backend, UrlVisits::VisitedAt).not_null())
                    .to_owned(),
            )
            .await?;

        // history reads are always "all visits of one short id, oldest first"
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_url_visits_short_id_visited_at")
                    .table(UrlVisits::Table)
                    .col(UrlVisits::ShortId)
                    .col(UrlVisits::VisitedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_url_visits_short_id_visited_at")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(UrlVisits::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UrlVisits {
    Table,
    Id,
    ShortId,
    VisitedAt,
}
