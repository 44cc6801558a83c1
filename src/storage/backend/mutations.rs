//! Write operations for SeaOrmStorage

use chrono::{DateTime, SubsecRound, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveValue::{NotSet, Set},
    ColumnTrait, DbErr, EntityTrait, ExprTrait, QueryFilter, TransactionTrait,
};
use tracing::{debug, info};

use super::SeaOrmStorage;
use super::converters::record_to_active_model;
use crate::errors::{Result, UrlMiniError};
use crate::storage::UrlRecord;
use crate::storage::models::TIMESTAMP_PRECISION;

use migration::entities::{url_record, url_visit};

impl SeaOrmStorage {
    /// Plain INSERT; the UNIQUE index on `short_id` is the uniqueness check
    pub async fn insert_record(&self, record: UrlRecord) -> Result<UrlRecord> {
        let db = &self.db;
        // the returned record must match what a later read yields
        let record = UrlRecord {
            created_at: record.created_at.trunc_subsecs(TIMESTAMP_PRECISION),
            ..record
        };
        let active_model = record_to_active_model(&record);

        self.retry.run(
            &format!("insert({})", record.short_id),
            || {
                let active_model = active_model.clone();
                async move {
                    url_record::Entity::insert(active_model)
                        .exec_without_returning(db)
                        .await
                }
            },
        )
        .await
        .map_err(UrlMiniError::from)?;

        info!(
            "Short url created: {} -> {}",
            record.short_id, record.redirect_url
        );
        Ok(UrlRecord {
            visit_count: 0,
            visit_history: Vec::new(),
            ..record
        })
    }

    /// Counter bump and history append in one transaction.
    ///
    /// `visit_count = visit_count + 1` is evaluated by the database, so
    /// concurrent visits never overwrite each other.
    pub async fn record_visit(&self, short_id: &str, at: DateTime<Utc>) -> Result<()> {
        let db = &self.db;
        let at = at.trunc_subsecs(TIMESTAMP_PRECISION);

        let found = self.retry.run(
            &format!("increment_visit({})", short_id),
            || async {
                let txn = db.begin().await?;

                let updated = url_record::Entity::update_many()
                    .col_expr(
                        url_record::Column::VisitCount,
                        Expr::col(url_record::Column::VisitCount).add(Expr::val(1i64)),
                    )
                    .filter(url_record::Column::ShortId.eq(short_id))
                    .exec(&txn)
                    .await?;

                let found = if updated.rows_affected == 0 {
                    txn.rollback().await?;
                    false
                } else {
                    url_visit::Entity::insert(url_visit::ActiveModel {
                        id: NotSet,
                        short_id: Set(short_id.to_string()),
                        visited_at: Set(at),
                    })
                    .exec_without_returning(&txn)
                    .await?;
                    txn.commit().await?;
                    true
                };

                Ok::<_, DbErr>(found)
            },
        )
        .await
        .map_err(UrlMiniError::from)?;

        if !found {
            return Err(UrlMiniError::not_found(format!(
                "short id not found: {}",
                short_id
            )));
        }

        debug!("Visit recorded for {}", short_id);
        Ok(())
    }
}
