//! Read operations for SeaOrmStorage

use sea_orm::{
    ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use tracing::error;

use super::SeaOrmStorage;
use super::converters::model_to_record;
use crate::errors::{Result, UrlMiniError};
use crate::storage::UrlRecord;

use migration::entities::{url_record, url_visit};

impl SeaOrmStorage {
    /// Load a record together with its full visit history.
    ///
    /// Both reads share one transaction so the count and history come from the
    /// same snapshot.
    pub async fn get(&self, short_id: &str) -> Result<Option<UrlRecord>> {
        let db = &self.db;

        let result = self.retry.run(&format!("get({})", short_id), || async {
            let txn = db.begin().await?;

            let model = url_record::Entity::find()
                .filter(url_record::Column::ShortId.eq(short_id))
                .one(&txn)
                .await?;

            let record = match model {
                Some(model) => {
                    let visits = url_visit::Entity::find()
                        .filter(url_visit::Column::ShortId.eq(short_id))
                        .order_by_asc(url_visit::Column::VisitedAt)
                        .order_by_asc(url_visit::Column::Id)
                        .all(&txn)
                        .await?;
                    let history = visits.into_iter().map(|v| v.visited_at).collect();
                    Some(model_to_record(model, history))
                }
                None => None,
            };

            txn.commit().await?;
            Ok::<_, DbErr>(record)
        })
        .await;

        result.map_err(|e| {
            error!("Failed to load short id {}: {}", short_id, e);
            UrlMiniError::from(e)
        })
    }

    pub async fn count_records(&self) -> Result<u64> {
        let db = &self.db;

        self.retry.run("count", || async {
            url_record::Entity::find().count(db).await
        })
        .await
        .map_err(UrlMiniError::from)
    }
}
