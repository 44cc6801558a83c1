use chrono::{DateTime, Utc};

use crate::storage::UrlRecord;
use migration::entities::url_record;

/// Assemble a record from its row and its ordered visit timestamps
pub fn model_to_record(model: url_record::Model, visit_history: Vec<DateTime<Utc>>) -> UrlRecord {
    UrlRecord {
        id: model.id,
        short_id: model.short_id,
        redirect_url: model.redirect_url,
        created_at: model.created_at,
        visit_count: model.visit_count.max(0) as u64,
        visit_history,
    }
}

/// Insert model for a brand-new record; visit fields always start at zero
pub fn record_to_active_model(record: &UrlRecord) -> url_record::ActiveModel {
    use sea_orm::ActiveValue::Set;

    url_record::ActiveModel {
        id: Set(record.id.clone()),
        short_id: Set(record.short_id.clone()),
        redirect_url: Set(record.redirect_url.clone()),
        created_at: Set(record.created_at),
        visit_count: Set(0),
    }
}
