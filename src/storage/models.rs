use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Sub-second digits kept on stored timestamps.
///
/// Microseconds is the finest precision every SQL backend keeps, so a record
/// reads back exactly as it was written.
pub const TIMESTAMP_PRECISION: u16 = 6;

/// Current time at storage precision
pub fn now_at_storage_precision() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(TIMESTAMP_PRECISION)
}

/// One shortened URL and its visit analytics.
///
/// Serialised as `{ id, shortId, redirectUrl, createdAt, visitCount, visitHistory }`
/// with RFC 3339 timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlRecord {
    pub id: String,
    pub short_id: String,
    pub redirect_url: String,
    pub created_at: DateTime<Utc>,
    pub visit_count: u64,
    pub visit_history: Vec<DateTime<Utc>>,
}

impl UrlRecord {
    /// Fresh record with a new opaque id and zeroed visit fields
    pub fn new(short_id: String, redirect_url: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            short_id,
            redirect_url,
            created_at: now_at_storage_precision(),
            visit_count: 0,
            visit_history: Vec::new(),
        }
    }

    /// Append a visit, keeping the history in non-decreasing order.
    ///
    /// Visits normally arrive in order; a late one is slotted in after every
    /// entry that is not newer than it.
    pub fn push_visit(&mut self, at: DateTime<Utc>) {
        let at = at.trunc_subsecs(TIMESTAMP_PRECISION);
        let pos = self.visit_history.partition_point(|t| *t <= at);
        self.visit_history.insert(pos, at);
        self.visit_count += 1;
    }
}
