//! Redirect resolution and visit analytics

use std::sync::Arc;

use tracing::{debug, error};

use crate::analytics::VisitRecorder;
use crate::errors::{Result, UrlMiniError};
use crate::storage::{MappingStore, UrlRecord, now_at_storage_precision};

pub struct RedirectService {
    store: Arc<dyn MappingStore>,
    recorder: Arc<VisitRecorder>,
}

impl RedirectService {
    pub fn new(store: Arc<dyn MappingStore>, recorder: Arc<VisitRecorder>) -> Self {
        Self { store, recorder }
    }

    /// Resolve `short_id` to its destination.
    ///
    /// The visit is queued on the recorder and not awaited, so the caller can
    /// answer with the redirect before the visit is persisted.
    pub async fn resolve(&self, short_id: &str) -> Result<String> {
        let record = self.lookup(short_id).await?;
        self.recorder.record(&record.short_id, now_at_storage_precision());
        Ok(record.redirect_url)
    }

    /// Full current record, including every recorded visit
    pub async fn get_analytics(&self, short_id: &str) -> Result<UrlRecord> {
        self.lookup(short_id).await
    }

    async fn lookup(&self, short_id: &str) -> Result<UrlRecord> {
        match self.store.find_by_short_id(short_id).await {
            Ok(Some(record)) => Ok(record),
            Ok(None) => {
                debug!("Short id not found: {}", short_id);
                Err(UrlMiniError::not_found(format!(
                    "short id not found: {}",
                    short_id
                )))
            }
            Err(e) => {
                error!("Store lookup failed for {}: {}", short_id, e);
                Err(e)
            }
        }
    }
}
