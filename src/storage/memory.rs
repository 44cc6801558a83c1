//! In-memory mapping store
//!
//! Backs `memory://` deployments and the test suites. Uniqueness and visit
//! atomicity come from DashMap's per-shard locks.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::trace;

use super::{MappingStore, UrlRecord};
use crate::errors::{Result, UrlMiniError};

#[derive(Default)]
pub struct MemoryStore {
    records: DashMap<String, UrlRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MappingStore for MemoryStore {
    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<UrlRecord>> {
        Ok(self.records.get(short_id).map(|r| r.value().clone()))
    }

    async fn insert(&self, record: UrlRecord) -> Result<UrlRecord> {
        match self.records.entry(record.short_id.clone()) {
            Entry::Occupied(_) => Err(UrlMiniError::duplicate_key(format!(
                "short id already exists: {}",
                record.short_id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                trace!("MemoryStore: inserted {}", record.short_id);
                Ok(record)
            }
        }
    }

    async fn increment_visit(&self, short_id: &str, at: DateTime<Utc>) -> Result<()> {
        // get_mut holds the shard write lock for the whole update
        match self.records.get_mut(short_id) {
            Some(mut record) => {
                record.push_visit(at);
                Ok(())
            }
            None => Err(UrlMiniError::not_found(format!(
                "short id not found: {}",
                short_id
            ))),
        }
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.records.len() as u64)
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}
