use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::config::DatabaseConfig;
use crate::errors::Result;

pub mod backend;
pub mod memory;
pub mod models;

pub use backend::{SeaOrmStorage, infer_backend_from_url};
pub use memory::MemoryStore;
pub use models::{UrlRecord, now_at_storage_precision};

/// Durable short ID → record table.
///
/// Implementations enforce short ID uniqueness themselves and apply visit
/// increments atomically; callers never read-modify-write.
#[async_trait]
pub trait MappingStore: Send + Sync {
    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<UrlRecord>>;

    /// Insert a new record, failing with `DuplicateKey` if the short ID is taken
    async fn insert(&self, record: UrlRecord) -> Result<UrlRecord>;

    /// Add one visit at `at`, failing with `NotFound` for unknown short IDs
    async fn increment_visit(&self, short_id: &str, at: DateTime<Utc>) -> Result<()>;

    async fn count(&self) -> Result<u64>;

    fn backend_name(&self) -> &str;
}

pub struct StorageFactory;

impl StorageFactory {
    /// Build the store selected by `database_url` and run migrations if needed
    pub async fn create(config: &DatabaseConfig) -> Result<Arc<dyn MappingStore>> {
        let backend_type = infer_backend_from_url(&config.database_url)?;

        if backend_type == "memory" {
            return Ok(Arc::new(MemoryStore::new()));
        }

        let storage = SeaOrmStorage::new(config, &backend_type).await?;
        Ok(Arc::new(storage))
    }
}
