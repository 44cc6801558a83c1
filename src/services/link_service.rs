//! Short URL creation
//!
//! Validation, collision-checked short ID allocation and record creation.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::errors::{Result, UrlMiniError};
use crate::storage::{MappingStore, UrlRecord};
use crate::utils::generate_short_id;
use crate::utils::url_validator::{validate_url, validation_error_message};

/// Source of candidate short IDs
pub type IdGenerator = Arc<dyn Fn() -> String + Send + Sync>;

/// Service for creating short URLs
pub struct LinkService {
    store: Arc<dyn MappingStore>,
    max_attempts: u32,
    id_generator: IdGenerator,
}

impl LinkService {
    pub fn new(store: Arc<dyn MappingStore>, max_attempts: u32) -> Self {
        Self {
            store,
            max_attempts: max_attempts.max(1),
            id_generator: Arc::new(generate_short_id),
        }
    }

    /// Replace the random generator (deterministic IDs in tests)
    pub fn with_id_generator(mut self, id_generator: IdGenerator) -> Self {
        self.id_generator = id_generator;
        self
    }

    /// Create a short URL for `raw_url`.
    ///
    /// Each attempt inserts a complete record; a `DuplicateKey` from the store
    /// triggers a fresh candidate until `max_attempts` is spent.
    pub async fn create_short_url(&self, raw_url: &str) -> Result<UrlRecord> {
        validate_url(raw_url)
            .map_err(|e| UrlMiniError::invalid_url(validation_error_message(&e)))?;

        for attempt in 1..=self.max_attempts {
            let candidate = UrlRecord::new((self.id_generator)(), raw_url.to_string());
            let short_id = candidate.short_id.clone();

            match self.store.insert(candidate).await {
                Ok(record) => {
                    info!(
                        "Created short id {} for {}",
                        record.short_id, record.redirect_url
                    );
                    return Ok(record);
                }
                Err(UrlMiniError::DuplicateKey(_)) => {
                    warn!(
                        "Short id collision on {} (attempt {}/{}), regenerating",
                        short_id, attempt, self.max_attempts
                    );
                }
                Err(e) => {
                    error!("Failed to store short url: {}", e);
                    return Err(e);
                }
            }
        }

        error!(
            "Short id allocation exhausted after {} attempts",
            self.max_attempts
        );
        Err(UrlMiniError::allocation_exhausted(format!(
            "no free short id after {} attempts",
            self.max_attempts
        )))
    }
}
