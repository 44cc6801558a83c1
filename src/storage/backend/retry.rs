//! Retry of store operations on transient database errors
//!
//! Every `SeaOrmStorage` operation runs through [`RetryPolicy::run`]. Unique
//! violations and other logical errors come back on the first attempt so the
//! caller can act on them (short ID allocation retries with a new candidate).

use std::future::Future;
use std::time::Duration;

use sea_orm::DbErr;
use sea_orm::error::RuntimeErr;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::DatabaseConfig;

/// How a database error should be treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transience {
    /// lock contention, deadlock or serialization conflict
    Contention,
    /// pool exhausted or connection dropped
    Connection,
    Permanent,
}

/// MySQL deadlock / lock wait, PostgreSQL serialization / deadlock, SQLite BUSY / LOCKED
const CONTENTION_CODES: &[&str] = &["1213", "1205", "40001", "40P01", "5", "6"];

/// Fallback for drivers that report contention without a code
const CONTENTION_MESSAGES: &[&str] = &[
    "deadlock",
    "lock wait timeout",
    "database is locked",
    "serialization failure",
];

pub fn classify(err: &DbErr) -> Transience {
    match err {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => Transience::Connection,
        DbErr::Exec(runtime) | DbErr::Query(runtime) if is_contention(runtime) => {
            Transience::Contention
        }
        _ => Transience::Permanent,
    }
}

fn is_contention(err: &RuntimeErr) -> bool {
    let message = match err {
        RuntimeErr::SqlxError(sqlx_err) => {
            if let Some(code) = sqlx_err.as_database_error().and_then(|e| e.code()) {
                return CONTENTION_CODES.iter().any(|c| *c == code.as_ref());
            }
            sqlx_err.to_string()
        }
        RuntimeErr::Internal(msg) => msg.clone(),
        #[allow(unreachable_patterns)]
        _ => return false,
    };
    let message = message.to_lowercase();
    CONTENTION_MESSAGES.iter().any(|m| message.contains(m))
}

/// Backoff settings taken from the `[database]` section
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &DatabaseConfig) -> Self {
        Self {
            max_retries: config.retry_count,
            base_delay: Duration::from_millis(config.retry_base_delay_ms),
            max_delay: Duration::from_millis(config.retry_max_delay_ms),
        }
    }

    /// Wait before retry number `retry` (1-based): doubling from `base_delay`,
    /// capped at `max_delay`, plus up to a quarter of jitter
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        let capped = self.base_delay.saturating_mul(factor).min(self.max_delay);
        let jitter_ms = rand::random_range(0..=capped.as_millis() as u64 / 4);
        capped + Duration::from_millis(jitter_ms)
    }

    /// Run one store operation, retrying it while it fails transiently
    pub async fn run<T, F, Fut>(&self, operation: &str, mut attempt: F) -> Result<T, DbErr>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, DbErr>>,
    {
        let mut retries = 0;
        loop {
            let err = match attempt().await {
                Ok(value) => {
                    if retries > 0 {
                        debug!("{} succeeded after {} retries", operation, retries);
                    }
                    return Ok(value);
                }
                Err(err) => err,
            };

            let transience = classify(&err);
            if transience == Transience::Permanent || retries >= self.max_retries {
                return Err(err);
            }

            retries += 1;
            let delay = self.delay_for(retries);
            warn!(
                "{} hit {:?} ({}), retry {}/{} in {} ms",
                operation,
                transience,
                err,
                retries,
                self.max_retries,
                delay.as_millis()
            );
            sleep(delay).await;
        }
    }
}
