//! SeaORM storage backend
//!
//! Durable mapping store on SQLite, MySQL/MariaDB or PostgreSQL. The
//! `migration` crate owns the schema: `urls` holds one row per record and
//! `url_visits` one row per recorded redirect.

mod connection;
mod converters;
mod mutations;
mod query;
pub mod retry;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use tracing::info;

use super::{MappingStore, UrlRecord};
use crate::config::DatabaseConfig;
use crate::errors::{Result, UrlMiniError};

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use converters::{model_to_record, record_to_active_model};

/// 从数据库 URL 推断后端类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("memory://") {
        Ok("memory".to_string())
    } else if database_url.starts_with("sqlite://")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(UrlMiniError::config(format!(
            "cannot infer database type from URL: {}. Supported: memory://, sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// SeaORM-based mapping store
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
    retry: retry::RetryPolicy,
}

impl SeaOrmStorage {
    pub async fn new(config: &DatabaseConfig, backend_name: &str) -> Result<Self> {
        let database_url = config.database_url.as_str();
        if database_url.is_empty() {
            return Err(UrlMiniError::config("database_url is not set"));
        }

        let db = if backend_name == "sqlite" {
            connect_sqlite(&sqlite_url(database_url)).await?
        } else {
            connect_generic(database_url, backend_name, config.pool_size).await?
        };

        run_migrations(&db).await?;

        let storage = SeaOrmStorage {
            db,
            backend_name: backend_name.to_string(),
            retry: retry::RetryPolicy::from_config(config),
        };

        info!("{} storage initialized", storage.backend_name.to_uppercase());
        Ok(storage)
    }
}

/// Plain file paths ("urlmini.db") become sqlite URLs
fn sqlite_url(database_url: &str) -> String {
    if database_url.starts_with("sqlite:") {
        database_url.to_string()
    } else if database_url == ":memory:" {
        "sqlite::memory:".to_string()
    } else {
        format!("sqlite://{}", database_url)
    }
}

#[async_trait]
impl MappingStore for SeaOrmStorage {
    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<UrlRecord>> {
        self.get(short_id).await
    }

    async fn insert(&self, record: UrlRecord) -> Result<UrlRecord> {
        self.insert_record(record).await
    }

    async fn increment_visit(&self, short_id: &str, at: DateTime<Utc>) -> Result<()> {
        self.record_visit(short_id, at).await
    }

    async fn count(&self) -> Result<u64> {
        self.count_records().await
    }

    fn backend_name(&self) -> &str {
        &self.backend_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_backend_from_url() {
        assert_eq!(infer_backend_from_url("memory://").unwrap(), "memory");
        assert_eq!(infer_backend_from_url("urlmini.db").unwrap(), "sqlite");
        assert_eq!(
            infer_backend_from_url("sqlite://data/urls.db?mode=rwc").unwrap(),
            "sqlite"
        );
        assert_eq!(
            infer_backend_from_url("mariadb://root@localhost/urls").unwrap(),
            "mysql"
        );
        assert_eq!(
            infer_backend_from_url("postgresql://localhost/urls").unwrap(),
            "postgres"
        );
        assert!(matches!(
            infer_backend_from_url("redis://localhost"),
            Err(UrlMiniError::Config(_))
        ));
    }

    #[test]
    fn test_sqlite_url() {
        assert_eq!(sqlite_url("urlmini.db"), "sqlite://urlmini.db");
        assert_eq!(sqlite_url("sqlite://a.db?mode=rwc"), "sqlite://a.db?mode=rwc");
        assert_eq!(sqlite_url(":memory:"), "sqlite::memory:");
    }
}
