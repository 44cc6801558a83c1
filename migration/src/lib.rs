pub use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseBackend;

pub mod entities;
mod m20261001_000001_urls_table;
mod m20261001_000002_url_visits_table;

pub struct Migrator;

/// UTC timestamp column with microsecond precision on every backend.
///
/// MySQL's bare `timestamp` keeps whole seconds only.
pub(crate) fn timestamp_column<T: IntoIden>(backend: DatabaseBackend, column: T) -> ColumnDef {
    let mut def = ColumnDef::new(column);
    match backend {
        DatabaseBackend::MySql => def.custom(Alias::new("timestamp(6)")),
        _ => def.timestamp_with_time_zone(),
    };
    def
}

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_urls_table::Migration),
            Box::new(m20261001_000002_url_visits_table::Migration),
        ]
    }
}
