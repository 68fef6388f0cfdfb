pub use sea_orm_migration::prelude::*;

use sea_orm_migration::sea_orm::DbBackend;

mod m20261016_000001_create_stock;
mod m20261016_000002_create_stock_aud;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261016_000001_create_stock::Migration),
            Box::new(m20261016_000002_create_stock_aud::Migration),
        ]
    }
}

/// Price column: DECIMAL(19, 4), except on SQLite which stores decimals as
/// REAL and rejects a precision above 16.
pub(crate) fn price_column<T>(backend: DbBackend, name: T) -> ColumnDef
where
    T: IntoIden,
{
    let precision = match backend {
        DbBackend::Sqlite => 16,
        _ => 19,
    };
    let mut column = ColumnDef::new(name);
    column.decimal_len(precision, 4);
    column
}
