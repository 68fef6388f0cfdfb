use sea_orm_migration::prelude::*;

use crate::price_column;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();

        // One row per committed change set
        manager
            .create_table(
                Table::create()
                    .table(Revinfo::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Revinfo::Rev)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Revinfo::Revtstmp).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Snapshot of a stock at each revision; data columns are null on delete
        manager
            .create_table(
                Table::create()
                    .table(StockAud::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(StockAud::Id).big_integer().not_null())
                    .col(ColumnDef::new(StockAud::Rev).big_integer().not_null())
                    .col(ColumnDef::new(StockAud::Revtype).small_integer().not_null())
                    .col(ColumnDef::new(StockAud::Name).string_len(255).null())
                    .col(price_column(backend, StockAud::CurrentPrice).null())
                    .col(ColumnDef::new(StockAud::CreatedDate).timestamp().null())
                    .col(ColumnDef::new(StockAud::ModifiedDate).timestamp().null())
                    .primary_key(Index::create().col(StockAud::Id).col(StockAud::Rev))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stock_aud_revinfo")
                            .from(StockAud::Table, StockAud::Rev)
                            .to(Revinfo::Table, Revinfo::Rev),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StockAud::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Revinfo::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Revinfo {
    Table,
    Rev,
    Revtstmp,
}

#[derive(Iden)]
enum StockAud {
    Table,
    Id,
    Rev,
    Revtype,
    Name,
    CurrentPrice,
    CreatedDate,
    ModifiedDate,
}
