use sea_orm_migration::prelude::*;

use crate::price_column;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();

        manager
            .create_table(
                Table::create()
                    .table(Stock::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Stock::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Stock::Name).string_len(255).not_null())
                    .col(price_column(backend, Stock::CurrentPrice).not_null())
                    // Written by the entity's save hook, never by clients
                    .col(ColumnDef::new(Stock::CreatedDate).timestamp().null())
                    .col(ColumnDef::new(Stock::ModifiedDate).timestamp().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_stock_name")
                    .table(Stock::Table)
                    .col(Stock::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Stock::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Stock {
    Table,
    Id,
    Name,
    CurrentPrice,
    CreatedDate,
    ModifiedDate,
}
