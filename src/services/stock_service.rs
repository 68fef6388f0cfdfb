//! Stock service
//!
//! Orchestrates the mapper and the entity store. Each public operation runs
//! in its own database transaction: it commits on success and rolls back when
//! the transaction is dropped on an error path. Writes also append a revision
//! to the stock history inside that transaction.

use rust_decimal::Decimal;
use sea_orm::{ActiveValue::Set, DatabaseConnection, TransactionTrait};
use tracing::{debug, info};

use crate::entities::stock;
use crate::entities::stock_aud::RevisionType;
use crate::errors::AppError;
use crate::models::pagination::{Page, PageRequest};
use crate::models::stock::StockDto;
use crate::repositories::{stock_audit_repository, stock_repository};
use crate::services::stock_mapper;

pub const ENTITY_NAME: &str = "Stock";

#[derive(Clone)]
pub struct StockService {
    db: DatabaseConnection,
}

impl StockService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Persist a new stock. Callers guarantee the DTO carries no id.
    pub async fn save(&self, dto: StockDto) -> Result<StockDto, AppError> {
        debug!(name = ?dto.name, "Request to save Stock");

        let txn = self.db.begin().await?;
        let saved = stock_repository::insert(&txn, stock_mapper::to_entity(dto)).await?;
        stock_audit_repository::record_write(&txn, &saved, RevisionType::Add).await?;
        txn.commit().await?;

        info!(id = saved.id, name = %saved.name, "Stock created");
        Ok(stock_mapper::to_dto(&saved))
    }

    /// Change the price of an existing stock; nothing else is writable.
    pub async fn update_price(
        &self,
        id: i64,
        current_price: Decimal,
    ) -> Result<StockDto, AppError> {
        debug!(id, %current_price, "Request to update Stock price");

        let txn = self.db.begin().await?;
        let existing = stock_repository::find_by_id_for_update(&txn, id)
            .await?
            .ok_or_else(|| AppError::invalid_request("Invalid id", ENTITY_NAME, "idnull"))?;

        let mut active: stock::ActiveModel = existing.into();
        active.current_price = Set(current_price);
        let updated = stock_repository::update(&txn, active).await?;
        stock_audit_repository::record_write(&txn, &updated, RevisionType::Mod).await?;
        txn.commit().await?;

        info!(id, %current_price, "Stock price updated");
        Ok(stock_mapper::to_dto(&updated))
    }

    pub async fn find_all(&self, request: &PageRequest) -> Result<Page<StockDto>, AppError> {
        debug!(
            page = request.page,
            size = request.size,
            sort = ?request.sort,
            "Request to get all Stocks"
        );

        let txn = self.db.begin().await?;
        let page = stock_repository::find_all(&txn, request).await?;
        txn.commit().await?;

        Ok(page.map(|stock| stock_mapper::to_dto(&stock)))
    }

    pub async fn find_one(&self, id: i64) -> Result<Option<StockDto>, AppError> {
        debug!(id, "Request to get Stock");

        let txn = self.db.begin().await?;
        let found = stock_repository::find_by_id(&txn, id).await?;
        txn.commit().await?;

        Ok(found.as_ref().map(stock_mapper::to_dto))
    }

    /// Idempotent: deleting a missing id succeeds.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        debug!(id, "Request to delete Stock");

        let txn = self.db.begin().await?;
        let removed = stock_repository::delete_by_id(&txn, id).await?;
        if removed > 0 {
            stock_audit_repository::record_delete(&txn, id).await?;
        }
        txn.commit().await?;

        if removed > 0 {
            info!(id, "Stock deleted");
        }
        Ok(())
    }
}
