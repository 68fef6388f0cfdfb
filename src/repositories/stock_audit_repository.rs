//! Stock revision history
//!
//! Each write opens a `revinfo` row and stores a snapshot of the stock in
//! `stock_aud` under that revision. Callers pass the transaction that made the
//! change, so history commits or rolls back together with it.

use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::stock_aud::RevisionType;
use crate::entities::{prelude::*, revinfo, stock, stock_aud};
use crate::errors::AppError;

/// Record an insert or update; `stock` is the row as written.
pub async fn record_write<C>(
    db: &C,
    stock: &stock::Model,
    revtype: RevisionType,
) -> Result<stock_aud::Model, AppError>
where
    C: ConnectionTrait,
{
    let rev = new_revision(db).await?;
    let snapshot = stock_aud::ActiveModel {
        id: Set(stock.id),
        rev: Set(rev.rev),
        revtype: Set(revtype),
        name: Set(Some(stock.name.clone())),
        current_price: Set(Some(stock.current_price)),
        created_date: Set(stock.created_date),
        modified_date: Set(stock.modified_date),
    };
    Ok(snapshot.insert(db).await?)
}

/// Record a delete. Only the id survives; data columns stay null.
pub async fn record_delete<C>(db: &C, id: i64) -> Result<stock_aud::Model, AppError>
where
    C: ConnectionTrait,
{
    let rev = new_revision(db).await?;
    let tombstone = stock_aud::ActiveModel {
        id: Set(id),
        rev: Set(rev.rev),
        revtype: Set(RevisionType::Del),
        name: Set(None),
        current_price: Set(None),
        created_date: Set(None),
        modified_date: Set(None),
    };
    Ok(tombstone.insert(db).await?)
}

/// All revisions of one stock, oldest first.
pub async fn find_revisions<C>(db: &C, id: i64) -> Result<Vec<stock_aud::Model>, AppError>
where
    C: ConnectionTrait,
{
    Ok(StockAud::find()
        .filter(stock_aud::Column::Id.eq(id))
        .order_by_asc(stock_aud::Column::Rev)
        .all(db)
        .await?)
}

async fn new_revision<C>(db: &C) -> Result<revinfo::Model, AppError>
where
    C: ConnectionTrait,
{
    let rev = revinfo::ActiveModel {
        rev: NotSet,
        revtstmp: Set(chrono::Utc::now().timestamp_millis()),
    };
    Ok(rev.insert(db).await?)
}
