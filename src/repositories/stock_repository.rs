//! Stock entity store
//!
//! Thin data-access functions over the `stock` table. Every function is
//! generic over the connection so the service can run them inside its own
//! transaction.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbBackend, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::entities::{prelude::*, stock};
use crate::errors::AppError;
use crate::models::pagination::{Page, PageRequest, SortDirection};

/// Map a public sort property onto its column.
pub fn sort_column(property: &str) -> Option<stock::Column> {
    match property {
        "id" => Some(stock::Column::Id),
        "name" => Some(stock::Column::Name),
        "currentPrice" => Some(stock::Column::CurrentPrice),
        "createdDate" => Some(stock::Column::CreatedDate),
        "modifiedDate" => Some(stock::Column::ModifiedDate),
        _ => None,
    }
}

/// Insert a new row; the store assigns the id.
pub async fn insert<C>(db: &C, mut active: stock::ActiveModel) -> Result<stock::Model, AppError>
where
    C: ConnectionTrait,
{
    if active.name.is_not_set() {
        return Err(AppError::ConstraintViolation("name must not be null".to_string()));
    }
    if active.current_price.is_not_set() {
        return Err(AppError::ConstraintViolation(
            "currentPrice must not be null".to_string(),
        ));
    }
    if let ActiveValue::Set(name) = &active.name {
        if find_by_name(db, name).await?.is_some() {
            return Err(AppError::ConstraintViolation(format!(
                "name '{}' already exists",
                name
            )));
        }
    }
    active.id = ActiveValue::NotSet;

    // A concurrent insert can still trip the unique index; `From<DbErr>`
    // reports that as a constraint violation as well.
    Ok(active.insert(db).await?)
}

/// Write the set fields of an existing row.
pub async fn update<C>(db: &C, active: stock::ActiveModel) -> Result<stock::Model, AppError>
where
    C: ConnectionTrait,
{
    Ok(active.update(db).await?)
}

pub async fn find_by_id<C>(db: &C, id: i64) -> Result<Option<stock::Model>, AppError>
where
    C: ConnectionTrait,
{
    Ok(Stock::find_by_id(id).one(db).await?)
}

pub async fn find_by_name<C>(db: &C, name: &str) -> Result<Option<stock::Model>, AppError>
where
    C: ConnectionTrait,
{
    Ok(Stock::find()
        .filter(stock::Column::Name.eq(name))
        .one(db)
        .await?)
}

/// Point lookup holding a row lock until the surrounding transaction ends.
///
/// SQLite has no row locks; its single-writer rule gives the same outcome.
pub async fn find_by_id_for_update<C>(db: &C, id: i64) -> Result<Option<stock::Model>, AppError>
where
    C: ConnectionTrait,
{
    let mut query = Stock::find_by_id(id);
    if db.get_database_backend() != DbBackend::Sqlite {
        query = query.lock_exclusive();
    }
    Ok(query.one(db).await?)
}

/// One sorted page of rows plus the total row count.
///
/// Non-id sorts get `id ASC` appended so pages never overlap or skip rows
/// while the table is unchanged.
pub async fn find_all<C>(db: &C, request: &PageRequest) -> Result<Page<stock::Model>, AppError>
where
    C: ConnectionTrait,
{
    let column = sort_column(&request.sort.property).ok_or_else(|| {
        AppError::Validation(format!("unknown sort property '{}'", request.sort.property))
    })?;
    let order = match request.sort.direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    };

    let mut select = Stock::find().order_by(column, order);
    if !matches!(column, stock::Column::Id) {
        select = select.order_by(stock::Column::Id, Order::Asc);
    }

    let total = count(db).await?;
    let content = select
        .offset(request.offset())
        .limit(request.size)
        .all(db)
        .await?;

    Ok(Page {
        content,
        total,
        page: request.page,
        size: request.size,
    })
}

pub async fn count<C>(db: &C) -> Result<u64, AppError>
where
    C: ConnectionTrait,
{
    Ok(Stock::find().count(db).await?)
}

/// Delete by id; a missing row is not an error. Returns rows removed.
pub async fn delete_by_id<C>(db: &C, id: i64) -> Result<u64, AppError>
where
    C: ConnectionTrait,
{
    let result = Stock::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected)
}
