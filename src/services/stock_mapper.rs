//! Conversions between the stock row and its wire shape
//!
//! All functions are pure. Timestamps only ever flow row -> DTO; the save
//! hook on the entity is their single writer.

use chrono::NaiveDateTime;
use sea_orm::ActiveValue::{self, NotSet, Set};

use crate::entities::stock;
use crate::models::stock::StockDto;

/// Wire format of audit timestamps, e.g. `2023 Jan 05 14:03:22.150`
pub const TIMESTAMP_FORMAT: &str = "%Y %b %d %H:%M:%S%.3f";

pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

pub fn to_dto(stock: &stock::Model) -> StockDto {
    StockDto {
        id: Some(stock.id),
        name: Some(stock.name.clone()),
        current_price: Some(stock.current_price),
        created_date: stock.created_date.as_ref().map(format_timestamp),
        modified_date: stock.modified_date.as_ref().map(format_timestamp),
    }
}

/// Build an active model from client input. Timestamps are dropped.
pub fn to_entity(dto: StockDto) -> stock::ActiveModel {
    stock::ActiveModel {
        id: dto.id.map_or(NotSet, Set),
        name: dto.name.map_or(NotSet, Set),
        current_price: dto.current_price.map_or(NotSet, Set),
        created_date: NotSet,
        modified_date: NotSet,
    }
}

/// Reference a stock by id without loading it.
pub fn from_id(id: Option<i64>) -> Option<stock::ActiveModel> {
    id.map(|id| stock::ActiveModel {
        id: ActiveValue::Unchanged(id),
        ..Default::default()
    })
}
