//! Stock request/response models
//!
//! `StockDto` is the wire shape of a stock row for every /api/stocks endpoint.

use std::hash::{Hash, Hasher};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stock as seen by API clients
///
/// `currentPrice` is a JSON number carrying every digit of the decimal.
/// Audit timestamps are pre-formatted strings (`2023 Jan 05 14:03:22.150`).
/// Clients may send them but they are never written back to the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockDto {
    pub id: Option<i64>,
    pub name: Option<String>,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub current_price: Option<Decimal>,
    pub created_date: Option<String>,
    pub modified_date: Option<String>,
}

impl StockDto {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_current_price(mut self, current_price: Decimal) -> Self {
        self.current_price = Some(current_price);
        self
    }
}

/// DTOs compare by id only, and a DTO without an id equals nothing (itself
/// included), so this is deliberately `PartialEq` without `Eq`.
impl PartialEq for StockDto {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(left), Some(right)) => left == right,
            _ => false,
        }
    }
}

impl Hash for StockDto {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Query parameters for PUT /api/stocks/{id}
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePriceQuery {
    pub current_price: Decimal,
}
