//! `SeaORM` entity prelude

pub use super::revinfo::Entity as Revinfo;
pub use super::stock::Entity as Stock;
pub use super::stock_aud::Entity as StockAud;
