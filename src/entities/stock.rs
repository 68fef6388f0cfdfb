//! SeaORM Entity for the stock table
//!
//! Timestamps are owned by the save hook below: `created_date` is stamped on
//! insert and `modified_date` on every write. Callers leave both `NotSet`.

use std::hash::{Hash, Hasher};

use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub current_price: Decimal,
    pub created_date: Option<DateTime>,
    pub modified_date: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = chrono::Utc::now().naive_utc();
        if insert {
            self.created_date = Set(Some(now));
        }
        self.modified_date = Set(Some(now));
        Ok(self)
    }
}

/// Rows are identified by id alone.
impl PartialEq for Model {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Model {}

impl Hash for Model {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Identity comparison for active models, which may not carry an id yet.
///
/// An active model without an id is equal to nothing, not even another
/// unsaved one: identity only exists once the store has assigned it.
pub fn same_identity(a: &ActiveModel, b: &ActiveModel) -> bool {
    match (id_of(a), id_of(b)) {
        (Some(left), Some(right)) => left == right,
        _ => false,
    }
}

fn id_of(model: &ActiveModel) -> Option<i64> {
    match &model.id {
        ActiveValue::Set(id) | ActiveValue::Unchanged(id) => Some(*id),
        ActiveValue::NotSet => None,
    }
}
