//! SeaORM Entity for the revinfo table

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "revinfo")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub rev: i64,
    /// Commit time in epoch milliseconds
    pub revtstmp: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::stock_aud::Entity")]
    StockAud,
}

impl Related<super::stock_aud::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockAud.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
