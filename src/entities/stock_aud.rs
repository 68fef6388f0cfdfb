//! SeaORM Entity for the stock_aud history table
//!
//! Every committed insert, price update and delete of a stock leaves one row
//! here, keyed by stock id and revision.

use sea_orm::entity::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "i16", db_type = "SmallInteger")]
pub enum RevisionType {
    #[sea_orm(num_value = 0)]
    Add,
    #[sea_orm(num_value = 1)]
    Mod,
    #[sea_orm(num_value = 2)]
    Del,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "stock_aud")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub rev: i64,
    pub revtype: RevisionType,
    pub name: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))", nullable)]
    pub current_price: Option<Decimal>,
    pub created_date: Option<DateTime>,
    pub modified_date: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::revinfo::Entity",
        from = "Column::Rev",
        to = "super::revinfo::Column::Rev"
    )]
    Revinfo,
}

impl Related<super::revinfo::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Revinfo.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
