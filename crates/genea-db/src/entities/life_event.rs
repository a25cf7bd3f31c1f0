//! `life_event` table entity. Rows with `is_negated = true` record facts
//! known not to have happened; they carry no date or place.

use sea_orm::entity::prelude::*;

use super::sea_enums::{FactOwnerKind, FactType};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "life_event")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_kind: FactOwnerKind,
    pub owner_id: Uuid,
    pub fact_type: FactType,
    pub date: Option<Json>,
    pub date_sort: Option<Date>,
    pub place: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<Json>,
    pub description: Option<String>,
    pub cause: Option<String>,
    pub age: Option<String>,
    pub is_negated: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
