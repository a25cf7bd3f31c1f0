//! `lds_ordinance` table entity.

use sea_orm::entity::prelude::*;

use super::sea_enums::{FactOwnerKind, LdsOrdinanceType};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "lds_ordinance")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub ordinance_type: LdsOrdinanceType,
    pub owner_kind: FactOwnerKind,
    pub owner_id: Uuid,
    pub date: Option<Json>,
    pub temple: Option<String>,
    pub status: Option<String>,
    pub place: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
