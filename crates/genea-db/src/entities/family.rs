//! `family` table entity. Partner display names are denormalized by the
//! projection so family lists never join against `person`.

use sea_orm::entity::prelude::*;

use super::sea_enums::RelationshipType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "family")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub xref: Option<String>,
    pub partner1_id: Option<Uuid>,
    pub partner2_id: Option<Uuid>,
    pub partner1_name: Option<String>,
    pub partner2_name: Option<String>,
    pub relationship_type: RelationshipType,
    pub marriage_date: Option<Json>,
    pub marriage_date_sort: Option<Date>,
    pub marriage_place: Option<String>,
    pub marriage_latitude: Option<f64>,
    pub marriage_longitude: Option<f64>,
    pub version: i64,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::family_child::Entity")]
    FamilyChild,
}

impl Related<super::family_child::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FamilyChild.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
