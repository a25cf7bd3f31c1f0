//! `person` table entity.
//!
//! Denormalized: `given`/`surname` mirror the primary name, `lifespan` is a
//! display label, `search_text` and `soundex` feed person search. All of
//! them are maintained by the projection.

use sea_orm::entity::prelude::*;

use super::sea_enums::{Gender, ResearchStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "person")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub xref: Option<String>,
    pub given: Option<String>,
    pub surname: Option<String>,
    pub gender: Gender,
    pub birth_date: Option<Json>,
    pub birth_date_sort: Option<Date>,
    pub birth_place: Option<String>,
    pub birth_latitude: Option<f64>,
    pub birth_longitude: Option<f64>,
    pub death_date: Option<Json>,
    pub death_date_sort: Option<Date>,
    pub death_place: Option<String>,
    pub death_latitude: Option<f64>,
    pub death_longitude: Option<f64>,
    pub notes: Option<String>,
    pub research_status: ResearchStatus,
    pub fsftid: Option<String>,
    pub brick_wall_active: bool,
    pub brick_wall_note: Option<String>,
    pub brick_wall_since: Option<DateTimeUtc>,
    pub brick_wall_resolved_at: Option<DateTimeUtc>,
    pub lifespan: String,
    pub search_text: String,
    pub soundex: String,
    pub version: i64,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::person_name::Entity")]
    PersonName,
}

impl Related<super::person_name::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PersonName.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
