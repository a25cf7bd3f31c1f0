//! `media` table entity. The blob columns are excluded from list/detail
//! fetches; dedicated repository fetchers load them on demand.

use sea_orm::entity::prelude::*;

use super::sea_enums::{MediaKind, MediaOwnerKind};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "media")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub xref: Option<String>,
    pub owner_kind: MediaOwnerKind,
    pub owner_id: Uuid,
    pub title: Option<String>,
    pub description: Option<String>,
    pub mime_type: String,
    pub media_kind: MediaKind,
    pub file_name: String,
    pub size: i64,
    #[sea_orm(column_type = "VarBinary(StringLen::None)")]
    pub data: Vec<u8>,
    #[sea_orm(column_type = "VarBinary(StringLen::None)", nullable)]
    pub thumbnail: Option<Vec<u8>>,
    pub crop: Option<Json>,
    pub version: i64,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
