//! `citation` table entity.

use sea_orm::entity::prelude::*;

use super::sea_enums::{EvidenceType, FactOwnerKind, FactType, InformantType, SourceQuality};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "citation")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub source_id: Uuid,
    pub fact_type: FactType,
    pub owner_kind: FactOwnerKind,
    pub owner_id: Uuid,
    pub page: Option<String>,
    pub volume: Option<String>,
    pub source_quality: Option<SourceQuality>,
    pub informant_type: Option<InformantType>,
    pub evidence_type: Option<EvidenceType>,
    pub text: Option<String>,
    pub analysis: Option<String>,
    /// `_APID` wire form `<revision>,<db>::<record>`.
    pub apid: Option<String>,
    pub version: i64,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::source::Entity",
        from = "Column::SourceId",
        to = "super::source::Column::Id"
    )]
    Source,
}

impl Related<super::source::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Source.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
