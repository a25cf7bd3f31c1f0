//! Repository for `Citation` rows.

use genea_core::GeneaError;
use genea_core::enums::FactType;
use genea_core::types::Citation;
use genea_core::types::citation::Apid;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveValue::Set, ConnectionTrait, PaginatorTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::entities::citation::{self, ActiveModel, Column, Entity};
use crate::entities::sea_enums;
use crate::repo::backend;

pub struct CitationRepo;

impl CitationRepo {
    pub async fn get<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
    ) -> Result<Option<Citation>, GeneaError> {
        Ok(Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(backend)?
            .map(into_domain))
    }

    pub async fn save<C: ConnectionTrait>(db: &C, cite: &Citation) -> Result<(), GeneaError> {
        let active = ActiveModel {
            id: Set(cite.id),
            source_id: Set(cite.source_id),
            fact_type: Set(sea_enums::FactType::from(cite.fact_type)),
            owner_kind: Set(sea_enums::FactOwnerKind::from(cite.owner_kind)),
            owner_id: Set(cite.owner_id),
            page: Set(cite.page.clone()),
            volume: Set(cite.volume.clone()),
            source_quality: Set(cite.source_quality.map(sea_enums::SourceQuality::from)),
            informant_type: Set(cite.informant_type.map(sea_enums::InformantType::from)),
            evidence_type: Set(cite.evidence_type.map(sea_enums::EvidenceType::from)),
            text: Set(cite.text.clone()),
            analysis: Set(cite.analysis.clone()),
            apid: Set(cite.apid.as_ref().map(Apid::to_wire)),
            version: Set(cite.version),
            created_at: Set(cite.created_at),
            updated_at: Set(cite.updated_at),
        };
        Entity::insert(active)
            .on_conflict(
                OnConflict::column(Column::Id)
                    .update_columns([
                        Column::SourceId,
                        Column::FactType,
                        Column::OwnerKind,
                        Column::OwnerId,
                        Column::Page,
                        Column::Volume,
                        Column::SourceQuality,
                        Column::InformantType,
                        Column::EvidenceType,
                        Column::Text,
                        Column::Analysis,
                        Column::Apid,
                        Column::Version,
                        Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(db)
            .await
            .map_err(backend)?;
        Ok(())
    }

    pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<(), GeneaError> {
        Entity::delete_by_id(id).exec(db).await.map_err(backend)?;
        Ok(())
    }

    /// Citations attached to one fact of one owner.
    pub async fn for_fact<C: ConnectionTrait>(
        db: &C,
        fact_type: FactType,
        owner_id: Uuid,
    ) -> Result<Vec<Citation>, GeneaError> {
        let models = Entity::find()
            .filter(Column::FactType.eq(sea_enums::FactType::from(fact_type)))
            .filter(Column::OwnerId.eq(owner_id))
            .order_by_asc(Column::Id)
            .all(db)
            .await
            .map_err(backend)?;
        Ok(models.into_iter().map(into_domain).collect())
    }

    /// All citations of one owner (person or family), any fact.
    pub async fn for_owner<C: ConnectionTrait>(
        db: &C,
        owner_id: Uuid,
    ) -> Result<Vec<Citation>, GeneaError> {
        let models = Entity::find()
            .filter(Column::OwnerId.eq(owner_id))
            .order_by_asc(Column::Id)
            .all(db)
            .await
            .map_err(backend)?;
        Ok(models.into_iter().map(into_domain).collect())
    }

    pub async fn for_source<C: ConnectionTrait>(
        db: &C,
        source_id: Uuid,
    ) -> Result<Vec<Citation>, GeneaError> {
        let models = Entity::find()
            .filter(Column::SourceId.eq(source_id))
            .order_by_asc(Column::Id)
            .all(db)
            .await
            .map_err(backend)?;
        Ok(models.into_iter().map(into_domain).collect())
    }

    pub async fn count_for_source<C: ConnectionTrait>(
        db: &C,
        source_id: Uuid,
    ) -> Result<u64, GeneaError> {
        Ok(Entity::find()
            .filter(Column::SourceId.eq(source_id))
            .count(db)
            .await
            .map_err(backend)?)
    }

    pub async fn count_for_owner<C: ConnectionTrait>(
        db: &C,
        owner_id: Uuid,
    ) -> Result<u64, GeneaError> {
        Ok(Entity::find()
            .filter(Column::OwnerId.eq(owner_id))
            .count(db)
            .await
            .map_err(backend)?)
    }

    pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Citation>, GeneaError> {
        let models = Entity::find()
            .order_by_asc(Column::Id)
            .all(db)
            .await
            .map_err(backend)?;
        Ok(models.into_iter().map(into_domain).collect())
    }

    pub async fn count<C: ConnectionTrait>(db: &C) -> Result<u64, GeneaError> {
        Ok(Entity::find().count(db).await.map_err(backend)?)
    }
}

fn into_domain(m: citation::Model) -> Citation {
    Citation {
        id: m.id,
        source_id: m.source_id,
        fact_type: m.fact_type.into(),
        owner_kind: m.owner_kind.into(),
        owner_id: m.owner_id,
        page: m.page,
        volume: m.volume,
        source_quality: m.source_quality.map(Into::into),
        informant_type: m.informant_type.map(Into::into),
        evidence_type: m.evidence_type.map(Into::into),
        text: m.text,
        analysis: m.analysis,
        apid: m.apid.as_deref().map(Apid::parse),
        version: m.version,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}
