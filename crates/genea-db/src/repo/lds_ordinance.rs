//! Repository for `LdsOrdinance` rows.

use chrono::{DateTime, Utc};
use genea_core::GeneaError;
use genea_core::types::LdsOrdinance;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveValue::Set, ConnectionTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::entities::lds_ordinance::{self, ActiveModel, Column, Entity};
use crate::entities::sea_enums;
use crate::repo::{backend, from_json_opt, to_json_opt};

pub struct LdsOrdinanceRepo;

impl LdsOrdinanceRepo {
    pub async fn get<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
    ) -> Result<Option<LdsOrdinance>, GeneaError> {
        Ok(Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(backend)?
            .map(into_domain))
    }

    pub async fn for_owner<C: ConnectionTrait>(
        db: &C,
        owner_id: Uuid,
    ) -> Result<Vec<LdsOrdinance>, GeneaError> {
        let models = Entity::find()
            .filter(Column::OwnerId.eq(owner_id))
            .order_by_asc(Column::Id)
            .all(db)
            .await
            .map_err(backend)?;
        Ok(models.into_iter().map(into_domain).collect())
    }

    pub async fn save<C: ConnectionTrait>(
        db: &C,
        ordinance: &LdsOrdinance,
        occurred_at: DateTime<Utc>,
    ) -> Result<(), GeneaError> {
        let active = ActiveModel {
            id: Set(ordinance.id),
            ordinance_type: Set(sea_enums::LdsOrdinanceType::from(ordinance.ordinance_type)),
            owner_kind: Set(sea_enums::FactOwnerKind::from(ordinance.owner_kind)),
            owner_id: Set(ordinance.owner_id),
            date: Set(to_json_opt(&ordinance.date)),
            temple: Set(ordinance.temple.clone()),
            status: Set(ordinance.status.clone()),
            place: Set(ordinance.place.clone()),
            created_at: Set(occurred_at),
            updated_at: Set(occurred_at),
        };
        Entity::insert(active)
            .on_conflict(
                OnConflict::column(Column::Id)
                    .update_columns([
                        Column::Date,
                        Column::Temple,
                        Column::Status,
                        Column::Place,
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

    pub async fn delete_for_owner<C: ConnectionTrait>(
        db: &C,
        owner_id: Uuid,
    ) -> Result<(), GeneaError> {
        Entity::delete_many()
            .filter(Column::OwnerId.eq(owner_id))
            .exec(db)
            .await
            .map_err(backend)?;
        Ok(())
    }

    pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<LdsOrdinance>, GeneaError> {
        let models = Entity::find()
            .order_by_asc(Column::Id)
            .all(db)
            .await
            .map_err(backend)?;
        Ok(models.into_iter().map(into_domain).collect())
    }
}

fn into_domain(m: lds_ordinance::Model) -> LdsOrdinance {
    LdsOrdinance {
        id: m.id,
        ordinance_type: m.ordinance_type.into(),
        owner_kind: m.owner_kind.into(),
        owner_id: m.owner_id,
        date: from_json_opt(m.date),
        temple: m.temple,
        status: m.status,
        place: m.place,
    }
}
