//! Repository for `LifeEvent` rows.

use chrono::{DateTime, Utc};
use genea_core::GeneaError;
use genea_core::types::{LifeEvent, Place};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveValue::Set, ConnectionTrait, PaginatorTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::entities::life_event::{self, ActiveModel, Column, Entity};
use crate::entities::sea_enums;
use crate::repo::{backend, from_json_opt, to_json_opt};

pub struct LifeEventRepo;

impl LifeEventRepo {
    pub async fn get<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
    ) -> Result<Option<LifeEvent>, GeneaError> {
        Ok(Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(backend)?
            .map(into_domain))
    }

    /// Events of one owner, oldest first by sortable date.
    pub async fn for_owner<C: ConnectionTrait>(
        db: &C,
        owner_id: Uuid,
    ) -> Result<Vec<LifeEvent>, GeneaError> {
        let models = Entity::find()
            .filter(Column::OwnerId.eq(owner_id))
            .order_by_asc(Column::DateSort)
            .order_by_asc(Column::Id)
            .all(db)
            .await
            .map_err(backend)?;
        Ok(models.into_iter().map(into_domain).collect())
    }

    pub async fn save<C: ConnectionTrait>(
        db: &C,
        event: &LifeEvent,
        occurred_at: DateTime<Utc>,
    ) -> Result<(), GeneaError> {
        let active = to_active(event, occurred_at);
        Entity::insert(active)
            .on_conflict(
                OnConflict::column(Column::Id)
                    .update_columns([
                        Column::FactType,
                        Column::Date,
                        Column::DateSort,
                        Column::Place,
                        Column::Latitude,
                        Column::Longitude,
                        Column::Address,
                        Column::Description,
                        Column::Cause,
                        Column::Age,
                        Column::IsNegated,
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

    pub async fn count<C: ConnectionTrait>(db: &C) -> Result<u64, GeneaError> {
        Ok(Entity::find().count(db).await.map_err(backend)?)
    }

    pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<LifeEvent>, GeneaError> {
        let models = Entity::find()
            .order_by_asc(Column::Id)
            .all(db)
            .await
            .map_err(backend)?;
        Ok(models.into_iter().map(into_domain).collect())
    }

    /// Events carrying coordinates (for the map view).
    pub async fn with_coordinates<C: ConnectionTrait>(
        db: &C,
    ) -> Result<Vec<LifeEvent>, GeneaError> {
        let models = Entity::find()
            .filter(Column::Latitude.is_not_null())
            .all(db)
            .await
            .map_err(backend)?;
        Ok(models.into_iter().map(into_domain).collect())
    }

    /// Burial events with a place (the cemetery browse).
    pub async fn burial_places<C: ConnectionTrait>(
        db: &C,
    ) -> Result<Vec<LifeEvent>, GeneaError> {
        let models = Entity::find()
            .filter(Column::FactType.eq(sea_enums::FactType::Burial))
            .filter(Column::Place.is_not_null())
            .filter(Column::IsNegated.eq(false))
            .all(db)
            .await
            .map_err(backend)?;
        Ok(models.into_iter().map(into_domain).collect())
    }
}

fn into_domain(m: life_event::Model) -> LifeEvent {
    LifeEvent {
        id: m.id,
        owner_kind: m.owner_kind.into(),
        owner_id: m.owner_id,
        fact_type: m.fact_type.into(),
        date: from_json_opt(m.date),
        place: m.place.map(|name| Place {
            name,
            latitude: m.latitude,
            longitude: m.longitude,
        }),
        address: from_json_opt(m.address),
        description: m.description,
        cause: m.cause,
        age: m.age,
        is_negated: m.is_negated,
    }
}

fn to_active(e: &LifeEvent, occurred_at: DateTime<Utc>) -> ActiveModel {
    ActiveModel {
        id: Set(e.id),
        owner_kind: Set(sea_enums::FactOwnerKind::from(e.owner_kind)),
        owner_id: Set(e.owner_id),
        fact_type: Set(sea_enums::FactType::from(e.fact_type)),
        date: Set(to_json_opt(&e.date)),
        date_sort: Set(e.date.as_ref().and_then(|d| d.sort_date())),
        place: Set(e.place.as_ref().map(|p| p.name.clone())),
        latitude: Set(e.place.as_ref().and_then(|p| p.latitude)),
        longitude: Set(e.place.as_ref().and_then(|p| p.longitude)),
        address: Set(to_json_opt(&e.address)),
        description: Set(e.description.clone()),
        cause: Set(e.cause.clone()),
        age: Set(e.age.clone()),
        is_negated: Set(e.is_negated),
        created_at: Set(occurred_at),
        updated_at: Set(occurred_at),
    }
}
