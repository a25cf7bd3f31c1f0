//! Repository for `Association` rows.

use chrono::{DateTime, Utc};
use genea_core::GeneaError;
use genea_core::types::Association;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveValue::Set, ConnectionTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::entities::association::{self, ActiveModel, Column, Entity};
use crate::entities::sea_enums;
use crate::repo::backend;

pub struct AssociationRepo;

impl AssociationRepo {
    pub async fn get<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
    ) -> Result<Option<Association>, GeneaError> {
        Ok(Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(backend)?
            .map(into_domain))
    }

    pub async fn for_person<C: ConnectionTrait>(
        db: &C,
        person_id: Uuid,
    ) -> Result<Vec<Association>, GeneaError> {
        let models = Entity::find()
            .filter(Column::PersonId.eq(person_id))
            .order_by_asc(Column::Id)
            .all(db)
            .await
            .map_err(backend)?;
        Ok(models.into_iter().map(into_domain).collect())
    }

    pub async fn save<C: ConnectionTrait>(
        db: &C,
        association: &Association,
        occurred_at: DateTime<Utc>,
    ) -> Result<(), GeneaError> {
        let active = ActiveModel {
            id: Set(association.id),
            person_id: Set(association.person_id),
            associate_id: Set(association.associate_id),
            role: Set(sea_enums::AssociationRole::from(association.role)),
            phrase: Set(association.phrase.clone()),
            notes: Set(association.notes.clone()),
            created_at: Set(occurred_at),
            updated_at: Set(occurred_at),
        };
        Entity::insert(active)
            .on_conflict(
                OnConflict::column(Column::Id)
                    .update_columns([
                        Column::AssociateId,
                        Column::Role,
                        Column::Phrase,
                        Column::Notes,
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

    pub async fn delete_for_person<C: ConnectionTrait>(
        db: &C,
        person_id: Uuid,
    ) -> Result<(), GeneaError> {
        Entity::delete_many()
            .filter(Column::PersonId.eq(person_id))
            .exec(db)
            .await
            .map_err(backend)?;
        Ok(())
    }

    pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Association>, GeneaError> {
        let models = Entity::find()
            .order_by_asc(Column::Id)
            .all(db)
            .await
            .map_err(backend)?;
        Ok(models.into_iter().map(into_domain).collect())
    }
}

fn into_domain(m: association::Model) -> Association {
    Association {
        id: m.id,
        person_id: m.person_id,
        associate_id: m.associate_id,
        role: m.role.into(),
        phrase: m.phrase,
        notes: m.notes,
    }
}
