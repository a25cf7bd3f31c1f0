//! Repository for `Attribute` rows.

use chrono::{DateTime, Utc};
use genea_core::GeneaError;
use genea_core::types::Attribute;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveValue::Set, ConnectionTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::entities::attribute::{self, ActiveModel, Column, Entity};
use crate::entities::sea_enums;
use crate::repo::{backend, from_json_opt, to_json_opt};

pub struct AttributeRepo;

impl AttributeRepo {
    pub async fn get<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
    ) -> Result<Option<Attribute>, GeneaError> {
        Ok(Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(backend)?
            .map(into_domain))
    }

    pub async fn for_person<C: ConnectionTrait>(
        db: &C,
        person_id: Uuid,
    ) -> Result<Vec<Attribute>, GeneaError> {
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
        attribute: &Attribute,
        occurred_at: DateTime<Utc>,
    ) -> Result<(), GeneaError> {
        let active = ActiveModel {
            id: Set(attribute.id),
            person_id: Set(attribute.person_id),
            attribute_type: Set(sea_enums::AttributeType::from(attribute.attribute_type)),
            value: Set(attribute.value.clone()),
            date: Set(to_json_opt(&attribute.date)),
            place: Set(attribute.place.clone()),
            created_at: Set(occurred_at),
            updated_at: Set(occurred_at),
        };
        Entity::insert(active)
            .on_conflict(
                OnConflict::column(Column::Id)
                    .update_columns([
                        Column::AttributeType,
                        Column::Value,
                        Column::Date,
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

    pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Attribute>, GeneaError> {
        let models = Entity::find()
            .order_by_asc(Column::Id)
            .all(db)
            .await
            .map_err(backend)?;
        Ok(models.into_iter().map(into_domain).collect())
    }
}

fn into_domain(m: attribute::Model) -> Attribute {
    Attribute {
        id: m.id,
        person_id: m.person_id,
        attribute_type: m.attribute_type.into(),
        value: m.value,
        date: from_json_opt(m.date),
        place: m.place,
    }
}
