//! Repository for `PersonName` rows.

use chrono::{DateTime, Utc};
use genea_core::GeneaError;
use genea_core::types::PersonName;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ActiveValue::Set, ConnectionTrait, Order, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::entities::person_name::{self, ActiveModel, Column, Entity};
use crate::entities::sea_enums;
use crate::repo::backend;

pub struct PersonNameRepo;

impl PersonNameRepo {
    pub async fn get<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
    ) -> Result<Option<PersonName>, GeneaError> {
        Ok(Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(backend)?
            .map(into_domain))
    }

    /// Names of a person, primary first.
    pub async fn for_person<C: ConnectionTrait>(
        db: &C,
        person_id: Uuid,
    ) -> Result<Vec<PersonName>, GeneaError> {
        let models = Entity::find()
            .filter(Column::PersonId.eq(person_id))
            .order_by(Column::IsPrimary, Order::Desc)
            .order_by(Column::Id, Order::Asc)
            .all(db)
            .await
            .map_err(backend)?;
        Ok(models.into_iter().map(into_domain).collect())
    }

    pub async fn save<C: ConnectionTrait>(
        db: &C,
        name: &PersonName,
        occurred_at: DateTime<Utc>,
    ) -> Result<(), GeneaError> {
        let active = ActiveModel {
            id: Set(name.id),
            person_id: Set(name.person_id),
            name_type: Set(sea_enums::NameType::from(name.name_type)),
            given: Set(name.given.clone()),
            surname: Set(name.surname.clone()),
            prefix: Set(name.prefix.clone()),
            suffix: Set(name.suffix.clone()),
            surname_prefix: Set(name.surname_prefix.clone()),
            nickname: Set(name.nickname.clone()),
            is_primary: Set(name.is_primary),
            created_at: Set(occurred_at),
            updated_at: Set(occurred_at),
        };
        Entity::insert(active)
            .on_conflict(
                OnConflict::column(Column::Id)
                    .update_columns([
                        Column::NameType,
                        Column::Given,
                        Column::Surname,
                        Column::Prefix,
                        Column::Suffix,
                        Column::SurnamePrefix,
                        Column::Nickname,
                        Column::IsPrimary,
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

    pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<PersonName>, GeneaError> {
        let models = Entity::find()
            .order_by_asc(Column::Id)
            .all(db)
            .await
            .map_err(backend)?;
        Ok(models.into_iter().map(into_domain).collect())
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

    /// Clear the primary flag on every name of a person except `keep`.
    /// Projection side-effect enforcing the single-primary invariant.
    pub async fn clear_other_primaries<C: ConnectionTrait>(
        db: &C,
        person_id: Uuid,
        keep: Uuid,
    ) -> Result<(), GeneaError> {
        Entity::update_many()
            .col_expr(Column::IsPrimary, Expr::value(false))
            .filter(Column::PersonId.eq(person_id))
            .filter(Column::Id.ne(keep))
            .exec(db)
            .await
            .map_err(backend)?;
        Ok(())
    }
}

fn into_domain(m: person_name::Model) -> PersonName {
    PersonName {
        id: m.id,
        person_id: m.person_id,
        name_type: m.name_type.into(),
        given: m.given,
        surname: m.surname,
        prefix: m.prefix,
        suffix: m.suffix,
        surname_prefix: m.surname_prefix,
        nickname: m.nickname,
        is_primary: m.is_primary,
    }
}
