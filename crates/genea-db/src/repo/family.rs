//! Repository for `Family` rows.

use genea_core::GeneaError;
use genea_core::types::{Family, ListOptions, Page, Place, SortOrder};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Condition, Expr, OnConflict};
use sea_orm::{
    ActiveValue::Set, ConnectionTrait, Order, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use crate::entities::family::{self, ActiveModel, Column, Entity};
use crate::entities::sea_enums;
use crate::repo::{backend, from_json_opt, to_json_opt};

pub struct FamilyRepo;

impl FamilyRepo {
    pub async fn get<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<Family>, GeneaError> {
        Ok(Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(backend)?
            .map(into_domain))
    }

    pub async fn save<C: ConnectionTrait>(db: &C, family: &Family) -> Result<(), GeneaError> {
        let active = to_active(family);
        Entity::insert(active)
            .on_conflict(
                OnConflict::column(Column::Id)
                    .update_columns([
                        Column::Xref,
                        Column::Partner1Id,
                        Column::Partner2Id,
                        Column::RelationshipType,
                        Column::MarriageDate,
                        Column::MarriageDateSort,
                        Column::MarriagePlace,
                        Column::MarriageLatitude,
                        Column::MarriageLongitude,
                        Column::Version,
                        Column::CreatedAt,
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

    /// Overwrite the denormalized partner display names.
    pub async fn update_partner_names<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
        partner1_name: Option<String>,
        partner2_name: Option<String>,
    ) -> Result<(), GeneaError> {
        Entity::update_many()
            .col_expr(Column::Partner1Name, Expr::value(partner1_name))
            .col_expr(Column::Partner2Name, Expr::value(partner2_name))
            .filter(Column::Id.eq(id))
            .exec(db)
            .await
            .map_err(backend)?;
        Ok(())
    }

    /// Paginated family list. Sort whitelist: `marriage_date`, `created_at`,
    /// `updated_at`.
    pub async fn list<C: ConnectionTrait>(
        db: &C,
        opts: &ListOptions,
    ) -> Result<Page<Family>, GeneaError> {
        let sort_column = match opts.sort.as_deref() {
            Some("marriage_date") => Column::MarriageDateSort,
            Some("updated_at") => Column::UpdatedAt,
            _ => Column::CreatedAt,
        };
        let order = match opts.order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };

        let query = Entity::find();
        let total = PaginatorTrait::count(query.clone(), db)
            .await
            .map_err(backend)? as u64;
        let models = query
            .order_by(sort_column, order)
            .order_by(Column::Id, Order::Asc)
            .limit(opts.clamped_limit())
            .offset(opts.offset())
            .all(db)
            .await
            .map_err(backend)?;

        Ok(Page {
            items: models.into_iter().map(into_domain).collect(),
            total,
            limit: opts.clamped_limit(),
            offset: opts.offset(),
        })
    }

    pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Family>, GeneaError> {
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

    /// Families where the given person is one of the partners.
    pub async fn for_partner<C: ConnectionTrait>(
        db: &C,
        person_id: Uuid,
    ) -> Result<Vec<Family>, GeneaError> {
        let models = Entity::find()
            .filter(
                Condition::any()
                    .add(Column::Partner1Id.eq(person_id))
                    .add(Column::Partner2Id.eq(person_id)),
            )
            .order_by_asc(Column::Id)
            .all(db)
            .await
            .map_err(backend)?;
        Ok(models.into_iter().map(into_domain).collect())
    }

    /// Families carrying marriage coordinates.
    pub async fn with_coordinates<C: ConnectionTrait>(db: &C) -> Result<Vec<Family>, GeneaError> {
        let models = Entity::find()
            .filter(Column::MarriageLatitude.is_not_null())
            .all(db)
            .await
            .map_err(backend)?;
        Ok(models.into_iter().map(into_domain).collect())
    }
}

fn into_domain(m: family::Model) -> Family {
    Family {
        id: m.id,
        xref: m.xref,
        partner1_id: m.partner1_id,
        partner2_id: m.partner2_id,
        relationship_type: m.relationship_type.into(),
        marriage_date: from_json_opt(m.marriage_date),
        marriage_place: m.marriage_place.map(|name| Place {
            name,
            latitude: m.marriage_latitude,
            longitude: m.marriage_longitude,
        }),
        version: m.version,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn to_active(f: &Family) -> ActiveModel {
    ActiveModel {
        id: Set(f.id),
        xref: Set(f.xref.clone()),
        partner1_id: Set(f.partner1_id),
        partner2_id: Set(f.partner2_id),
        // Partner display names are refreshed by the projection.
        partner1_name: Set(None),
        partner2_name: Set(None),
        relationship_type: Set(sea_enums::RelationshipType::from(f.relationship_type)),
        marriage_date: Set(to_json_opt(&f.marriage_date)),
        marriage_date_sort: Set(f.marriage_date.as_ref().and_then(|d| d.sort_date())),
        marriage_place: Set(f.marriage_place.as_ref().map(|p| p.name.clone())),
        marriage_latitude: Set(f.marriage_place.as_ref().and_then(|p| p.latitude)),
        marriage_longitude: Set(f.marriage_place.as_ref().and_then(|p| p.longitude)),
        version: Set(f.version),
        created_at: Set(f.created_at),
        updated_at: Set(f.updated_at),
    }
}
