//! Repository for `Person` rows (upsert, list, search, browse).

use chrono::NaiveDate;
use genea_core::GeneaError;
use genea_core::types::{ListOptions, Page, Person, Place, SortOrder};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Condition, Expr, OnConflict};
use sea_orm::{
    ActiveValue::Set, ConnectionTrait, Order, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use crate::entities::person::{self, ActiveModel, Column, Entity};
use crate::entities::sea_enums;
use crate::repo::search::{build_search_text, soundex_codes};
use crate::repo::{backend, from_json_opt, to_json_opt};

/// Search parameters for `PersonRepo::search`.
#[derive(Debug, Clone, Default)]
pub struct PersonSearch {
    pub query: String,
    /// Tolerant substring matching per token.
    pub fuzzy: bool,
    /// Phonetic matching over Soundex codes.
    pub soundex: bool,
    pub birth_date_from: Option<NaiveDate>,
    pub birth_date_to: Option<NaiveDate>,
    pub birth_place: Option<String>,
    pub limit: Option<u64>,
}

/// Repository for person read-model rows.
pub struct PersonRepo;

impl PersonRepo {
    /// Get a person by id; `None` when absent.
    pub async fn get<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<Person>, GeneaError> {
        Ok(Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(backend)?
            .map(into_domain))
    }

    /// Upsert a person row. Derived columns (sort dates, lifespan, search
    /// text) are recomputed from the domain value; the projection refreshes
    /// name-dependent search columns separately.
    pub async fn save<C: ConnectionTrait>(db: &C, person: &Person) -> Result<(), GeneaError> {
        let active = to_active(person);
        Entity::insert(active)
            .on_conflict(
                OnConflict::column(Column::Id)
                    .update_columns([
                        Column::Xref,
                        Column::Given,
                        Column::Surname,
                        Column::Gender,
                        Column::BirthDate,
                        Column::BirthDateSort,
                        Column::BirthPlace,
                        Column::BirthLatitude,
                        Column::BirthLongitude,
                        Column::DeathDate,
                        Column::DeathDateSort,
                        Column::DeathPlace,
                        Column::DeathLatitude,
                        Column::DeathLongitude,
                        Column::Notes,
                        Column::ResearchStatus,
                        Column::Fsftid,
                        Column::BrickWallActive,
                        Column::BrickWallNote,
                        Column::BrickWallSince,
                        Column::BrickWallResolvedAt,
                        Column::Lifespan,
                        Column::SearchText,
                        Column::Soundex,
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

    /// Hard-delete a person row. Deleting an absent row is not an error.
    pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<(), GeneaError> {
        Entity::delete_by_id(id).exec(db).await.map_err(backend)?;
        Ok(())
    }

    /// Overwrite the search columns (called by the projection after name
    /// changes, with the person's names folded in).
    pub async fn update_search_columns<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
        search_text: String,
        soundex: String,
    ) -> Result<(), GeneaError> {
        Entity::update_many()
            .col_expr(Column::SearchText, Expr::value(search_text))
            .col_expr(Column::Soundex, Expr::value(soundex))
            .filter(Column::Id.eq(id))
            .exec(db)
            .await
            .map_err(backend)?;
        Ok(())
    }

    /// Overwrite the denormalized primary-name scalars.
    pub async fn update_primary_name<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
        given: Option<String>,
        surname: Option<String>,
    ) -> Result<(), GeneaError> {
        Entity::update_many()
            .col_expr(Column::Given, Expr::value(given))
            .col_expr(Column::Surname, Expr::value(surname))
            .filter(Column::Id.eq(id))
            .exec(db)
            .await
            .map_err(backend)?;
        Ok(())
    }

    /// Paginated person list. Sort whitelist: `surname`, `given`,
    /// `birth_date`, `death_date`, `created_at`, `updated_at`.
    pub async fn list<C: ConnectionTrait>(
        db: &C,
        opts: &ListOptions,
    ) -> Result<Page<Person>, GeneaError> {
        let sort_column = match opts.sort.as_deref() {
            Some("given") => Column::Given,
            Some("birth_date") => Column::BirthDateSort,
            Some("death_date") => Column::DeathDateSort,
            Some("created_at") => Column::CreatedAt,
            Some("updated_at") => Column::UpdatedAt,
            _ => Column::Surname,
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

    /// All persons, ordered by id for stable export output.
    pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Person>, GeneaError> {
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

    /// Full-text person search over name and place tokens.
    pub async fn search<C: ConnectionTrait>(
        db: &C,
        params: &PersonSearch,
    ) -> Result<Vec<Person>, GeneaError> {
        let mut condition = Condition::all();
        for token in params.query.to_lowercase().split_whitespace() {
            if params.soundex {
                if let Some(code) = crate::repo::search::soundex(token) {
                    condition = condition.add(Column::Soundex.contains(code));
                }
            } else if params.fuzzy {
                condition = condition.add(Column::SearchText.contains(token));
            } else {
                // Whole-token prefix match.
                condition = condition.add(
                    Condition::any()
                        .add(Column::SearchText.like(format!("{token}%")))
                        .add(Column::SearchText.like(format!("% {token}%"))),
                );
            }
        }

        let mut query = Entity::find().filter(condition);
        if let Some(from) = params.birth_date_from {
            query = query.filter(Column::BirthDateSort.gte(from));
        }
        if let Some(to) = params.birth_date_to {
            query = query.filter(Column::BirthDateSort.lte(to));
        }
        if let Some(ref place) = params.birth_place {
            query = query.filter(Column::BirthPlace.contains(place.as_str()));
        }

        let models = query
            .order_by_asc(Column::Surname)
            .order_by_asc(Column::Given)
            .limit(params.limit.unwrap_or(50).clamp(1, 200))
            .all(db)
            .await
            .map_err(backend)?;
        Ok(models.into_iter().map(into_domain).collect())
    }

    /// Distinct surnames with their occurrence counts.
    pub async fn browse_surnames<C: ConnectionTrait>(
        db: &C,
    ) -> Result<Vec<(String, i64)>, GeneaError> {
        let rows: Vec<(Option<String>, i64)> = Entity::find()
            .select_only()
            .column(Column::Surname)
            .column_as(Column::Id.count(), "count")
            .group_by(Column::Surname)
            .order_by_asc(Column::Surname)
            .into_tuple()
            .all(db)
            .await
            .map_err(backend)?;
        Ok(rows
            .into_iter()
            .filter_map(|(surname, count)| surname.map(|s| (s, count)))
            .collect())
    }

    /// Persons with an active brick wall, oldest first.
    pub async fn brick_walls<C: ConnectionTrait>(db: &C) -> Result<Vec<Person>, GeneaError> {
        let models = Entity::find()
            .filter(Column::BrickWallActive.eq(true))
            .order_by_asc(Column::BrickWallSince)
            .all(db)
            .await
            .map_err(backend)?;
        Ok(models.into_iter().map(into_domain).collect())
    }

    /// Persons carrying birth or death coordinates.
    pub async fn with_coordinates<C: ConnectionTrait>(db: &C) -> Result<Vec<Person>, GeneaError> {
        let models = Entity::find()
            .filter(
                Condition::any()
                    .add(Column::BirthLatitude.is_not_null())
                    .add(Column::DeathLatitude.is_not_null()),
            )
            .all(db)
            .await
            .map_err(backend)?;
        Ok(models.into_iter().map(into_domain).collect())
    }
}

fn place_from(
    name: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Option<Place> {
    name.map(|name| Place {
        name,
        latitude,
        longitude,
    })
}

fn into_domain(m: person::Model) -> Person {
    Person {
        id: m.id,
        xref: m.xref,
        given: m.given,
        surname: m.surname,
        gender: m.gender.into(),
        birth_date: from_json_opt(m.birth_date),
        birth_place: place_from(m.birth_place, m.birth_latitude, m.birth_longitude),
        death_date: from_json_opt(m.death_date),
        death_place: place_from(m.death_place, m.death_latitude, m.death_longitude),
        notes: m.notes,
        research_status: m.research_status.into(),
        fsftid: m.fsftid,
        brick_wall_active: m.brick_wall_active,
        brick_wall_note: m.brick_wall_note,
        brick_wall_since: m.brick_wall_since,
        brick_wall_resolved_at: m.brick_wall_resolved_at,
        version: m.version,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn to_active(p: &Person) -> ActiveModel {
    let search_parts: Vec<&str> = [
        p.given.as_deref(),
        p.surname.as_deref(),
        p.birth_place.as_ref().map(|pl| pl.name.as_str()),
        p.death_place.as_ref().map(|pl| pl.name.as_str()),
    ]
    .into_iter()
    .flatten()
    .collect();
    let search_text = build_search_text(search_parts);
    let name_phrase = format!(
        "{} {}",
        p.given.as_deref().unwrap_or(""),
        p.surname.as_deref().unwrap_or("")
    );

    ActiveModel {
        id: Set(p.id),
        xref: Set(p.xref.clone()),
        given: Set(p.given.clone()),
        surname: Set(p.surname.clone()),
        gender: Set(sea_enums::Gender::from(p.gender)),
        birth_date: Set(to_json_opt(&p.birth_date)),
        birth_date_sort: Set(p.birth_date.as_ref().and_then(|d| d.sort_date())),
        birth_place: Set(p.birth_place.as_ref().map(|pl| pl.name.clone())),
        birth_latitude: Set(p.birth_place.as_ref().and_then(|pl| pl.latitude)),
        birth_longitude: Set(p.birth_place.as_ref().and_then(|pl| pl.longitude)),
        death_date: Set(to_json_opt(&p.death_date)),
        death_date_sort: Set(p.death_date.as_ref().and_then(|d| d.sort_date())),
        death_place: Set(p.death_place.as_ref().map(|pl| pl.name.clone())),
        death_latitude: Set(p.death_place.as_ref().and_then(|pl| pl.latitude)),
        death_longitude: Set(p.death_place.as_ref().and_then(|pl| pl.longitude)),
        notes: Set(p.notes.clone()),
        research_status: Set(sea_enums::ResearchStatus::from(p.research_status)),
        fsftid: Set(p.fsftid.clone()),
        brick_wall_active: Set(p.brick_wall_active),
        brick_wall_note: Set(p.brick_wall_note.clone()),
        brick_wall_since: Set(p.brick_wall_since),
        brick_wall_resolved_at: Set(p.brick_wall_resolved_at),
        lifespan: Set(p.lifespan()),
        search_text: Set(search_text),
        soundex: Set(soundex_codes(&name_phrase)),
        version: Set(p.version),
        created_at: Set(p.created_at),
        updated_at: Set(p.updated_at),
    }
}
