//! Browse endpoints: surnames, places, cemeteries, brick walls, and the map
//! location feed.

use std::collections::BTreeMap;

use serde::Serialize;
use uuid::Uuid;

use genea_core::GeneaError;
use genea_core::types::Person;
use genea_db::repo::{FamilyRepo, LifeEventRepo, PersonRepo};
use genea_db::sea_orm::DatabaseConnection;

/// A distinct name with its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceCount {
    pub name: String,
    pub count: u64,
}

/// One mappable location with its owning entity.
#[derive(Debug, Clone, Serialize)]
pub struct MapLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// What the coordinate belongs to: `birth`, `death`, `marriage`, or the
    /// life-event fact type.
    pub kind: String,
    pub owner_id: Uuid,
}

pub struct BrowseQuery;

impl BrowseQuery {
    /// Distinct surnames with counts.
    pub async fn surnames(db: &DatabaseConnection) -> Result<Vec<PlaceCount>, GeneaError> {
        Ok(PersonRepo::browse_surnames(db)
            .await?
            .into_iter()
            .map(|(name, count)| PlaceCount {
                name,
                count: count as u64,
            })
            .collect())
    }

    /// Distinct place names across births, deaths, marriages, and life
    /// events.
    pub async fn places(db: &DatabaseConnection) -> Result<Vec<PlaceCount>, GeneaError> {
        let mut counts: BTreeMap<String, u64> = BTreeMap::new();
        for person in PersonRepo::list_all(db).await? {
            if let Some(place) = person.birth_place {
                *counts.entry(place.name).or_default() += 1;
            }
            if let Some(place) = person.death_place {
                *counts.entry(place.name).or_default() += 1;
            }
        }
        for family in FamilyRepo::list_all(db).await? {
            if let Some(place) = family.marriage_place {
                *counts.entry(place.name).or_default() += 1;
            }
        }
        for event in LifeEventRepo::list_all(db).await? {
            if let Some(place) = event.place {
                *counts.entry(place.name).or_default() += 1;
            }
        }
        Ok(counts
            .into_iter()
            .map(|(name, count)| PlaceCount { name, count })
            .collect())
    }

    /// Burial places with counts.
    pub async fn cemeteries(db: &DatabaseConnection) -> Result<Vec<PlaceCount>, GeneaError> {
        let mut counts: BTreeMap<String, u64> = BTreeMap::new();
        for event in LifeEventRepo::burial_places(db).await? {
            if let Some(place) = event.place {
                *counts.entry(place.name).or_default() += 1;
            }
        }
        Ok(counts
            .into_iter()
            .map(|(name, count)| PlaceCount { name, count })
            .collect())
    }

    /// Persons with an open brick wall, oldest first.
    pub async fn brick_walls(db: &DatabaseConnection) -> Result<Vec<Person>, GeneaError> {
        PersonRepo::brick_walls(db).await
    }

    /// Every place carrying coordinates, with its owning entity ref.
    pub async fn map_locations(db: &DatabaseConnection) -> Result<Vec<MapLocation>, GeneaError> {
        let mut out = Vec::new();
        for person in PersonRepo::with_coordinates(db).await? {
            if let Some(place) = &person.birth_place
                && let (Some(lat), Some(lon)) = (place.latitude, place.longitude)
            {
                out.push(MapLocation {
                    name: place.name.clone(),
                    latitude: lat,
                    longitude: lon,
                    kind: "birth".into(),
                    owner_id: person.id,
                });
            }
            if let Some(place) = &person.death_place
                && let (Some(lat), Some(lon)) = (place.latitude, place.longitude)
            {
                out.push(MapLocation {
                    name: place.name.clone(),
                    latitude: lat,
                    longitude: lon,
                    kind: "death".into(),
                    owner_id: person.id,
                });
            }
        }
        for family in FamilyRepo::with_coordinates(db).await? {
            if let Some(place) = &family.marriage_place
                && let (Some(lat), Some(lon)) = (place.latitude, place.longitude)
            {
                out.push(MapLocation {
                    name: place.name.clone(),
                    latitude: lat,
                    longitude: lon,
                    kind: "marriage".into(),
                    owner_id: family.id,
                });
            }
        }
        for event in LifeEventRepo::with_coordinates(db).await? {
            if let Some(place) = &event.place
                && let (Some(lat), Some(lon)) = (place.latitude, place.longitude)
            {
                out.push(MapLocation {
                    name: place.name.clone(),
                    latitude: lat,
                    longitude: lon,
                    kind: event.fact_type.to_string(),
                    owner_id: event.owner_id,
                });
            }
        }
        Ok(out)
    }
}
