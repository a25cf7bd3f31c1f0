//! Ascending pedigree tree.

use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;

use serde::Serialize;
use uuid::Uuid;

use genea_core::GeneaError;
use genea_core::enums::Gender;
use genea_core::types::Person;
use genea_db::repo::{FamilyChildRepo, FamilyRepo, PersonRepo};
use genea_db::sea_orm::DatabaseConnection;

/// One node of the pedigree tree.
#[derive(Debug, Clone, Serialize)]
pub struct PedigreeNode {
    pub person: Person,
    pub generation: u32,
    pub father: Option<Box<PedigreeNode>>,
    pub mother: Option<Box<PedigreeNode>>,
}

pub struct PedigreeQuery;

impl PedigreeQuery {
    /// Walk ancestors of `person_id` up to `generations` (≤ 10, default 4).
    /// Cyclic data terminates through the visited-id guard.
    pub async fn pedigree(
        db: &DatabaseConnection,
        person_id: Uuid,
        generations: Option<u32>,
    ) -> Result<Option<PedigreeNode>, GeneaError> {
        let max = super::clamp_generations(generations);
        let mut visited = HashSet::new();
        walk(db, person_id, 1, max, &mut visited).await
    }
}

/// Resolve the parents of a person through their family of origin.
pub(crate) async fn parents_of(
    db: &DatabaseConnection,
    person_id: Uuid,
) -> Result<(Option<Person>, Option<Person>), GeneaError> {
    let memberships = FamilyChildRepo::families_of_child(db, person_id).await?;
    let Some(membership) = memberships.first() else {
        return Ok((None, None));
    };
    let Some(family) = FamilyRepo::get(db, membership.family_id).await? else {
        return Ok((None, None));
    };

    let mut partner1 = match family.partner1_id {
        Some(id) => PersonRepo::get(db, id).await?,
        None => None,
    };
    let mut partner2 = match family.partner2_id {
        Some(id) => PersonRepo::get(db, id).await?,
        None => None,
    };

    // Father is the male partner when gender tells us; partner order breaks
    // the tie.
    let p1_female = partner1.as_ref().is_some_and(|p| p.gender == Gender::Female);
    let p2_male = partner2.as_ref().is_some_and(|p| p.gender == Gender::Male);
    if p1_female || (p2_male && partner1.as_ref().is_none_or(|p| p.gender != Gender::Male)) {
        std::mem::swap(&mut partner1, &mut partner2);
    }
    Ok((partner1, partner2))
}

fn walk<'a>(
    db: &'a DatabaseConnection,
    person_id: Uuid,
    generation: u32,
    max: u32,
    visited: &'a mut HashSet<Uuid>,
) -> Pin<Box<dyn Future<Output = Result<Option<PedigreeNode>, GeneaError>> + Send + 'a>> {
    Box::pin(async move {
        if generation > max || !visited.insert(person_id) {
            return Ok(None);
        }
        let Some(person) = PersonRepo::get(db, person_id).await? else {
            return Ok(None);
        };

        let (father, mother) = parents_of(db, person_id).await?;
        let father_node = match father {
            Some(f) => walk(db, f.id, generation + 1, max, visited).await?,
            None => None,
        };
        let mother_node = match mother {
            Some(m) => walk(db, m.id, generation + 1, max, visited).await?,
            None => None,
        };

        Ok(Some(PedigreeNode {
            person,
            generation,
            father: father_node.map(Box::new),
            mother: mother_node.map(Box::new),
        }))
    })
}
