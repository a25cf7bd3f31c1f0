//! Descending family tree: a person, their families, and their children.

use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;

use serde::Serialize;
use uuid::Uuid;

use genea_core::GeneaError;
use genea_core::types::{Family, Person};
use genea_db::repo::{FamilyChildRepo, FamilyRepo, PersonRepo};
use genea_db::sea_orm::DatabaseConnection;

/// One family a person partners in, with the other partner and the ordered
/// children.
#[derive(Debug, Clone, Serialize)]
pub struct FamilyBranch {
    pub family: Family,
    pub spouse: Option<Person>,
    pub children: Vec<DescendancyNode>,
}

/// One node of the descendancy tree.
#[derive(Debug, Clone, Serialize)]
pub struct DescendancyNode {
    pub person: Person,
    pub generation: u32,
    pub families: Vec<FamilyBranch>,
}

pub struct DescendancyQuery;

impl DescendancyQuery {
    /// Walk descendants of `person_id` down to `generations` (≤ 10,
    /// default 4).
    pub async fn descendancy(
        db: &DatabaseConnection,
        person_id: Uuid,
        generations: Option<u32>,
    ) -> Result<Option<DescendancyNode>, GeneaError> {
        let max = super::clamp_generations(generations);
        let mut visited = HashSet::new();
        walk(db, person_id, 1, max, &mut visited).await
    }
}

fn walk<'a>(
    db: &'a DatabaseConnection,
    person_id: Uuid,
    generation: u32,
    max: u32,
    visited: &'a mut HashSet<Uuid>,
) -> Pin<Box<dyn Future<Output = Result<Option<DescendancyNode>, GeneaError>> + Send + 'a>> {
    Box::pin(async move {
        if generation > max || !visited.insert(person_id) {
            return Ok(None);
        }
        let Some(person) = PersonRepo::get(db, person_id).await? else {
            return Ok(None);
        };

        let mut families = Vec::new();
        for family in FamilyRepo::for_partner(db, person_id).await? {
            let spouse_id = match (family.partner1_id, family.partner2_id) {
                (Some(a), b) if a == person_id => b,
                (a, Some(b)) if b == person_id => a,
                _ => None,
            };
            let spouse = match spouse_id {
                Some(id) => PersonRepo::get(db, id).await?,
                None => None,
            };

            let mut children = Vec::new();
            if generation < max {
                for membership in FamilyChildRepo::children_of(db, family.id).await? {
                    if let Some(node) =
                        walk(db, membership.child_id, generation + 1, max, visited).await?
                    {
                        children.push(node);
                    }
                }
            }
            families.push(FamilyBranch {
                family,
                spouse,
                children,
            });
        }

        Ok(Some(DescendancyNode {
            person,
            generation,
            families,
        }))
    })
}
