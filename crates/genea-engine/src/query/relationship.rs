//! Relationship calculator: bidirectional ancestor expansion to the lowest
//! common ancestor, with human labels for blood and marriage relations.

use std::collections::{HashMap, VecDeque};

use serde::Serialize;
use uuid::Uuid;

use genea_core::GeneaError;
use genea_core::types::Person;
use genea_db::repo::{FamilyChildRepo, FamilyRepo, PersonRepo};
use genea_db::sea_orm::DatabaseConnection;

/// How deep ancestor expansion goes before giving up.
const MAX_DEPTH: u32 = 20;

/// The result of a relationship calculation between two persons.
#[derive(Debug, Clone, Serialize)]
pub struct Relationship {
    pub related: bool,
    pub label: String,
    /// Steps from person A up to the common ancestor (0 when A is the
    /// ancestor).
    pub distance_a: u32,
    /// Steps from person B up to the common ancestor.
    pub distance_b: u32,
    pub common_ancestor: Option<Person>,
}

impl Relationship {
    fn unrelated() -> Self {
        Self {
            related: false,
            label: "no known relationship".into(),
            distance_a: 0,
            distance_b: 0,
            common_ancestor: None,
        }
    }
}

pub struct RelationshipQuery;

impl RelationshipQuery {
    pub async fn relationship(
        db: &DatabaseConnection,
        a: Uuid,
        b: Uuid,
    ) -> Result<Relationship, GeneaError> {
        if PersonRepo::get(db, a).await?.is_none() || PersonRepo::get(db, b).await?.is_none() {
            return Ok(Relationship::unrelated());
        }
        if a == b {
            return Ok(Relationship {
                related: true,
                label: "same person".into(),
                distance_a: 0,
                distance_b: 0,
                common_ancestor: PersonRepo::get(db, a).await?,
            });
        }

        // Marriage edge first: spouses share no blood distance.
        if spouses(db, a).await?.contains(&b) {
            return Ok(Relationship {
                related: true,
                label: "spouse".into(),
                distance_a: 0,
                distance_b: 0,
                common_ancestor: None,
            });
        }

        if let Some(rel) = blood_relationship(db, a, b).await? {
            return Ok(rel);
        }

        // Affinal fallback: blood relation of a spouse.
        for spouse in spouses(db, b).await? {
            if let Some(rel) = blood_relationship(db, a, spouse).await? {
                return Ok(Relationship {
                    label: format!("{} by marriage", rel.label),
                    ..rel
                });
            }
        }
        for spouse in spouses(db, a).await? {
            if let Some(rel) = blood_relationship(db, spouse, b).await? {
                return Ok(Relationship {
                    label: format!("spouse of {}", rel.label),
                    ..rel
                });
            }
        }

        Ok(Relationship::unrelated())
    }
}

/// All spouses of one person, through the families they partner in.
async fn spouses(db: &DatabaseConnection, id: Uuid) -> Result<Vec<Uuid>, GeneaError> {
    let mut out = Vec::new();
    for family in FamilyRepo::for_partner(db, id).await? {
        match (family.partner1_id, family.partner2_id) {
            (Some(p1), Some(p2)) if p1 == id => out.push(p2),
            (Some(p1), Some(p2)) if p2 == id => out.push(p1),
            _ => {}
        }
    }
    Ok(out)
}

/// Ancestor set with minimal depths, self included at depth 0.
async fn ancestors(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<HashMap<Uuid, u32>, GeneaError> {
    let mut depths: HashMap<Uuid, u32> = HashMap::new();
    let mut queue: VecDeque<(Uuid, u32)> = VecDeque::new();
    depths.insert(id, 0);
    queue.push_back((id, 0));

    while let Some((current, depth)) = queue.pop_front() {
        if depth >= MAX_DEPTH {
            continue;
        }
        for membership in FamilyChildRepo::families_of_child(db, current).await? {
            let Some(family) = FamilyRepo::get(db, membership.family_id).await? else {
                continue;
            };
            for parent in [family.partner1_id, family.partner2_id].into_iter().flatten() {
                if !depths.contains_key(&parent) {
                    depths.insert(parent, depth + 1);
                    queue.push_back((parent, depth + 1));
                }
            }
        }
    }
    Ok(depths)
}

async fn blood_relationship(
    db: &DatabaseConnection,
    a: Uuid,
    b: Uuid,
) -> Result<Option<Relationship>, GeneaError> {
    let ancestors_a = ancestors(db, a).await?;
    let ancestors_b = ancestors(db, b).await?;

    // Lowest common ancestor: the one minimizing the total path length.
    let mut best: Option<(Uuid, u32, u32)> = None;
    for (id, &da) in &ancestors_a {
        if let Some(&db_depth) = ancestors_b.get(id) {
            let better = match best {
                Some((_, ba, bb)) => da + db_depth < ba + bb,
                None => true,
            };
            if better {
                best = Some((*id, da, db_depth));
            }
        }
    }
    let Some((lca, m, n)) = best else {
        return Ok(None);
    };

    Ok(Some(Relationship {
        related: true,
        label: blood_label(m, n),
        distance_a: m,
        distance_b: n,
        common_ancestor: PersonRepo::get(db, lca).await?,
    }))
}

fn ordinal(n: u32) -> String {
    match n {
        1 => "first".into(),
        2 => "second".into(),
        3 => "third".into(),
        4 => "fourth".into(),
        5 => "fifth".into(),
        6 => "sixth".into(),
        7 => "seventh".into(),
        8 => "eighth".into(),
        9 => "ninth".into(),
        _ => format!("{n}th"),
    }
}

fn times(n: u32) -> String {
    match n {
        1 => "once".into(),
        2 => "twice".into(),
        _ => format!("{n} times"),
    }
}

fn greats(n: u32, base: &str) -> String {
    match n {
        0 => base.to_string(),
        1 => format!("grand{base}"),
        k => format!("{}grand{base}", "great-".repeat((k - 1) as usize)),
    }
}

/// Label for a blood relation with path lengths `m` (A → LCA) and `n`
/// (B → LCA), phrased as what A is to B.
fn blood_label(m: u32, n: u32) -> String {
    match (m, n) {
        (0, 0) => "same person".into(),
        (0, n) => greats(n - 1, "parent"),
        (m, 0) => greats(m - 1, "child"),
        (1, 1) => "sibling".into(),
        (1, n) => greats(n - 2, "uncle or aunt"),
        (m, 1) => greats(m - 2, "nephew or niece"),
        (m, n) => {
            let degree = m.min(n) - 1;
            let removal = m.abs_diff(n);
            if removal == 0 {
                format!("{} cousin", ordinal(degree))
            } else {
                format!("{} cousin {} removed", ordinal(degree), times(removal))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blood_labels() {
        assert_eq!(blood_label(0, 1), "parent");
        assert_eq!(blood_label(0, 2), "grandparent");
        assert_eq!(blood_label(0, 4), "great-great-grandparent");
        assert_eq!(blood_label(2, 0), "grandchild");
        assert_eq!(blood_label(1, 1), "sibling");
        assert_eq!(blood_label(1, 2), "uncle or aunt");
        assert_eq!(blood_label(1, 3), "granduncle or aunt");
        assert_eq!(blood_label(2, 2), "first cousin");
        assert_eq!(blood_label(3, 3), "second cousin");
        assert_eq!(blood_label(3, 2), "first cousin once removed");
        assert_eq!(blood_label(4, 2), "first cousin twice removed");
    }
}
