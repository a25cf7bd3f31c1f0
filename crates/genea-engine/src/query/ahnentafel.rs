//! Ahnentafel: the pedigree flattened into Sosa-Stradonitz numbering.
//! Root is 1; a person's father is 2n, their mother 2n+1.

use std::collections::VecDeque;

use serde::Serialize;
use uuid::Uuid;

use genea_core::GeneaError;
use genea_core::types::Person;
use genea_db::repo::PersonRepo;
use genea_db::sea_orm::DatabaseConnection;

use super::pedigree::parents_of;

/// One numbered ancestor.
#[derive(Debug, Clone, Serialize)]
pub struct AhnentafelEntry {
    pub number: u64,
    pub generation: u32,
    pub person: Person,
}

pub struct AhnentafelQuery;

impl AhnentafelQuery {
    /// Numbered ancestor list, ascending by Sosa number. The same ancestor
    /// may appear under several numbers (pedigree collapse); the generation
    /// bound guarantees termination even on cyclic data.
    pub async fn ahnentafel(
        db: &DatabaseConnection,
        person_id: Uuid,
        generations: Option<u32>,
    ) -> Result<Vec<AhnentafelEntry>, GeneaError> {
        let max = super::clamp_generations(generations);
        let Some(root) = PersonRepo::get(db, person_id).await? else {
            return Ok(Vec::new());
        };

        let mut entries = vec![AhnentafelEntry {
            number: 1,
            generation: 1,
            person: root,
        }];
        let mut queue: VecDeque<(Uuid, u64, u32)> = VecDeque::new();
        queue.push_back((person_id, 1, 1));

        while let Some((id, number, generation)) = queue.pop_front() {
            if generation >= max {
                continue;
            }
            let (father, mother) = parents_of(db, id).await?;
            if let Some(father) = father {
                let n = number * 2;
                queue.push_back((father.id, n, generation + 1));
                entries.push(AhnentafelEntry {
                    number: n,
                    generation: generation + 1,
                    person: father,
                });
            }
            if let Some(mother) = mother {
                let n = number * 2 + 1;
                queue.push_back((mother.id, n, generation + 1));
                entries.push(AhnentafelEntry {
                    number: n,
                    generation: generation + 1,
                    person: mother,
                });
            }
        }

        entries.sort_by_key(|e| e.number);
        Ok(entries)
    }

    /// Plain-text rendering, one numbered line per ancestor.
    pub fn to_text(entries: &[AhnentafelEntry]) -> String {
        let mut out = String::new();
        for entry in entries {
            let lifespan = entry.person.lifespan();
            if lifespan.is_empty() {
                out.push_str(&format!("{}. {}\n", entry.number, entry.person.display_name()));
            } else {
                out.push_str(&format!(
                    "{}. {} ({})\n",
                    entry.number,
                    entry.person.display_name(),
                    lifespan
                ));
            }
        }
        out
    }
}
