//! Research-quality scoring.
//!
//! A fixed rubric over 100 points: identity fields, vital facts with a
//! date-precision bonus, citation coverage, and connectedness to the family
//! graph. Persons with no family edges at all are flagged as orphans.

use serde::Serialize;
use uuid::Uuid;

use genea_core::GeneaError;
use genea_core::enums::Gender;
use genea_core::types::Person;
use genea_db::repo::{CitationRepo, FamilyChildRepo, FamilyRepo, PersonRepo};
use genea_db::sea_orm::DatabaseConnection;

/// Quality assessment of one person record.
#[derive(Debug, Clone, Serialize)]
pub struct QualityReport {
    pub person_id: Uuid,
    pub display_name: String,
    /// 0–100.
    pub score: u8,
    /// True when the person has no family edge in either direction.
    pub orphan: bool,
    /// Rubric items that found nothing.
    pub missing: Vec<String>,
}

pub struct QualityQuery;

impl QualityQuery {
    pub async fn for_person(
        db: &DatabaseConnection,
        person_id: Uuid,
    ) -> Result<Option<QualityReport>, GeneaError> {
        let Some(person) = PersonRepo::get(db, person_id).await? else {
            return Ok(None);
        };
        Ok(Some(Self::assess(db, &person).await?))
    }

    /// Lowest-scoring persons first: the research suggestions feed.
    pub async fn discovery(
        db: &DatabaseConnection,
        limit: usize,
    ) -> Result<Vec<QualityReport>, GeneaError> {
        let mut reports = Vec::new();
        for person in PersonRepo::list_all(db).await? {
            reports.push(Self::assess(db, &person).await?);
        }
        reports.sort_by_key(|r| r.score);
        reports.truncate(limit.clamp(1, 100));
        Ok(reports)
    }

    async fn assess(
        db: &DatabaseConnection,
        person: &Person,
    ) -> Result<QualityReport, GeneaError> {
        let mut score: u32 = 0;
        let mut missing = Vec::new();

        // Identity: 25.
        if person.given.as_deref().is_some_and(|g| !g.is_empty()) {
            score += 10;
        } else {
            missing.push("given name".to_string());
        }
        if person.surname.as_deref().is_some_and(|s| !s.is_empty()) {
            score += 10;
        } else {
            missing.push("surname".to_string());
        }
        if person.gender != Gender::Unknown {
            score += 5;
        } else {
            missing.push("gender".to_string());
        }

        // Vitals: 30, with a precision bonus on the birth date.
        match &person.birth_date {
            Some(date) if !date.is_empty() => {
                score += 10;
                score += match date.precision() {
                    3 => 5,
                    2 => 3,
                    1 => 1,
                    _ => 0,
                };
            }
            _ => missing.push("birth date".to_string()),
        }
        if person.birth_place.is_some() {
            score += 5;
        } else {
            missing.push("birth place".to_string());
        }
        if person.death_date.as_ref().is_some_and(|d| !d.is_empty()) {
            score += 5;
        } else {
            missing.push("death date".to_string());
        }
        if person.death_place.is_some() {
            score += 5;
        } else {
            missing.push("death place".to_string());
        }

        // Citations: 25.
        let citations = CitationRepo::count_for_owner(db, person.id).await?;
        score += match citations {
            0 => 0,
            1 => 10,
            2 => 18,
            _ => 25,
        };
        if citations == 0 {
            missing.push("citations".to_string());
        }

        // Connectedness: 20.
        let child_edges = FamilyChildRepo::families_of_child(db, person.id).await?;
        let partner_edges = FamilyRepo::for_partner(db, person.id).await?;
        if !child_edges.is_empty() {
            score += 10;
        }
        if !partner_edges.is_empty() {
            score += 10;
        }
        let orphan = child_edges.is_empty() && partner_edges.is_empty();
        if orphan {
            missing.push("family connections".to_string());
        }

        Ok(QualityReport {
            person_id: person.id,
            display_name: person.display_name(),
            score: score.min(100) as u8,
            orphan,
            missing,
        })
    }
}
