use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::{Gender, NameType, ResearchStatus};
use crate::error::GeneaError;
use crate::gendate::GenDate;
use crate::types::place::Place;

/// A person. The scalar given/surname mirror the primary name; the full set
/// of names lives in [`PersonName`] rows owned by the same aggregate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Person {
    pub id: Uuid,
    /// External correlation token preserved across GEDCOM import/export.
    pub xref: Option<String>,
    pub given: Option<String>,
    pub surname: Option<String>,
    #[serde(default = "default_gender")]
    pub gender: Gender,
    pub birth_date: Option<GenDate>,
    pub birth_place: Option<Place>,
    pub death_date: Option<GenDate>,
    pub death_place: Option<Place>,
    pub notes: Option<String>,
    #[serde(default = "default_research_status")]
    pub research_status: ResearchStatus,
    /// FamilySearch tree id (`_FSFTID` vendor extension).
    pub fsftid: Option<String>,
    pub brick_wall_active: bool,
    pub brick_wall_note: Option<String>,
    pub brick_wall_since: Option<DateTime<Utc>>,
    pub brick_wall_resolved_at: Option<DateTime<Utc>>,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_gender() -> Gender {
    Gender::Unknown
}

fn default_research_status() -> ResearchStatus {
    ResearchStatus::Unknown
}

impl Person {
    pub fn validate(&self) -> Result<(), GeneaError> {
        if let Some(ref place) = self.birth_place {
            place.validate()?;
        }
        if let Some(ref place) = self.death_place {
            place.validate()?;
        }
        if let (Some(birth), Some(death)) = (&self.birth_date, &self.death_date)
            && let (Some(b), Some(d)) = (birth.sort_date(), death.sort_date())
            && d < b
        {
            return Err(GeneaError::validation(
                "death_date",
                "death precedes birth",
            ));
        }
        Ok(())
    }

    /// Display name composed from the primary given/surname scalars.
    pub fn display_name(&self) -> String {
        match (self.given.as_deref(), self.surname.as_deref()) {
            (Some(g), Some(s)) => format!("{g} {s}"),
            (Some(g), None) => g.to_string(),
            (None, Some(s)) => s.to_string(),
            (None, None) => "Unknown".to_string(),
        }
    }

    /// Lifespan label, e.g. `"1850–1910"`, `"1850–"`, or `""`.
    pub fn lifespan(&self) -> String {
        let birth = self.birth_date.as_ref().and_then(|d| d.year);
        let death = self.death_date.as_ref().and_then(|d| d.year);
        match (birth, death) {
            (Some(b), Some(d)) => format!("{b}\u{2013}{d}"),
            (Some(b), None) => format!("{b}\u{2013}"),
            (None, Some(d)) => format!("\u{2013}{d}"),
            (None, None) => String::new(),
        }
    }
}

/// A name for a person; each person has exactly one primary name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonName {
    pub id: Uuid,
    pub person_id: Uuid,
    #[serde(default = "default_name_type")]
    pub name_type: NameType,
    pub given: Option<String>,
    pub surname: Option<String>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub surname_prefix: Option<String>,
    pub nickname: Option<String>,
    pub is_primary: bool,
}

fn default_name_type() -> NameType {
    NameType::Birth
}

impl PersonName {
    pub fn validate(&self) -> Result<(), GeneaError> {
        if self.given.as_deref().unwrap_or("").is_empty()
            && self.surname.as_deref().unwrap_or("").is_empty()
        {
            return Err(GeneaError::validation(
                "given",
                "a name needs a given name or a surname",
            ));
        }
        Ok(())
    }

    /// Returns a display-friendly full name.
    pub fn display_name(&self) -> String {
        let mut parts = Vec::new();
        if let Some(ref prefix) = self.prefix {
            parts.push(prefix.as_str());
        }
        if let Some(ref given) = self.given {
            parts.push(given.as_str());
        }
        if let Some(ref surname_prefix) = self.surname_prefix {
            parts.push(surname_prefix.as_str());
        }
        if let Some(ref surname) = self.surname {
            parts.push(surname.as_str());
        }
        if let Some(ref suffix) = self.suffix {
            parts.push(suffix.as_str());
        }
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gendate::GenDate;

    #[test]
    fn test_display_name_full() {
        let name = PersonName {
            given: Some("Jean-Pierre".to_string()),
            surname: Some("Dupont".to_string()),
            prefix: Some("Dr.".to_string()),
            suffix: Some("Jr.".to_string()),
            is_primary: true,
            ..Default::default()
        };
        assert_eq!(name.display_name(), "Dr. Jean-Pierre Dupont Jr.");
    }

    #[test]
    fn test_display_name_with_surname_prefix() {
        let name = PersonName {
            given: Some("Willem".to_string()),
            surname_prefix: Some("van der".to_string()),
            surname: Some("Berg".to_string()),
            ..Default::default()
        };
        assert_eq!(name.display_name(), "Willem van der Berg");
    }

    #[test]
    fn test_empty_name_fails_validation() {
        let name = PersonName::default();
        assert!(name.validate().is_err());
    }

    #[test]
    fn test_death_before_birth_fails_validation() {
        let person = Person {
            birth_date: Some(GenDate::parse("1900")),
            death_date: Some(GenDate::parse("1850")),
            ..Default::default()
        };
        assert!(person.validate().is_err());
    }

    #[test]
    fn test_lifespan_labels() {
        let person = Person {
            birth_date: Some(GenDate::parse("15 JAN 1850")),
            death_date: Some(GenDate::parse("1910")),
            ..Default::default()
        };
        assert_eq!(person.lifespan(), "1850\u{2013}1910");
        assert_eq!(Person::default().lifespan(), "");
    }
}
