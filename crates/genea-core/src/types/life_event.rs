use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::{FactOwnerKind, FactType};
use crate::error::GeneaError;
use crate::gendate::GenDate;
use crate::types::place::{Address, Place};

/// A genealogical life event attached to a person or a family.
///
/// A negated event records that the fact is known NOT to have happened
/// (GEDCOM 7 `NO <TAG>`); it carries no date or place and never feeds the
/// owner's scalar fact fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifeEvent {
    pub id: Uuid,
    pub owner_kind: FactOwnerKind,
    pub owner_id: Uuid,
    pub fact_type: FactType,
    pub date: Option<GenDate>,
    pub place: Option<Place>,
    pub address: Option<Address>,
    pub description: Option<String>,
    pub cause: Option<String>,
    pub age: Option<String>,
    #[serde(default)]
    pub is_negated: bool,
}

impl LifeEvent {
    pub fn validate(&self) -> Result<(), GeneaError> {
        match self.owner_kind {
            FactOwnerKind::Person if self.fact_type.is_family() => {
                return Err(GeneaError::validation(
                    "fact_type",
                    "family event on a person owner",
                ));
            }
            FactOwnerKind::Family if self.fact_type.is_individual() => {
                return Err(GeneaError::validation(
                    "fact_type",
                    "individual event on a family owner",
                ));
            }
            _ => {}
        }
        if self.is_negated && (self.date.is_some() || self.place.is_some()) {
            return Err(GeneaError::validation(
                "is_negated",
                "a negated event carries no date or place",
            ));
        }
        if let Some(ref place) = self.place {
            place.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(owner_kind: FactOwnerKind, fact_type: FactType) -> LifeEvent {
        LifeEvent {
            id: Uuid::now_v7(),
            owner_kind,
            owner_id: Uuid::now_v7(),
            fact_type,
            date: None,
            place: None,
            address: None,
            description: None,
            cause: None,
            age: None,
            is_negated: false,
        }
    }

    #[test]
    fn test_family_fact_on_person_rejected() {
        assert!(event(FactOwnerKind::Person, FactType::Marriage)
            .validate()
            .is_err());
        assert!(event(FactOwnerKind::Family, FactType::Marriage)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_other_fact_valid_for_both_owners() {
        assert!(event(FactOwnerKind::Person, FactType::Other).validate().is_ok());
        assert!(event(FactOwnerKind::Family, FactType::Other).validate().is_ok());
    }

    #[test]
    fn test_negated_event_must_be_bare() {
        let mut e = event(FactOwnerKind::Person, FactType::Death);
        e.is_negated = true;
        assert!(e.validate().is_ok());

        e.date = Some(crate::gendate::GenDate::parse("1900"));
        assert!(e.validate().is_err());
    }
}
