use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::{FactOwnerKind, LdsOrdinanceType};
use crate::error::GeneaError;
use crate::gendate::GenDate;

/// An LDS ordinance. Sealing-spouse binds to a family, all other types to a
/// person.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LdsOrdinance {
    pub id: Uuid,
    pub ordinance_type: LdsOrdinanceType,
    pub owner_kind: FactOwnerKind,
    pub owner_id: Uuid,
    pub date: Option<GenDate>,
    /// Temple code, e.g. `SLAKE`.
    pub temple: Option<String>,
    pub status: Option<String>,
    pub place: Option<String>,
}

impl LdsOrdinance {
    pub fn validate(&self) -> Result<(), GeneaError> {
        let wants_family = self.ordinance_type.is_family();
        let is_family = matches!(self.owner_kind, FactOwnerKind::Family);
        if wants_family != is_family {
            return Err(GeneaError::validation(
                "owner_kind",
                "ordinance type does not match owner kind",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sealing_spouse_requires_family_owner() {
        let ordinance = LdsOrdinance {
            id: Uuid::now_v7(),
            ordinance_type: LdsOrdinanceType::SealingSpouse,
            owner_kind: FactOwnerKind::Person,
            owner_id: Uuid::now_v7(),
            date: None,
            temple: None,
            status: None,
            place: None,
        };
        assert!(ordinance.validate().is_err());
    }

    #[test]
    fn test_endowment_requires_person_owner() {
        let ordinance = LdsOrdinance {
            id: Uuid::now_v7(),
            ordinance_type: LdsOrdinanceType::Endowment,
            owner_kind: FactOwnerKind::Person,
            owner_id: Uuid::now_v7(),
            date: None,
            temple: Some("SLAKE".into()),
            status: None,
            place: None,
        };
        assert!(ordinance.validate().is_ok());
    }
}
