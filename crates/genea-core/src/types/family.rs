use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::{ChildRelationship, RelationshipType};
use crate::error::GeneaError;
use crate::gendate::GenDate;
use crate::types::place::Place;

/// A family unit: up to two partners and an ordered list of children.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Family {
    pub id: Uuid,
    pub xref: Option<String>,
    pub partner1_id: Option<Uuid>,
    pub partner2_id: Option<Uuid>,
    #[serde(default = "default_relationship")]
    pub relationship_type: RelationshipType,
    pub marriage_date: Option<GenDate>,
    pub marriage_place: Option<Place>,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_relationship() -> RelationshipType {
    RelationshipType::Unknown
}

impl Family {
    pub fn validate(&self) -> Result<(), GeneaError> {
        if let (Some(a), Some(b)) = (self.partner1_id, self.partner2_id)
            && a == b
        {
            return Err(GeneaError::validation(
                "partner2_id",
                "partners must be distinct persons",
            ));
        }
        if let Some(ref place) = self.marriage_place {
            place.validate()?;
        }
        Ok(())
    }
}

/// A child's membership in a family. `child_id` is unique within a family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyChild {
    pub id: Uuid,
    pub family_id: Uuid,
    pub child_id: Uuid,
    pub relationship: ChildRelationship,
    pub sequence: i32,
}

impl FamilyChild {
    pub fn validate(&self) -> Result<(), GeneaError> {
        if self.sequence < 0 {
            return Err(GeneaError::validation("sequence", "must not be negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_partners_fail_validation() {
        let id = Uuid::now_v7();
        let family = Family {
            partner1_id: Some(id),
            partner2_id: Some(id),
            ..Default::default()
        };
        assert!(family.validate().is_err());
    }

    #[test]
    fn test_single_partner_is_valid() {
        let family = Family {
            partner1_id: Some(Uuid::now_v7()),
            ..Default::default()
        };
        assert!(family.validate().is_ok());
    }
}
