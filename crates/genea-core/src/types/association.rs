use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::AssociationRole;
use crate::error::GeneaError;

/// A non-family association between two persons (godparent, witness, …).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Association {
    pub id: Uuid,
    pub person_id: Uuid,
    pub associate_id: Uuid,
    pub role: AssociationRole,
    pub phrase: Option<String>,
    pub notes: Option<String>,
}

impl Association {
    pub fn validate(&self) -> Result<(), GeneaError> {
        if self.person_id == self.associate_id {
            return Err(GeneaError::validation(
                "associate_id",
                "a person cannot be associated with themselves",
            ));
        }
        Ok(())
    }
}
