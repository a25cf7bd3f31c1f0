use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::AttributeType;
use crate::error::GeneaError;
use crate::gendate::GenDate;

/// A person attribute: a valued fact such as occupation or residence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attribute {
    pub id: Uuid,
    pub person_id: Uuid,
    pub attribute_type: AttributeType,
    pub value: String,
    pub date: Option<GenDate>,
    pub place: Option<String>,
}

impl Attribute {
    pub fn validate(&self) -> Result<(), GeneaError> {
        if self.value.trim().is_empty() {
            return Err(GeneaError::validation("value", "must not be empty"));
        }
        Ok(())
    }
}
