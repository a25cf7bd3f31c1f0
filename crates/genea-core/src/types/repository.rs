use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::GeneaError;
use crate::types::place::Address;

/// An archive or institution holding sources.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Repository {
    pub id: Uuid,
    pub xref: Option<String>,
    pub name: String,
    pub address: Option<Address>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Repository {
    pub fn validate(&self) -> Result<(), GeneaError> {
        if self.name.trim().is_empty() {
            return Err(GeneaError::validation("name", "must not be empty"));
        }
        Ok(())
    }
}
