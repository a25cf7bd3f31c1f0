use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::GeneaError;

/// A named marker over the global event log. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Global log position at creation time.
    pub position: i64,
    pub created_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn validate(&self) -> Result<(), GeneaError> {
        if self.name.trim().is_empty() {
            return Err(GeneaError::validation("name", "must not be empty"));
        }
        Ok(())
    }
}
