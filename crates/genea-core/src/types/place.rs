use serde::{Deserialize, Serialize};

use crate::error::GeneaError;

/// A place attached to a fact: free-text jurisdiction string plus optional
/// coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Place {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            latitude: None,
            longitude: None,
        }
    }

    pub fn validate(&self) -> Result<(), GeneaError> {
        if let Some(lat) = self.latitude
            && !(-90.0..=90.0).contains(&lat)
        {
            return Err(GeneaError::validation("latitude", "must be within ±90"));
        }
        if let Some(lon) = self.longitude
            && !(-180.0..=180.0).contains(&lon)
        {
            return Err(GeneaError::validation("longitude", "must be within ±180"));
        }
        Ok(())
    }
}

/// A structured postal address, aligned with GEDCOM `ADDR` sub-structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub line3: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl Address {
    pub fn is_empty(&self) -> bool {
        self.line1.is_none()
            && self.line2.is_none()
            && self.line3.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.postal_code.is_none()
            && self.country.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_coordinate_bounds() {
        let mut place = Place::named("Springfield, IL");
        place.latitude = Some(39.78);
        place.longitude = Some(-89.65);
        assert!(place.validate().is_ok());

        place.latitude = Some(91.0);
        assert!(place.validate().is_err());
    }

    #[test]
    fn test_address_is_empty() {
        assert!(Address::default().is_empty());
        let addr = Address {
            city: Some("Lyon".into()),
            ..Default::default()
        };
        assert!(!addr.is_empty());
    }
}
