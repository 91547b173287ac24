use chrono::{Datelike, Utc};
use serde::Deserialize;

use crate::errors::internal::ValidationError;

use super::common::require_text;

/// Earliest model year accepted for a vehicle
pub const FIRST_MODEL_YEAR: i32 = 1886;

#[derive(Debug, Clone, Deserialize)]
pub struct NewVehicle {
    pub customer_id: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub plate_number: String,
}

impl NewVehicle {
    pub fn validated(self) -> Result<Self, ValidationError> {
        // Next year's models are sold before the calendar turns over
        let latest = Utc::now().year() + 1;
        if self.year < FIRST_MODEL_YEAR || self.year > latest {
            return Err(ValidationError::YearOutOfRange {
                year: self.year,
                min: FIRST_MODEL_YEAR,
                max: latest,
            });
        }
        Ok(Self {
            customer_id: require_text("customer_id", &self.customer_id)?,
            make: require_text("make", &self.make)?,
            model: require_text("model", &self.model)?,
            year: self.year,
            plate_number: require_text("plate_number", &self.plate_number)?.to_uppercase(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(year: i32) -> NewVehicle {
        NewVehicle {
            customer_id: "c-1".to_string(),
            make: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year,
            plate_number: " abc-123 ".to_string(),
        }
    }

    #[test]
    fn test_plate_is_normalized() {
        assert_eq!(vehicle(2015).validated().unwrap().plate_number, "ABC-123");
    }

    #[test]
    fn test_year_bounds() {
        assert!(vehicle(1885).validated().is_err());
        assert!(vehicle(FIRST_MODEL_YEAR).validated().is_ok());
        assert!(vehicle(Utc::now().year() + 2).validated().is_err());
    }
}
