use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use crate::errors::internal::ValidationError;

/// Number of decimal places carried by every amount
pub const SCALE: u32 = 2;

/// Non-negative monetary value with exactly two decimal places
///
/// Held as integer cents so arithmetic and storage never round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount {
    cents: i64,
}

impl Amount {
    pub fn from_cents(cents: i64) -> Result<Self, ValidationError> {
        if cents < 0 {
            return Err(ValidationError::NegativeAmount(Decimal::new(cents, SCALE).to_string()));
        }
        Ok(Self { cents })
    }

    pub fn from_decimal(value: Decimal) -> Result<Self, ValidationError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(ValidationError::NegativeAmount(value.to_string()));
        }

        let normalized = value.normalize();
        if normalized.scale() > SCALE {
            return Err(ValidationError::TooManyDecimalPlaces(value.to_string()));
        }

        let cents = normalized
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|c| c.to_i64())
            .ok_or_else(|| ValidationError::AmountOutOfRange(value.to_string()))?;

        Ok(Self { cents: cents.abs() })
    }

    pub fn cents(&self) -> i64 {
        self.cents
    }

    pub fn as_decimal(&self) -> Decimal {
        Decimal::new(self.cents, SCALE)
    }
}

impl FromStr for Amount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value = Decimal::from_str(trimmed)
            .map_err(|_| ValidationError::InvalidAmount(trimmed.to_string()))?;
        Self::from_decimal(value)
    }
}

impl TryFrom<f64> for Amount {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(ValidationError::NonFiniteAmount(value.to_string()));
        }
        // Display for f64 is the shortest exact round-trip form, so 250.1 stays 250.1
        value.to_string().parse()
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = ValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::from_decimal(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_decimal())
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
