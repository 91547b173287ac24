use serde::Deserialize;

use crate::errors::internal::ValidationError;

use super::common::{optional_text, require_text};

#[derive(Debug, Clone, Deserialize)]
pub struct NewCustomer {
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl NewCustomer {
    pub fn validated(self) -> Result<Self, ValidationError> {
        Ok(Self {
            full_name: require_text("full_name", &self.full_name)?,
            phone: require_text("phone", &self.phone)?,
            email: optional_text(self.email.as_deref()),
            address: optional_text(self.address.as_deref()),
        })
    }
}

/// Partial customer update; `None` leaves a field untouched
///
/// A blank `email` or `address` clears the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerUpdate {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl CustomerUpdate {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.phone.is_none() && self.email.is_none() && self.address.is_none()
    }

    pub fn validated(self) -> Result<Self, ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyUpdate);
        }
        Ok(Self {
            full_name: self.full_name.as_deref().map(|v| require_text("full_name", v)).transpose()?,
            phone: self.phone.as_deref().map(|v| require_text("phone", v)).transpose()?,
            email: self.email.as_deref().map(str::trim).map(str::to_string),
            address: self.address.as_deref().map(str::trim).map(str::to_string),
        })
    }
}
