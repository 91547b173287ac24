use serde::Deserialize;

use crate::errors::internal::ValidationError;
use crate::types::db::Role;

use super::common::require_text;

/// Input for creating a staff account
///
/// `credential_hash` is produced by the authentication layer; it is stored
/// as given and never inspected here.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAccount {
    pub username: String,
    pub credential_hash: String,
    pub role: Role,
}

impl NewAccount {
    pub fn validated(self) -> Result<Self, ValidationError> {
        Ok(Self {
            username: require_text("username", &self.username)?,
            credential_hash: require_text("credential_hash", &self.credential_hash)?,
            role: self.role,
        })
    }
}
