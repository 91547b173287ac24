use serde::Deserialize;

use crate::errors::internal::ValidationError;

use super::common::require_text;

#[derive(Debug, Clone, Deserialize)]
pub struct NewJob {
    pub vehicle_id: String,
    pub description: String,
    /// Worker to assign at creation; requires the assign-worker right
    pub assigned_worker: Option<String>,
}

impl NewJob {
    pub fn validated(self) -> Result<Self, ValidationError> {
        Ok(Self {
            vehicle_id: require_text("vehicle_id", &self.vehicle_id)?,
            description: require_text("description", &self.description)?,
            assigned_worker: self.assigned_worker,
        })
    }
}
