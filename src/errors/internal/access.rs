use thiserror::Error;

use crate::providers::access_policy::{Action, DenyReason};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("Operation requires an authenticated actor")]
    Unauthenticated,

    #[error("Not permitted to {action}: {reason}")]
    Forbidden { action: Action, reason: DenyReason },

    /// The actor may not know the target exists; reported exactly like a missing row
    #[error("{entity} not found: {id}")]
    Hidden { entity: &'static str, id: String },
}
