use crate::errors::InternalError;
use crate::types::internal::ActionOutcome;

// Types layer - All data structures
pub mod db;
pub mod dto;
pub mod internal;

/// Return type of mutating store operations
pub type StoreResult<T> = Result<ActionOutcome<T>, InternalError>;
