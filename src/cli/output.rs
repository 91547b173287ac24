use serde::Serialize;
use serde_json::{json, Value};

use crate::errors::{ErrorKind, InternalError};

/// Process exit status for each error kind
///
/// Transient failures use 75 (EX_TEMPFAIL) so wrappers know a retry may help.
pub fn exit_code(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::Validation => 2,
        ErrorKind::Authorization => 3,
        ErrorKind::NotFound => 4,
        ErrorKind::Conflict => 5,
        ErrorKind::Precondition => 6,
        ErrorKind::Transient => 75,
    }
}

pub fn to_json<T: Serialize>(value: &T) -> Result<Value, InternalError> {
    serde_json::to_value(value).map_err(|e| InternalError::parse("json", e.to_string()))
}

/// Machine-readable error body written to stderr
pub fn render_error(error: &InternalError) -> Value {
    json!({
        "error": error.kind().as_str(),
        "message": error.to_string(),
    })
}
