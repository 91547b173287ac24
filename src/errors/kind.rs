use std::fmt;

/// Caller-facing classification of every failure the core can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input; never retried
    Validation,
    /// The actor lacks the role or assignment to act on a target it can see
    Authorization,
    /// The target does not exist, or the actor has no right to see it
    NotFound,
    /// Terminal-state transition, duplicate invoice, duplicate unique field
    Conflict,
    /// The target exists but is not in a state that permits the operation
    Precondition,
    /// Timeout, lock contention, connection loss; safe for bounded caller retry
    Transient,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Authorization => "authorization",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Precondition => "precondition",
            ErrorKind::Transient => "transient",
            ErrorKind::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
