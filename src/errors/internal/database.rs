use sea_orm::DbErr;
use thiserror::Error;

/// Lower-cased fragments of driver messages for contention, timeouts and dropped connections
const TRANSIENT_MARKERS: &[&str] = &[
    "database is locked",
    "database table is locked",
    "database is busy",
    "could not serialize access",
    "deadlock detected",
    "lock timeout",
    "canceling statement due to statement timeout",
    "pool timed out",
    "connection reset",
    "connection refused",
    "broken pipe",
];

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database error: {operation} failed: {source}")]
    Operation {
        operation: String,
        #[source]
        source: DbErr,
    },

    #[error("Starting transaction failed: {source}")]
    TransactionBegin {
        #[source]
        source: DbErr,
    },

    #[error("Committing transaction failed: {source}")]
    TransactionCommit {
        #[source]
        source: DbErr,
    },
}

impl DatabaseError {
    pub fn db_err(&self) -> &DbErr {
        match self {
            DatabaseError::Operation { source, .. } => source,
            DatabaseError::TransactionBegin { source } => source,
            DatabaseError::TransactionCommit { source } => source,
        }
    }

    pub fn is_transient(&self) -> bool {
        is_transient_db_err(self.db_err())
    }
}

/// Whether a driver error is worth retrying unchanged
pub fn is_transient_db_err(err: &DbErr) -> bool {
    match err {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => true,
        other => {
            let message = other.to_string().to_lowercase();
            TRANSIENT_MARKERS.iter().any(|marker| message.contains(marker))
        }
    }
}
