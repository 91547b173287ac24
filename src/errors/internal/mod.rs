use thiserror::Error;

pub mod access;
pub mod account;
pub mod audit;
pub mod customer;
pub mod database;
pub mod invoice;
pub mod job;
pub mod validation;
pub mod vehicle;

pub use access::AccessError;
pub use account::AccountError;
pub use audit::AuditError;
pub use customer::CustomerError;
pub use database::DatabaseError;
pub use invoice::InvoiceError;
pub use job::JobError;
pub use validation::ValidationError;
pub use vehicle::VehicleError;

use super::ErrorKind;

/// Error type for store and coordinator operations
///
/// Infrastructure errors (database, audit) are shared; domain errors live with their entity.
/// Every variant maps to exactly one [`ErrorKind`] so callers never inspect messages.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Parse error: failed to parse {value_type}: {message}")]
    Parse { value_type: String, message: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Account(#[from] AccountError),

    #[error(transparent)]
    Customer(#[from] CustomerError),

    #[error(transparent)]
    Vehicle(#[from] VehicleError),

    #[error(transparent)]
    Job(#[from] JobError),

    #[error(transparent)]
    Invoice(#[from] InvoiceError),

    #[error(transparent)]
    Audit(#[from] AuditError),
}

impl InternalError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::Operation {
            operation: operation.to_string(),
            source,
        })
    }

    pub fn parse(value_type: &str, message: impl Into<String>) -> InternalError {
        InternalError::Parse {
            value_type: value_type.to_string(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            InternalError::Database(e) if e.is_transient() => ErrorKind::Transient,
            InternalError::Database(_) => ErrorKind::Internal,
            InternalError::Parse { .. } => ErrorKind::Internal,
            InternalError::Validation(_) => ErrorKind::Validation,
            InternalError::Access(AccessError::Hidden { .. }) => ErrorKind::NotFound,
            InternalError::Access(_) => ErrorKind::Authorization,
            InternalError::Account(e) => match e {
                AccountError::DuplicateUsername { .. } | AccountError::AlreadyBootstrapped => {
                    ErrorKind::Conflict
                }
                AccountError::NotFound(_) => ErrorKind::NotFound,
                AccountError::Inactive(_) => ErrorKind::Authorization,
            },
            InternalError::Customer(e) => match e {
                CustomerError::NotFound(_) => ErrorKind::NotFound,
                CustomerError::Inactive(_) => ErrorKind::Precondition,
            },
            InternalError::Vehicle(e) => match e {
                VehicleError::NotFound(_) => ErrorKind::NotFound,
                VehicleError::HasJobs { .. } => ErrorKind::Conflict,
            },
            InternalError::Job(e) => match e {
                JobError::NotFound(_) => ErrorKind::NotFound,
                JobError::TerminalState { .. } => ErrorKind::Conflict,
                JobError::InvalidTransition { .. } => ErrorKind::Validation,
                JobError::ConcurrentModification { .. } => ErrorKind::Transient,
                JobError::WorkerInactive(_) => ErrorKind::Precondition,
            },
            InternalError::Invoice(e) => match e {
                InvoiceError::NotFound(_) | InvoiceError::NoInvoiceForJob(_) => {
                    ErrorKind::NotFound
                }
                InvoiceError::AlreadyIssued { .. } => ErrorKind::Conflict,
                InvoiceError::JobNotCompleted { .. } => ErrorKind::Precondition,
            },
            InternalError::Audit(_) => ErrorKind::Internal,
        }
    }

    pub fn is_transient(&self) -> bool {
        self.kind() == ErrorKind::Transient
    }
}
