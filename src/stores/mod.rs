// Stores layer - Data access and repository pattern
//
// Stores never commit. They run on whatever connection or transaction the
// coordinator hands in and describe their changes as audit intents.
pub mod account_store;
pub mod audit_store;
pub mod customer_store;
pub mod invoice_store;
pub mod job_store;
pub mod note_store;
pub mod vehicle_store;

pub use account_store::AccountStore;
pub use audit_store::AuditStore;
pub use customer_store::CustomerStore;
pub use invoice_store::InvoiceStore;
pub use job_store::JobStore;
pub use note_store::NoteStore;
pub use vehicle_store::VehicleStore;

use sea_orm::{DbErr, SqlErr};

pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
