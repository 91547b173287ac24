// Coordinators layer - Workflow orchestration
//
// Each coordinator method is one operation: resolve the actor, consult the
// access policy, run store calls inside a single transaction, persist the
// resulting audit intents on that same transaction, commit.

pub mod account_coordinator;
pub mod customer_coordinator;
pub mod invoice_coordinator;
pub mod job_coordinator;
pub mod note_coordinator;
pub mod retry;
pub mod vehicle_coordinator;

pub use account_coordinator::AccountCoordinator;
pub use customer_coordinator::CustomerCoordinator;
pub use invoice_coordinator::InvoiceCoordinator;
pub use job_coordinator::JobCoordinator;
pub use note_coordinator::NoteCoordinator;
pub use retry::with_transient_retry;
pub use vehicle_coordinator::VehicleCoordinator;

#[cfg(test)]
mod job_coordinator_tests;
