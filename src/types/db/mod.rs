// Database entities - SeaORM models
pub mod account;
pub mod audit_event;
pub mod customer;
pub mod invoice;
pub mod job;
pub mod job_note;
pub mod vehicle;

pub use account::Role;
pub use job::JobStatus;
