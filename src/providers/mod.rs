// Providers layer - Pure business rules
//
// Providers hold the rules coordinators consult before touching a store:
// who may do what, and which job status changes are legal.

pub mod access_policy;
pub mod job_lifecycle;

pub use access_policy::{AccessPolicy, Action, Decision, DenyReason, Target};
