// Errors layer - Error type definitions
pub mod internal;
pub mod kind;

pub use internal::InternalError;
pub use kind::ErrorKind;

#[cfg(test)]
mod internal_test;
