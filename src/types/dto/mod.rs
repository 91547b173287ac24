// Input models for coordinator operations
pub mod account;
pub mod common;
pub mod customer;
pub mod job;
pub mod vehicle;

pub use account::NewAccount;
pub use customer::{CustomerUpdate, NewCustomer};
pub use job::NewJob;
pub use vehicle::NewVehicle;
