use thiserror::Error;

#[derive(Error, Debug)]
pub enum CustomerError {
    #[error("Customer not found: {0}")]
    NotFound(String),

    #[error("Customer is deactivated: {0}")]
    Inactive(String),
}
