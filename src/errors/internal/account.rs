use thiserror::Error;

#[derive(Error, Debug)]
pub enum AccountError {
    #[error("Account already exists: {username}")]
    DuplicateUsername { username: String },

    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("Account is deactivated: {0}")]
    Inactive(String),

    #[error("Accounts already exist; bootstrap is only allowed on an empty system")]
    AlreadyBootstrapped,
}
