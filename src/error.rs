// Error module: every failure the account flows can produce. The menu
// prints these with `Display`, so the messages double as the text the
// user sees after a failed action.

use thiserror::Error;

/// Outcome of a failed store or authentication operation.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Username already exists!")]
    DuplicateUser(String),

    #[error("Invalid account type!")]
    InvalidTier(i64),

    #[error("User not found!")]
    UserNotFound(String),

    #[error("Incorrect password!")]
    IncorrectPassword,

    #[error("Permission denied!")]
    PermissionDenied,

    #[error("You cannot do that to your own account!")]
    OwnAccount,

    #[error("Username must not be empty!")]
    EmptyUsername,

    #[error("Error loading users: {0}")]
    StoreRead(String),

    #[error("Error saving users: {0}")]
    StoreWrite(String),

    #[error("Credential error: {0}")]
    Credential(String),
}

pub type Result<T> = std::result::Result<T, AuthError>;
