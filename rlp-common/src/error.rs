//! Common error types for the recipe service

use crate::validation::ValidationErrors;
use thiserror::Error;

/// Common result type for recipe operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error hierarchy shared by the store, the validation layer and the binaries
///
/// The HTTP layer classifies these into status codes; see `rlp_api::error`.
#[derive(Error, Debug)]
pub enum Error {
    /// Input failed one or more field checks; nothing was applied
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Uniqueness violation on (name, job)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Store operation failed and was rolled back
    #[error("Store error: {0}")]
    Store(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Error::Validation(errors)
    }
}
