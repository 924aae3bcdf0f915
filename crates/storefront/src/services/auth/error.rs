//! Authentication error types.

use thiserror::Error;

use crate::catalog::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] greenbasket_core::EmailError),

    /// A field failed validation (name, password shape).
    #[error("{0}")]
    Validation(String),

    /// A newer login attempt started while this one was in flight.
    #[error("login superseded by a newer attempt")]
    Superseded,

    /// User already exists.
    #[error("an account with this email already exists")]
    UserAlreadyExists,

    /// Repository error.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}
