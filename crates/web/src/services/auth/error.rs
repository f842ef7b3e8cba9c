//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during registration and login.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] globetrot_core::EmailError),

    /// Display name missing or too long.
    #[error("invalid name: {0}")]
    InvalidName(String),

    /// The email is already registered.
    #[error("email already registered")]
    EmailTaken,

    /// No account exists for the email.
    ///
    /// Kept distinct from [`WrongPassword`](Self::WrongPassword): the
    /// login page tells unknown emails to register instead.
    #[error("no account for this email")]
    EmailNotFound,

    /// The password did not match.
    #[error("incorrect password")]
    WrongPassword,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
