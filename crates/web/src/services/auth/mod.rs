//! Authentication service.
//!
//! Registration and password login for session-mode deployments.
//! Plaintext passwords exist only as in-flight request data here; they
//! are hashed with Argon2id before anything touches the database and are
//! never logged.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use globetrot_core::Email;

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::{MAX_NAME_LENGTH, User};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Authentication service.
///
/// Handles user registration and login.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new user with name, email, and password.
    ///
    /// The email is checked before the password is hashed, so a taken
    /// email never pays for an Argon2 run. The UNIQUE index on the email
    /// column still backstops the race where two registrations interleave.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidName` if the name is empty or too long.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::EmailTaken` if the email is already registered.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        color: &str,
    ) -> Result<User, AuthError> {
        let name = name.trim();
        if name.is_empty() || name.len() > MAX_NAME_LENGTH {
            return Err(AuthError::InvalidName(format!(
                "name must be 1-{MAX_NAME_LENGTH} characters"
            )));
        }

        let email = Email::parse(email.trim())?;

        if self.users.get_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        validate_password(password)?;
        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create_with_password(name, color, &email, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::EmailTaken,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::EmailNotFound` if no account exists for the email.
    /// Returns `AuthError::WrongPassword` if the password doesn't match.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email.trim())?;

        let Some((user, password_hash)) = self.users.get_password_hash(&email).await? else {
            return Err(AuthError::EmailNotFound);
        };

        verify_password(password, &password_hash)?;

        Ok(user)
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::WrongPassword)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::WrongPassword)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn short_passwords_are_rejected() {
        assert!(matches!(
            validate_password("short"),
            Err(AuthError::WeakPassword(_))
        ));
        assert!(validate_password("long enough").is_ok());
    }

    #[test]
    fn hashed_password_verifies() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(verify_password("correct horse battery", &hash).is_ok());
    }

    #[test]
    fn wrong_password_fails_verification() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(matches!(
            verify_password("incorrect horse", &hash),
            Err(AuthError::WrongPassword)
        ));
    }

    #[test]
    fn hash_is_not_the_plaintext() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(!hash.contains("correct horse battery"));
        assert!(hash.starts_with("$argon2"));
    }
}
