//! Argon2id password hashing.

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{self, SaltString, rand_core::OsRng},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hash could not be produced")]
    Hash(#[source] password_hash::Error),

    #[error("stored password hash is malformed")]
    MalformedHash(#[source] password_hash::Error),

    #[error("password task did not complete")]
    Task(#[source] tokio::task::JoinError),
}

/// Hash a password into a PHC string with a fresh random salt.
///
/// # Errors
///
/// Returns an error if Argon2 rejects the input or parameters.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(PasswordError::Hash)
}

/// Check a password against a stored PHC string.
///
/// # Errors
///
/// Returns an error if the stored hash cannot be parsed.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored_hash).map_err(PasswordError::MalformedHash)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(error) => Err(PasswordError::Hash(error)),
    }
}

/// Check a password against the stored hash of an account that may not exist.
///
/// Without a stored hash the password is still hashed once and rejected, so an
/// unknown account costs the same Argon2 work as a wrong password.
///
/// # Errors
///
/// Returns an error if the stored hash cannot be parsed.
pub fn check_credentials(
    password: &str,
    stored_hash: Option<&str>,
) -> Result<bool, PasswordError> {
    match stored_hash {
        Some(stored_hash) => verify_password(password, stored_hash),
        None => hash_password(password).map(|_| false),
    }
}

/// Run a password operation on the blocking thread pool.
///
/// # Errors
///
/// Returns the operation's error, or [`PasswordError::Task`] if it panicked.
pub async fn run_blocking<T, F>(operation: F) -> Result<T, PasswordError>
where
    F: FnOnce() -> Result<T, PasswordError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(operation)
        .await
        .map_err(PasswordError::Task)?
}
