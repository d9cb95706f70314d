//! Auth service errors.

use sqlx::Error;
use thiserror::Error;

use crate::auth::PasswordError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("session not found")]
    NotFound,

    #[error("session expiry is out of range")]
    InvalidExpiry(#[source] jiff::Error),

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("password verification error")]
    Password(#[from] PasswordError),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}
