//! Promotions service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::promotions::records::NotRedeemable;

#[derive(Debug, Error)]
pub enum PromotionsServiceError {
    #[error("promotion already exists")]
    AlreadyExists,

    #[error("promotion not found")]
    NotFound,

    #[error("promotion is still referenced")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("promotion is not active yet")]
    NotYetActive,

    #[error("promotion has expired")]
    Expired,

    #[error("promotion usage limit reached")]
    UsageLimitReached,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for PromotionsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<NotRedeemable> for PromotionsServiceError {
    fn from(reason: NotRedeemable) -> Self {
        match reason {
            NotRedeemable::NotYetActive => Self::NotYetActive,
            NotRedeemable::Expired => Self::Expired,
            NotRedeemable::UsageLimitReached => Self::UsageLimitReached,
        }
    }
}
