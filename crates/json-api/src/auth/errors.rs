//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::auth::AuthServiceError;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid email or password")
        }
        AuthServiceError::NotFound => StatusError::unauthorized().brief("Invalid session token"),
        AuthServiceError::InvalidExpiry(source) => {
            error!("failed to compute session expiry: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Sql(source) => {
            error!("failed to process session: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Password(source) => {
            error!("failed to verify password: {source}");

            StatusError::internal_server_error()
        }
    }
}
