//! Result helper extensions for HTTP handlers.

use std::fmt::Display;

use salvo::prelude::StatusError;
use tracing::error;

/// Map any error to a logged internal server error, or to a bad request.
pub(crate) trait ResultExt<T> {
    fn or_500(self, context: &str) -> Result<T, StatusError>;

    fn or_400(self, brief: &str) -> Result<T, StatusError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_500(self, context: &str) -> Result<T, StatusError> {
        self.map_err(|error| {
            error!("{context}: {error}");

            StatusError::internal_server_error()
        })
    }

    fn or_400(self, brief: &str) -> Result<T, StatusError> {
        self.map_err(|error| StatusError::bad_request().brief(brief).detail(error.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn or_400_maps_errors_to_bad_request() {
        let result: Result<u32, _> = "nope".parse::<u32>();

        let error = result.or_400("could not parse number").err();

        assert_eq!(error.map(|e| e.code), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn or_500_passes_through_ok() {
        let result: Result<u32, String> = Ok(7);

        assert_eq!(result.or_500("unused").ok(), Some(7));
    }
}
