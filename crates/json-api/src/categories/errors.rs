//! Category Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::categories::CategoriesServiceError;

pub(crate) fn into_status_error(error: CategoriesServiceError) -> StatusError {
    match error {
        CategoriesServiceError::AlreadyExists => {
            StatusError::conflict().brief("Category already exists")
        }
        CategoriesServiceError::InvalidReference => {
            StatusError::bad_request().brief("Category still has products")
        }
        CategoriesServiceError::MissingRequiredData | CategoriesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid category payload")
        }
        CategoriesServiceError::NotFound => StatusError::not_found(),
        CategoriesServiceError::Sql(source) => {
            error!("failed to process category: {source}");

            StatusError::internal_server_error()
        }
    }
}
