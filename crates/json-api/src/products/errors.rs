//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product SKU already in use")
        }
        ProductsServiceError::InvalidReference => {
            StatusError::bad_request().brief("Category does not exist")
        }
        ProductsServiceError::MissingRequiredData | ProductsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid product payload")
        }
        ProductsServiceError::InvalidPrice(_) => {
            StatusError::bad_request().brief("Price is out of range")
        }
        ProductsServiceError::NotFound => StatusError::not_found(),
        ProductsServiceError::Sql(source) => {
            error!("failed to process product: {source}");

            StatusError::internal_server_error()
        }
    }
}
