//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::AlreadyExists => StatusError::conflict().brief("Cart already exists"),
        CartsServiceError::InvalidReference => {
            StatusError::bad_request().brief("Product does not exist")
        }
        CartsServiceError::MissingRequiredData | CartsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid cart data")
        }
        CartsServiceError::CartNotActive => {
            StatusError::conflict().brief("Cart is no longer active")
        }
        CartsServiceError::InsufficientStock => {
            StatusError::conflict().brief("Not enough stock for requested quantity")
        }
        CartsServiceError::NotFound => StatusError::not_found(),
        CartsServiceError::Sql(source) => {
            error!("failed to process cart: {source}");

            StatusError::internal_server_error()
        }
    }
}
