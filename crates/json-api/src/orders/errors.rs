//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::InvalidReference => {
            StatusError::bad_request().brief("Product is no longer available")
        }
        OrdersServiceError::MissingRequiredData | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::CartNotActive => {
            StatusError::conflict().brief("Cart is no longer active")
        }
        OrdersServiceError::EmptyCart => StatusError::conflict().brief("Cart is empty"),
        OrdersServiceError::InsufficientStock => {
            StatusError::conflict().brief("Not enough stock to fulfil order")
        }
        OrdersServiceError::InvalidTransition { from, to } => StatusError::conflict()
            .brief("Order status change not allowed")
            .detail(format!("cannot move order from {from} to {to}")),
        OrdersServiceError::UnknownPromotion => {
            StatusError::unprocessable_entity().brief("Promotion code not recognised")
        }
        OrdersServiceError::PromotionNotRedeemable(reason) => StatusError::unprocessable_entity()
            .brief("Promotion cannot be redeemed")
            .detail(reason.to_string()),
        OrdersServiceError::NotFound => StatusError::not_found(),
        OrdersServiceError::Sql(source) => {
            error!("failed to process order: {source}");

            StatusError::internal_server_error()
        }
    }
}
