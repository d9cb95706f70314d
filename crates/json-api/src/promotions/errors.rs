//! Promotion Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::promotions::PromotionsServiceError;

pub(crate) fn into_status_error(error: PromotionsServiceError) -> StatusError {
    match error {
        PromotionsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Promotion code already exists")
        }
        PromotionsServiceError::InvalidReference => {
            StatusError::bad_request().brief("Promotion has already been redeemed")
        }
        PromotionsServiceError::MissingRequiredData | PromotionsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid promotion payload")
        }
        PromotionsServiceError::NotYetActive => {
            StatusError::unprocessable_entity().brief("Promotion is not active yet")
        }
        PromotionsServiceError::Expired => {
            StatusError::unprocessable_entity().brief("Promotion has expired")
        }
        PromotionsServiceError::UsageLimitReached => {
            StatusError::unprocessable_entity().brief("Promotion usage limit reached")
        }
        PromotionsServiceError::NotFound => StatusError::not_found(),
        PromotionsServiceError::Sql(source) => {
            error!("failed to process promotion: {source}");

            StatusError::internal_server_error()
        }
    }
}
