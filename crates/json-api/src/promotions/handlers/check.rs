//! Check Promotion Code Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    extensions::*,
    promotions::{errors::into_status_error, get::PromotionResponse},
    state::State,
};

/// Check Promotion Code Handler
///
/// Returns the promotion if `code` can be redeemed right now. Codes that
/// exist but are outside their window or used up answer 422.
#[endpoint(
    tags("promotions"),
    summary = "Check Promotion Code",
    responses(
        (status_code = StatusCode::OK, description = "Promotion is redeemable"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown code"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Promotion is not redeemable"),
    ),
)]
pub(crate) async fn handler(
    code: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<PromotionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let promotion = state
        .app
        .promotions
        .check_promotion(&code.into_inner(), Timestamp::now())
        .await
        .map_err(into_status_error)?;

    Ok(Json(promotion.into()))
}
