//! Delete Promotion Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, promotions::errors::into_status_error, state::State};

/// Delete Promotion Handler
///
/// Promotions that have been redeemed by an order cannot be deleted.
#[endpoint(
    tags("promotions"),
    summary = "Delete Promotion",
    responses(
        (status_code = StatusCode::OK, description = "Promotion deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Promotion not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Promotion already redeemed"),
    ),
)]
pub(crate) async fn handler(
    promotion: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .promotions
        .delete_promotion(promotion.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
