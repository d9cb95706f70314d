//! Cart Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    carts::{errors::into_status_error, get::CartResponse},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartsResponse {
    pub carts: Vec<CartResponse>,
}

/// Cart Index Handler
///
/// Lists the caller's carts, newest first.
#[endpoint(tags("carts"), summary = "List Carts", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    skip: QueryParam<u64, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<CartsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let carts = state
        .app
        .carts
        .list_carts(user, (skip, limit).into_page())
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartsResponse {
        carts: carts.into_iter().map(Into::into).collect(),
    }))
}
