//! Category Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    categories::{errors::into_status_error, get::CategoryResponse},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoriesResponse {
    /// The list of categories
    pub categories: Vec<CategoryResponse>,
}

/// Category Index Handler
///
/// Returns categories ordered by name.
#[endpoint(tags("categories"), summary = "List Categories")]
pub(crate) async fn handler(
    skip: QueryParam<u64, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<CategoriesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let categories = state
        .app
        .categories
        .list_categories((skip, limit).into_page())
        .await
        .map_err(into_status_error)?;

    Ok(Json(CategoriesResponse {
        categories: categories.into_iter().map(Into::into).collect(),
    }))
}
