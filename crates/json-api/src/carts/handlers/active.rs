//! Active Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{errors::into_status_error, get::CartResponse},
    extensions::*,
    state::State,
};

/// Active Cart Handler
///
/// Returns the caller's active cart, opening an empty one if they have none.
#[endpoint(
    tags("carts"),
    summary = "Get Active Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Active cart"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let cart = state
        .app
        .carts
        .get_or_create_active_cart(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::{
        carts::{MockCartsService, records::CartUuid},
        products::records::ProductUuid,
    };

    use crate::test_helpers::{TEST_USER_UUID, carts_service, make_cart};

    use super::*;

    #[tokio::test]
    async fn test_active_cart_is_returned_for_the_caller() -> TestResult {
        let uuid = CartUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_get_or_create_active_cart()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(move |_| Ok(make_cart(uuid, ProductUuid::new())));

        let service = carts_service(carts, Router::with_path("cart").get(handler));

        let mut res = TestClient::get("http://example.com/cart").send(&service).await;

        let body: CartResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.uuid, uuid.into_uuid());

        Ok(())
    }
}
