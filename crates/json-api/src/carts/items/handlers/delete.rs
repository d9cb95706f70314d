//! Delete Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::{errors::into_status_error, get::CartResponse},
    extensions::*,
    state::State,
};

/// Delete Cart Item Handler
///
/// Removes a product from the cart and returns the updated cart.
#[endpoint(
    tags("carts"),
    summary = "Remove Item from Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Item removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or item not found"),
        (status_code = StatusCode::CONFLICT, description = "Cart is not active"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let cart = state
        .app
        .carts
        .remove_item(user, cart.into_inner().into(), product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::{
        carts::{CartsServiceError, MockCartsService, records::CartUuid},
        products::records::ProductUuid,
    };

    use crate::test_helpers::{carts_service, make_cart};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(
            carts,
            Router::with_path("carts/{cart}/items/{product}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_delete_cart_item_success() -> TestResult {
        let cart = CartUuid::new();
        let product = ProductUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_remove_item()
            .once()
            .withf(move |_, c, p| *c == cart && *p == product)
            .return_once(move |_, _, _| {
                let mut updated = make_cart(cart, product);
                updated.items.clear();
                updated.subtotal = 0;
                Ok(updated)
            });

        let mut res = TestClient::delete(format!(
            "http://example.com/carts/{cart}/items/{product}"
        ))
        .send(&make_service(carts))
        .await;

        let body: CartResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.items.is_empty(), "item should be removed");
        assert_eq!(body.subtotal, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_item_from_abandoned_cart_returns_409() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_remove_item()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::CartNotActive));

        let res = TestClient::delete(format!(
            "http://example.com/carts/{}/items/{}",
            CartUuid::new(),
            ProductUuid::new()
        ))
        .send(&make_service(carts))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
