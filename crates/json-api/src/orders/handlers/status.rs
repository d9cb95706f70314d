//! Update Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::records::OrderStatus;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderStatusRequest {
    /// Target status, e.g. `paid` or `cancelled`
    pub status: String,
}

/// Update Order Status Handler
///
/// Orders move pending → paid → shipped → delivered, and may be cancelled
/// until they ship. Cancelling releases reserved stock.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Transition not allowed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
    ),
)]
#[tracing::instrument(
    name = "orders.update_status",
    skip(order, json, depot),
    fields(order_uuid = tracing::field::Empty, status = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let order = order.into_inner();
    let status = json
        .into_inner()
        .status
        .parse::<OrderStatus>()
        .or_400("Unknown order status")?;

    let span = tracing::Span::current();

    span.record("order_uuid", tracing::field::display(order));
    span.record("status", status.as_str());

    let order = state
        .app
        .orders
        .update_order_status(user, order.into(), status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::{
        carts::records::CartUuid,
        orders::{MockOrdersService, OrdersServiceError, records::OrderUuid},
    };

    use crate::test_helpers::{make_order, orders_service};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        orders_service(
            orders,
            Router::with_path("orders/{order}/status").put(handler),
        )
    }

    #[tokio::test]
    async fn test_update_status_to_paid() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_update_order_status()
            .once()
            .withf(move |_, order, status| *order == uuid && *status == OrderStatus::Paid)
            .return_once(move |_, _, status| {
                let mut order = make_order(uuid, CartUuid::new());
                order.status = status;
                Ok(order)
            });

        let mut res = TestClient::put(format!("http://example.com/orders/{uuid}/status"))
            .json(&json!({ "status": "paid" }))
            .send(&make_service(orders))
            .await;

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.status, "paid");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_status_unknown_value_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_update_order_status().never();

        let res = TestClient::put(format!(
            "http://example.com/orders/{}/status",
            OrderUuid::new()
        ))
        .json(&json!({ "status": "teleported" }))
        .send(&make_service(orders))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_status_invalid_transition_returns_409() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_update_order_status()
            .once()
            .return_once(|_, _, _| {
                Err(OrdersServiceError::InvalidTransition {
                    from: OrderStatus::Delivered,
                    to: OrderStatus::Cancelled,
                })
            });

        let res = TestClient::put(format!(
            "http://example.com/orders/{}/status",
            OrderUuid::new()
        ))
        .json(&json!({ "status": "cancelled" }))
        .send(&make_service(orders))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
