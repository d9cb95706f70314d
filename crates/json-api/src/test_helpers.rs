//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use storefront_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            records::{CartItemRecord, CartItemUuid, CartRecord, CartStatus, CartUuid},
        },
        categories::{
            MockCategoriesService,
            records::{CategoryRecord, CategoryUuid},
        },
        orders::{
            MockOrdersService,
            records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderStatus, OrderUuid},
        },
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid},
        },
        promotions::{
            MockPromotionsService,
            records::{PromotionRecord, PromotionUuid},
        },
        users::{
            MockUsersService,
            records::{UserRecord, UserUuid},
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_uuid(TEST_USER_UUID);
    ctrl.call_next(req, depot, res).await;
}

/// Mocks with no expectations: any call fails the test.
pub(crate) fn strict_app() -> AppContext {
    AppContext {
        categories: Arc::new(MockCategoriesService::new()),
        products: Arc::new(MockProductsService::new()),
        users: Arc::new(MockUsersService::new()),
        auth: Arc::new(MockAuthService::new()),
        carts: Arc::new(MockCartsService::new()),
        promotions: Arc::new(MockPromotionsService::new()),
        orders: Arc::new(MockOrdersService::new()),
    }
}

fn public_service(app: AppContext, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(State::from_app_context(app)))
            .push(route),
    )
}

/// A service with state but no authenticated user.
pub(crate) fn anonymous_service(route: Router) -> Service {
    public_service(strict_app(), route)
}

fn authenticated_service(app: AppContext, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(State::from_app_context(app)))
            .hoop(inject_user)
            .push(route),
    )
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    State::from_app_context(AppContext {
        auth: Arc::new(auth),
        ..strict_app()
    })
}

pub(crate) fn categories_service(categories: MockCategoriesService, route: Router) -> Service {
    public_service(
        AppContext {
            categories: Arc::new(categories),
            ..strict_app()
        },
        route,
    )
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    public_service(
        AppContext {
            products: Arc::new(products),
            ..strict_app()
        },
        route,
    )
}

pub(crate) fn promotions_service(promotions: MockPromotionsService, route: Router) -> Service {
    public_service(
        AppContext {
            promotions: Arc::new(promotions),
            ..strict_app()
        },
        route,
    )
}

pub(crate) fn users_service(users: MockUsersService, route: Router) -> Service {
    authenticated_service(
        AppContext {
            users: Arc::new(users),
            ..strict_app()
        },
        route,
    )
}

pub(crate) fn auth_service(auth: MockAuthService, route: Router) -> Service {
    public_service(
        AppContext {
            auth: Arc::new(auth),
            ..strict_app()
        },
        route,
    )
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    authenticated_service(
        AppContext {
            carts: Arc::new(carts),
            ..strict_app()
        },
        route,
    )
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    authenticated_service(
        AppContext {
            orders: Arc::new(orders),
            ..strict_app()
        },
        route,
    )
}

pub(crate) fn make_category(uuid: CategoryUuid) -> CategoryRecord {
    CategoryRecord {
        uuid,
        name: "Teapots".to_string(),
        description: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product(uuid: ProductUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        category_uuid: CategoryUuid::from_uuid(Uuid::nil()),
        name: "Brown Betty".to_string(),
        description: None,
        price: 1_250,
        old_price: None,
        stock: 10,
        image: None,
        sku: "BB-001".to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_promotion(uuid: PromotionUuid) -> PromotionRecord {
    PromotionRecord {
        uuid,
        code: "SUMMER10".to_string(),
        description: None,
        discount_percent: Decimal::TEN,
        starts_at: Timestamp::UNIX_EPOCH,
        ends_at: None,
        max_uses: None,
        times_used: 0,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_user(uuid: UserUuid) -> UserRecord {
    UserRecord {
        uuid,
        email: "shopper@example.com".to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// An active cart holding two of `product` at 1250 each.
pub(crate) fn make_cart(uuid: CartUuid, product: ProductUuid) -> CartRecord {
    CartRecord {
        uuid,
        user_uuid: TEST_USER_UUID,
        status: CartStatus::Active,
        items: vec![CartItemRecord {
            uuid: CartItemUuid::new(),
            cart_uuid: uuid,
            product_uuid: product,
            name: "Brown Betty".to_string(),
            unit_price: 1_250,
            quantity: 2,
            line_total: 2_500,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }],
        subtotal: 2_500,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// A pending order for two items at 1250 with a 10% promotion applied.
pub(crate) fn make_order(uuid: OrderUuid, cart: CartUuid) -> OrderRecord {
    OrderRecord {
        uuid,
        user_uuid: TEST_USER_UUID,
        cart_uuid: cart,
        promotion_uuid: Some(PromotionUuid::from_uuid(Uuid::nil())),
        shipping_address: "1 High Street".to_string(),
        billing_address: None,
        payment_method: "card".to_string(),
        status: OrderStatus::Pending,
        subtotal: 2_500,
        discount: 250,
        total: 2_250,
        items: vec![OrderItemRecord {
            uuid: OrderItemUuid::new(),
            order_uuid: uuid,
            product_uuid: ProductUuid::from_uuid(Uuid::nil()),
            name: "Brown Betty".to_string(),
            unit_price: 1_250,
            quantity: 2,
            line_total: 2_500,
            created_at: Timestamp::UNIX_EPOCH,
        }],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
