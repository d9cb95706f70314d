//! Test Helpers

use jiff::{SignedDuration, Timestamp};
use rust_decimal::Decimal;

use crate::{
    domain::{
        carts::{
            CartsService, CartsServiceError,
            data::NewCartItem,
            records::{CartRecord, CartUuid},
        },
        categories::records::CategoryUuid,
        orders::{data::NewOrder, records::OrderUuid},
        products::{
            ProductsService, ProductsServiceError,
            data::NewProduct,
            records::{ProductRecord, ProductUuid},
        },
        promotions::{data::NewPromotion, records::PromotionUuid},
        users::records::UserUuid,
    },
    test::TestContext,
};

pub(crate) async fn create_product(
    ctx: &TestContext,
    category: CategoryUuid,
    price: u64,
    stock: u32,
) -> Result<ProductRecord, ProductsServiceError> {
    let uuid = ProductUuid::new();

    ctx.products
        .create_product(NewProduct {
            uuid,
            category_uuid: category,
            name: format!("Product {}", uuid.into_uuid().simple()),
            description: None,
            price,
            old_price: None,
            stock,
            image: None,
            sku: format!("SKU-{}", uuid.into_uuid().simple()),
        })
        .await
}

pub(crate) async fn add_item(
    ctx: &TestContext,
    user: UserUuid,
    cart: CartUuid,
    product: ProductUuid,
    quantity: u32,
) -> Result<CartRecord, CartsServiceError> {
    ctx.carts
        .add_item(
            user,
            cart,
            NewCartItem {
                product_uuid: product,
                quantity,
            },
        )
        .await
}

/// A promotion that started an hour ago with no end or usage limit.
pub(crate) fn new_promotion(code: &str, discount_percent: Decimal) -> NewPromotion {
    let starts_at = Timestamp::now()
        .checked_sub(SignedDuration::from_hours(1))
        .expect("start time in range");

    NewPromotion {
        uuid: PromotionUuid::new(),
        code: code.to_string(),
        description: None,
        discount_percent,
        starts_at,
        ends_at: None,
        max_uses: None,
    }
}

pub(crate) fn new_order(cart: CartUuid, promotion_code: Option<&str>) -> NewOrder {
    NewOrder {
        uuid: OrderUuid::new(),
        cart_uuid: cart,
        shipping_address: "1 High Street, London".to_string(),
        billing_address: None,
        payment_method: "card".to_string(),
        promotion_code: promotion_code.map(str::to_string),
    }
}
