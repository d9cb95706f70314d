//! Orders service.

use std::collections::HashMap;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::{
    database::Db,
    domain::{
        carts::{
            records::{CartItemRecord, CartStatus, checked_subtotal},
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        orders::{
            data::NewOrder,
            errors::OrdersServiceError,
            records::{OrderItemRecord, OrderRecord, OrderStatus, OrderUuid},
            repositories::{
                NewOrderRow, PgOrderItemsRepository, PgOrdersRepository, PgStockRepository,
            },
        },
        promotions::{
            data::normalise_code, discounts::apply_discount, repository::PgPromotionsRepository,
        },
        users::records::UserUuid,
    },
    pagination::Page,
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
    stock_repository: PgStockRepository,
    carts_repository: PgCartsRepository,
    cart_items_repository: PgCartItemsRepository,
    promotions_repository: PgPromotionsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
            stock_repository: PgStockRepository::new(),
            carts_repository: PgCartsRepository::new(),
            cart_items_repository: PgCartItemsRepository::new(),
            promotions_repository: PgPromotionsRepository::new(),
        }
    }

    async fn with_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut order: OrderRecord,
    ) -> Result<OrderRecord, OrdersServiceError> {
        order.items = self
            .items_repository
            .list_order_items(tx, &[order.uuid])
            .await?;

        Ok(order)
    }

    /// Takes stock for every cart line, failing on the first short or deleted product.
    async fn reserve_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        items: &[CartItemRecord],
    ) -> Result<(), OrdersServiceError> {
        for item in items {
            let rows_affected = self
                .stock_repository
                .decrement_stock(tx, item.product_uuid, item.quantity)
                .await?;

            if rows_affected > 0 {
                continue;
            }

            let live = self
                .cart_items_repository
                .find_live_product_stock(tx, item.product_uuid)
                .await?;

            return Err(match live {
                Some(_) => OrdersServiceError::InsufficientStock,
                None => OrdersServiceError::InvalidReference,
            });
        }

        Ok(())
    }
}

fn non_blank(value: &str) -> Result<&str, OrdersServiceError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(OrdersServiceError::InvalidData);
    }

    Ok(value)
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(
        name = "orders.service.create_order",
        skip(self, order),
        fields(user_uuid = %user, order_uuid = %order.uuid, cart_uuid = %order.cart_uuid),
        err
    )]
    async fn create_order(
        &self,
        user: UserUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let shipping_address = non_blank(&order.shipping_address)?;
        let payment_method = non_blank(&order.payment_method)?;
        let billing_address = order
            .billing_address
            .as_deref()
            .map(str::trim)
            .filter(|address| !address.is_empty());

        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .lock_cart(&mut tx, user, order.cart_uuid)
            .await?;

        if cart.status != CartStatus::Active {
            return Err(OrdersServiceError::CartNotActive);
        }

        let items = self
            .cart_items_repository
            .list_cart_items(&mut tx, &[cart.uuid])
            .await?;

        if items.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let subtotal = checked_subtotal(&items).ok_or(OrdersServiceError::InvalidData)?;

        self.reserve_stock(&mut tx, &items).await?;

        let promotion = match order.promotion_code.as_deref() {
            Some(code) => {
                let promotion = self
                    .promotions_repository
                    .lock_promotion_by_code(&mut tx, &normalise_code(code))
                    .await?
                    .ok_or(OrdersServiceError::UnknownPromotion)?;

                promotion.check_redeemable(Timestamp::now())?;

                self.promotions_repository
                    .increment_promotion_usage(&mut tx, promotion.uuid)
                    .await?;

                Some(promotion)
            }
            None => None,
        };

        let Ok(totals) = apply_discount(
            subtotal,
            promotion.as_ref().map(|promotion| promotion.discount_percent),
        ) else {
            return Err(OrdersServiceError::InvalidData);
        };

        let created = self
            .orders_repository
            .create_order(
                &mut tx,
                NewOrderRow {
                    uuid: order.uuid,
                    user_uuid: user,
                    cart_uuid: cart.uuid,
                    promotion_uuid: promotion.as_ref().map(|promotion| promotion.uuid),
                    shipping_address,
                    billing_address,
                    payment_method,
                    totals,
                },
            )
            .await?;

        for item in &items {
            self.items_repository
                .create_order_item(&mut tx, created.uuid, item)
                .await?;
        }

        self.carts_repository
            .set_cart_status(&mut tx, cart.uuid, CartStatus::Completed)
            .await?;

        let created = self.with_items(&mut tx, created).await?;

        tx.commit().await?;

        info!(
            order_uuid = %created.uuid,
            subtotal = created.subtotal,
            discount = created.discount,
            total = created.total,
            "created order"
        );

        Ok(created)
    }

    async fn list_orders(
        &self,
        user: UserUuid,
        page: Page,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self
            .orders_repository
            .list_orders(&mut tx, user, page)
            .await?;

        let order_uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let items = self
            .items_repository
            .list_order_items(&mut tx, &order_uuids)
            .await?;

        tx.commit().await?;

        let mut items_by_order: HashMap<OrderUuid, Vec<OrderItemRecord>> = HashMap::new();

        for item in items {
            items_by_order.entry(item.order_uuid).or_default().push(item);
        }

        Ok(orders
            .into_iter()
            .map(|mut order| {
                order.items = items_by_order.remove(&order.uuid).unwrap_or_default();
                order
            })
            .collect())
    }

    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.orders_repository.get_order(&mut tx, user, order).await?;
        let order = self.with_items(&mut tx, order).await?;

        tx.commit().await?;

        Ok(order)
    }

    #[tracing::instrument(
        name = "orders.service.update_order_status",
        skip(self),
        fields(user_uuid = %user, order_uuid = %order, status = %status),
        err
    )]
    async fn update_order_status(
        &self,
        user: UserUuid,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let locked = self
            .orders_repository
            .lock_order(&mut tx, user, order)
            .await?;

        if !locked.status.can_transition_to(status) {
            return Err(OrdersServiceError::InvalidTransition {
                from: locked.status,
                to: status,
            });
        }

        let updated = self
            .orders_repository
            .set_order_status(&mut tx, order, status)
            .await?;

        let updated = self.with_items(&mut tx, updated).await?;

        if status == OrderStatus::Cancelled {
            for item in &updated.items {
                self.stock_repository
                    .restore_stock(&mut tx, item.product_uuid, item.quantity)
                    .await?;
            }
        }

        tx.commit().await?;

        info!(order_uuid = %order, from = %locked.status, to = %status, "updated order status");

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Checks out an active cart into a pending order.
    async fn create_order(
        &self,
        user: UserUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieves a page of the user's orders, newest first.
    async fn list_orders(
        &self,
        user: UserUuid,
        page: Page,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Retrieve a single order owned by the user.
    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Moves an order along its fulfilment lifecycle.
    async fn update_order_status(
        &self,
        user: UserUuid,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::{
            carts::CartsService,
            products::ProductsService,
            promotions::{
                PromotionsService, data::NewPromotion, records::NotRedeemable,
            },
        },
        test::{
            TestContext,
            helpers::{add_item, create_product, new_order, new_promotion},
        },
    };

    use super::*;

    #[tokio::test]
    async fn create_order_totals_items_minus_discount() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("checkout@example.com").await;
        let category = ctx.create_category("Checkout").await;
        let mug = create_product(&ctx, category, 8_99, 10).await?;
        let tea = create_product(&ctx, category, 4_50, 10).await?;
        let cart = ctx.carts.get_or_create_active_cart(user).await?;

        add_item(&ctx, user, cart.uuid, mug.uuid, 2).await?;
        add_item(&ctx, user, cart.uuid, tea.uuid, 3).await?;

        let promotion = ctx
            .promotions
            .create_promotion(new_promotion("TENOFF", Decimal::new(10, 0)))
            .await?;

        let order = ctx
            .orders
            .create_order(user, new_order(cart.uuid, Some("tenoff")))
            .await?;

        // 2 * 8.99 + 3 * 4.50 = 31.48, 10% = 3.148
        assert_eq!(order.subtotal, 31_48);
        assert_eq!(order.discount, 3_15);
        assert_eq!(order.total, 28_33);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.promotion_uuid, Some(promotion.uuid));
        assert_eq!(order.items.len(), 2);

        let line_sum: u64 = order.items.iter().map(|item| item.line_total).sum();

        assert_eq!(line_sum, order.subtotal);

        let mug_after = ctx.products.get_product(mug.uuid).await?;
        let tea_after = ctx.products.get_product(tea.uuid).await?;
        let cart_after = ctx.carts.get_cart(user, cart.uuid).await?;
        let promotion_after = ctx.promotions.get_promotion(promotion.uuid).await?;

        assert_eq!(mug_after.stock, 8);
        assert_eq!(tea_after.stock, 7);
        assert_eq!(cart_after.status, CartStatus::Completed);
        assert_eq!(promotion_after.times_used, 1);

        Ok(())
    }

    #[tokio::test]
    async fn create_order_snapshots_name_and_price() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("snapshot@example.com").await;
        let category = ctx.create_category("Snapshot").await;
        let product = create_product(&ctx, category, 5_00, 10).await?;
        let cart = ctx.carts.get_or_create_active_cart(user).await?;

        add_item(&ctx, user, cart.uuid, product.uuid, 1).await?;

        let order = ctx
            .orders
            .create_order(user, new_order(cart.uuid, None))
            .await?;

        sqlx::query("UPDATE products SET price = 9900, name = 'Renamed' WHERE uuid = $1")
            .bind(product.uuid.into_uuid())
            .execute(ctx.db.pool())
            .await?;

        let fetched = ctx.orders.get_order(user, order.uuid).await?;
        let item = fetched.items.first().expect("order should have one item");

        assert_eq!(item.unit_price, 5_00);
        assert_eq!(item.name, product.name);
        assert_eq!(fetched.total, 5_00);
        assert_eq!(fetched.discount, 0);

        Ok(())
    }

    #[tokio::test]
    async fn create_order_with_short_stock_changes_nothing() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("short@example.com").await;
        let category = ctx.create_category("Short").await;
        let plenty = create_product(&ctx, category, 1_00, 10).await?;
        let scarce = create_product(&ctx, category, 1_00, 2).await?;
        let cart = ctx.carts.get_or_create_active_cart(user).await?;

        add_item(&ctx, user, cart.uuid, plenty.uuid, 5).await?;
        add_item(&ctx, user, cart.uuid, scarce.uuid, 2).await?;

        let promotion = ctx
            .promotions
            .create_promotion(new_promotion("SHORT", Decimal::new(50, 0)))
            .await?;

        // Someone else buys the scarce stock after it was added.
        sqlx::query("UPDATE products SET stock = 1 WHERE uuid = $1")
            .bind(scarce.uuid.into_uuid())
            .execute(ctx.db.pool())
            .await?;

        let result = ctx
            .orders
            .create_order(user, new_order(cart.uuid, Some("SHORT")))
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::InsufficientStock)),
            "expected InsufficientStock, got {result:?}"
        );

        let plenty_after = ctx.products.get_product(plenty.uuid).await?;
        let scarce_after = ctx.products.get_product(scarce.uuid).await?;
        let cart_after = ctx.carts.get_cart(user, cart.uuid).await?;
        let promotion_after = ctx.promotions.get_promotion(promotion.uuid).await?;

        assert_eq!(plenty_after.stock, 10);
        assert_eq!(scarce_after.stock, 1);
        assert_eq!(cart_after.status, CartStatus::Active);
        assert_eq!(promotion_after.times_used, 0);

        Ok(())
    }

    #[tokio::test]
    async fn create_order_rejects_empty_inactive_and_foreign_carts() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("reject@example.com").await;
        let other = ctx.create_user("other@example.com").await;
        let cart = ctx.carts.get_or_create_active_cart(user).await?;

        let empty = ctx
            .orders
            .create_order(user, new_order(cart.uuid, None))
            .await;

        let foreign = ctx
            .orders
            .create_order(other, new_order(cart.uuid, None))
            .await;

        ctx.carts.abandon_cart(user, cart.uuid).await?;

        let inactive = ctx
            .orders
            .create_order(user, new_order(cart.uuid, None))
            .await;

        assert!(
            matches!(empty, Err(OrdersServiceError::EmptyCart)),
            "expected EmptyCart, got {empty:?}"
        );
        assert!(
            matches!(foreign, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {foreign:?}"
        );
        assert!(
            matches!(inactive, Err(OrdersServiceError::CartNotActive)),
            "expected CartNotActive, got {inactive:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_order_requires_shipping_address_and_payment_method() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("blank@example.com").await;
        let cart = ctx.carts.get_or_create_active_cart(user).await?;

        let result = ctx
            .orders
            .create_order(
                user,
                NewOrder {
                    shipping_address: "  ".to_string(),
                    ..new_order(cart.uuid, None)
                },
            )
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_order_rejects_unusable_promotions() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("promo@example.com").await;
        let category = ctx.create_category("Promo").await;
        let product = create_product(&ctx, category, 10_00, 10).await?;
        let cart = ctx.carts.get_or_create_active_cart(user).await?;

        add_item(&ctx, user, cart.uuid, product.uuid, 1).await?;

        let now = Timestamp::now();

        ctx.promotions
            .create_promotion(NewPromotion {
                starts_at: now.checked_sub(SignedDuration::from_hours(2))?,
                ends_at: Some(now.checked_sub(SignedDuration::from_hours(1))?),
                ..new_promotion("OLD", Decimal::new(10, 0))
            })
            .await?;

        let expired = ctx
            .orders
            .create_order(user, new_order(cart.uuid, Some("OLD")))
            .await;

        let unknown = ctx
            .orders
            .create_order(user, new_order(cart.uuid, Some("MISSING")))
            .await;

        assert!(
            matches!(
                expired,
                Err(OrdersServiceError::PromotionNotRedeemable(NotRedeemable::Expired))
            ),
            "expected Expired, got {expired:?}"
        );
        assert!(
            matches!(unknown, Err(OrdersServiceError::UnknownPromotion)),
            "expected UnknownPromotion, got {unknown:?}"
        );

        let product_after = ctx.products.get_product(product.uuid).await?;

        assert_eq!(product_after.stock, 10);

        Ok(())
    }

    #[tokio::test]
    async fn create_order_with_deleted_product_returns_invalid_reference() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("discontinued@example.com").await;
        let category = ctx.create_category("Discontinued").await;
        let kept = create_product(&ctx, category, 1_00, 10).await?;
        let dropped = create_product(&ctx, category, 2_00, 10).await?;
        let cart = ctx.carts.get_or_create_active_cart(user).await?;

        add_item(&ctx, user, cart.uuid, kept.uuid, 2).await?;
        add_item(&ctx, user, cart.uuid, dropped.uuid, 1).await?;

        ctx.products.delete_product(dropped.uuid).await?;

        let result = ctx
            .orders
            .create_order(user, new_order(cart.uuid, None))
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );

        let kept_after = ctx.products.get_product(kept.uuid).await?;
        let cart_after = ctx.carts.get_cart(user, cart.uuid).await?;

        assert_eq!(kept_after.stock, 10);
        assert_eq!(cart_after.status, CartStatus::Active);
        assert!(ctx.orders.list_orders(user, Page::default()).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn create_order_with_unstorable_subtotal_returns_invalid_data() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("overflow@example.com").await;
        let category = ctx.create_category("Overflow").await;
        let product = create_product(&ctx, category, 1_00, 10).await?;
        let cart = ctx.carts.get_or_create_active_cart(user).await?;

        add_item(&ctx, user, cart.uuid, product.uuid, 2).await?;

        sqlx::query("UPDATE products SET price = $2 WHERE uuid = $1")
            .bind(product.uuid.into_uuid())
            .bind(i64::MAX)
            .execute(ctx.db.pool())
            .await?;

        let result = ctx
            .orders
            .create_order(user, new_order(cart.uuid, None))
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        let product_after = ctx.products.get_product(product.uuid).await?;

        assert_eq!(product_after.stock, 10);
        assert!(ctx.orders.list_orders(user, Page::default()).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn promotion_usage_limit_is_enforced_across_orders() -> TestResult {
        let ctx = TestContext::new().await;
        let first = ctx.create_user("first-use@example.com").await;
        let second = ctx.create_user("second-use@example.com").await;
        let category = ctx.create_category("Limited offer").await;
        let product = create_product(&ctx, category, 10_00, 10).await?;

        let promotion = ctx
            .promotions
            .create_promotion(NewPromotion {
                max_uses: Some(1),
                ..new_promotion("ONCE", Decimal::new(10, 0))
            })
            .await?;

        let first_cart = ctx.carts.get_or_create_active_cart(first).await?;

        add_item(&ctx, first, first_cart.uuid, product.uuid, 1).await?;

        let order = ctx
            .orders
            .create_order(first, new_order(first_cart.uuid, Some("ONCE")))
            .await?;

        assert_eq!(order.promotion_uuid, Some(promotion.uuid));
        assert_eq!(ctx.promotions.get_promotion(promotion.uuid).await?.times_used, 1);

        let second_cart = ctx.carts.get_or_create_active_cart(second).await?;

        add_item(&ctx, second, second_cart.uuid, product.uuid, 1).await?;

        let result = ctx
            .orders
            .create_order(second, new_order(second_cart.uuid, Some("once")))
            .await;

        assert!(
            matches!(
                result,
                Err(OrdersServiceError::PromotionNotRedeemable(
                    NotRedeemable::UsageLimitReached
                ))
            ),
            "expected UsageLimitReached, got {result:?}"
        );

        let product_after = ctx.products.get_product(product.uuid).await?;

        assert_eq!(ctx.promotions.get_promotion(promotion.uuid).await?.times_used, 1);
        assert_eq!(product_after.stock, 9);

        Ok(())
    }

    #[tokio::test]
    async fn update_order_status_follows_lifecycle() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("lifecycle@example.com").await;
        let category = ctx.create_category("Lifecycle").await;
        let product = create_product(&ctx, category, 1_00, 5).await?;
        let cart = ctx.carts.get_or_create_active_cart(user).await?;

        add_item(&ctx, user, cart.uuid, product.uuid, 1).await?;

        let order = ctx
            .orders
            .create_order(user, new_order(cart.uuid, None))
            .await?;

        let skipped = ctx
            .orders
            .update_order_status(user, order.uuid, OrderStatus::Shipped)
            .await;

        assert!(
            matches!(
                skipped,
                Err(OrdersServiceError::InvalidTransition {
                    from: OrderStatus::Pending,
                    to: OrderStatus::Shipped
                })
            ),
            "expected InvalidTransition, got {skipped:?}"
        );

        for status in [OrderStatus::Paid, OrderStatus::Shipped, OrderStatus::Delivered] {
            let updated = ctx
                .orders
                .update_order_status(user, order.uuid, status)
                .await?;

            assert_eq!(updated.status, status);
        }

        let after_delivery = ctx
            .orders
            .update_order_status(user, order.uuid, OrderStatus::Cancelled)
            .await;

        assert!(
            matches!(after_delivery, Err(OrdersServiceError::InvalidTransition { .. })),
            "expected InvalidTransition, got {after_delivery:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn cancelling_an_order_restores_stock() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("cancel@example.com").await;
        let category = ctx.create_category("Cancel").await;
        let product = create_product(&ctx, category, 1_00, 5).await?;
        let cart = ctx.carts.get_or_create_active_cart(user).await?;

        add_item(&ctx, user, cart.uuid, product.uuid, 3).await?;

        let order = ctx
            .orders
            .create_order(user, new_order(cart.uuid, None))
            .await?;

        assert_eq!(ctx.products.get_product(product.uuid).await?.stock, 2);

        let cancelled = ctx
            .orders
            .update_order_status(user, order.uuid, OrderStatus::Cancelled)
            .await?;

        assert_eq!(cancelled.status, OrderStatus::Cancelled);
        assert_eq!(ctx.products.get_product(product.uuid).await?.stock, 5);

        Ok(())
    }

    #[tokio::test]
    async fn orders_are_private_to_their_user() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("mine@example.com").await;
        let other = ctx.create_user("theirs@example.com").await;
        let category = ctx.create_category("Private orders").await;
        let product = create_product(&ctx, category, 1_00, 5).await?;
        let cart = ctx.carts.get_or_create_active_cart(user).await?;

        add_item(&ctx, user, cart.uuid, product.uuid, 1).await?;

        let order = ctx
            .orders
            .create_order(user, new_order(cart.uuid, None))
            .await?;

        let mine = ctx.orders.list_orders(user, Page::default()).await?;
        let theirs = ctx.orders.list_orders(other, Page::default()).await?;
        let peek = ctx.orders.get_order(other, order.uuid).await;
        let tamper = ctx
            .orders
            .update_order_status(other, order.uuid, OrderStatus::Cancelled)
            .await;

        assert_eq!(mine.len(), 1);
        assert_eq!(mine.first().map(|order| order.items.len()), Some(1));
        assert!(theirs.is_empty());
        assert!(
            matches!(peek, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {peek:?}"
        );
        assert!(
            matches!(tamper, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {tamper:?}"
        );

        Ok(())
    }
}
