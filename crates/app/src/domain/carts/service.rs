//! Carts service.

use std::collections::HashMap;

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::{
    database::Db,
    domain::{
        carts::{
            data::{NewCart, NewCartItem},
            errors::CartsServiceError,
            records::{CartItemRecord, CartRecord, CartStatus, CartUuid, checked_subtotal},
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        products::records::ProductUuid,
        users::records::UserUuid,
    },
    pagination::Page,
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
        }
    }

    async fn with_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartRecord,
    ) -> Result<CartRecord, CartsServiceError> {
        let items = self
            .items_repository
            .list_cart_items(tx, &[cart.uuid])
            .await?;

        attach_items(cart, items)
    }

    /// Locks an active cart and the product stock a new quantity is checked against.
    async fn lock_for_item_change(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        cart: CartUuid,
        product: ProductUuid,
    ) -> Result<(CartRecord, u32), CartsServiceError> {
        let locked = self.carts_repository.lock_cart(tx, user, cart).await?;

        ensure_active(&locked)?;

        let stock = self
            .items_repository
            .find_live_product_stock(tx, product)
            .await?
            .ok_or(CartsServiceError::InvalidReference)?;

        Ok((locked, stock))
    }
}

fn attach_items(
    mut cart: CartRecord,
    items: Vec<CartItemRecord>,
) -> Result<CartRecord, CartsServiceError> {
    cart.subtotal = checked_subtotal(&items).ok_or(CartsServiceError::InvalidData)?;

    cart.items = items;

    Ok(cart)
}

fn ensure_active(cart: &CartRecord) -> Result<(), CartsServiceError> {
    if cart.status == CartStatus::Active {
        Ok(())
    } else {
        Err(CartsServiceError::CartNotActive)
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn list_carts(
        &self,
        user: UserUuid,
        page: Page,
    ) -> Result<Vec<CartRecord>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let carts = self
            .carts_repository
            .list_carts(&mut tx, user, page)
            .await?;

        let cart_uuids: Vec<CartUuid> = carts.iter().map(|cart| cart.uuid).collect();

        let items = self
            .items_repository
            .list_cart_items(&mut tx, &cart_uuids)
            .await?;

        tx.commit().await?;

        let mut items_by_cart: HashMap<CartUuid, Vec<CartItemRecord>> = HashMap::new();

        for item in items {
            items_by_cart.entry(item.cart_uuid).or_default().push(item);
        }

        carts
            .into_iter()
            .map(|cart| {
                let items = items_by_cart.remove(&cart.uuid).unwrap_or_default();

                attach_items(cart, items)
            })
            .collect()
    }

    async fn get_cart(&self, user: UserUuid, cart: CartUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.carts_repository.get_cart(&mut tx, user, cart).await?;
        let cart = self.with_items(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn get_or_create_active_cart(
        &self,
        user: UserUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.carts_repository
            .ensure_active_cart(&mut tx, user, CartUuid::new())
            .await?;

        let cart = self
            .carts_repository
            .find_active_cart(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let cart = self.with_items(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.create_cart",
        skip(self, cart),
        fields(user_uuid = %user, cart_uuid = %cart.uuid),
        err
    )]
    async fn create_cart(
        &self,
        user: UserUuid,
        cart: NewCart,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self
            .carts_repository
            .create_cart(&mut tx, user, cart.uuid)
            .await?;

        tx.commit().await?;

        info!(cart_uuid = %created.uuid, "created cart");

        Ok(created)
    }

    #[tracing::instrument(
        name = "carts.service.abandon_cart",
        skip(self),
        fields(user_uuid = %user, cart_uuid = %cart),
        err
    )]
    async fn abandon_cart(
        &self,
        user: UserUuid,
        cart: CartUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let locked = self.carts_repository.lock_cart(&mut tx, user, cart).await?;

        ensure_active(&locked)?;

        let abandoned = self
            .carts_repository
            .set_cart_status(&mut tx, cart, CartStatus::Abandoned)
            .await?;

        let abandoned = self.with_items(&mut tx, abandoned).await?;

        tx.commit().await?;

        info!(cart_uuid = %cart, "abandoned cart");

        Ok(abandoned)
    }

    #[tracing::instrument(
        name = "carts.service.delete_cart",
        skip(self),
        fields(user_uuid = %user, cart_uuid = %cart),
        err
    )]
    async fn delete_cart(&self, user: UserUuid, cart: CartUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let locked = self.carts_repository.lock_cart(&mut tx, user, cart).await?;

        if locked.status == CartStatus::Completed {
            return Err(CartsServiceError::CartNotActive);
        }

        let rows_affected = self.carts_repository.delete_cart(&mut tx, cart).await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(cart_uuid = %cart, "deleted cart");

        Ok(())
    }

    #[tracing::instrument(
        name = "carts.service.add_item",
        skip(self, item),
        fields(
            user_uuid = %user,
            cart_uuid = %cart,
            product_uuid = %item.product_uuid,
            quantity = item.quantity
        ),
        err
    )]
    async fn add_item(
        &self,
        user: UserUuid,
        cart: CartUuid,
        item: NewCartItem,
    ) -> Result<CartRecord, CartsServiceError> {
        if item.quantity == 0 {
            return Err(CartsServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        let (locked, stock) = self
            .lock_for_item_change(&mut tx, user, cart, item.product_uuid)
            .await?;

        let existing = self
            .items_repository
            .find_item_quantity(&mut tx, cart, item.product_uuid)
            .await?
            .unwrap_or_default();

        let quantity = existing
            .checked_add(item.quantity)
            .filter(|quantity| *quantity <= stock)
            .ok_or(CartsServiceError::InsufficientStock)?;

        self.items_repository
            .upsert_cart_item(&mut tx, cart, item.product_uuid, quantity)
            .await?;

        let updated = self.with_items(&mut tx, locked).await?;

        tx.commit().await?;

        info!(cart_uuid = %cart, quantity, "added cart item");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "carts.service.update_item",
        skip(self),
        fields(user_uuid = %user, cart_uuid = %cart, product_uuid = %product),
        err
    )]
    async fn update_item(
        &self,
        user: UserUuid,
        cart: CartUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<CartRecord, CartsServiceError> {
        if quantity == 0 {
            return Err(CartsServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        let (locked, stock) = self
            .lock_for_item_change(&mut tx, user, cart, product)
            .await?;

        if self
            .items_repository
            .find_item_quantity(&mut tx, cart, product)
            .await?
            .is_none()
        {
            return Err(CartsServiceError::NotFound);
        }

        if quantity > stock {
            return Err(CartsServiceError::InsufficientStock);
        }

        self.items_repository
            .upsert_cart_item(&mut tx, cart, product, quantity)
            .await?;

        let updated = self.with_items(&mut tx, locked).await?;

        tx.commit().await?;

        Ok(updated)
    }

    #[tracing::instrument(
        name = "carts.service.remove_item",
        skip(self),
        fields(user_uuid = %user, cart_uuid = %cart, product_uuid = %product),
        err
    )]
    async fn remove_item(
        &self,
        user: UserUuid,
        cart: CartUuid,
        product: ProductUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let locked = self.carts_repository.lock_cart(&mut tx, user, cart).await?;

        ensure_active(&locked)?;

        let rows_affected = self
            .items_repository
            .delete_cart_item(&mut tx, cart, product)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        let updated = self.with_items(&mut tx, locked).await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieves a page of the user's carts, newest first.
    async fn list_carts(
        &self,
        user: UserUuid,
        page: Page,
    ) -> Result<Vec<CartRecord>, CartsServiceError>;

    /// Retrieve a single cart owned by the user.
    async fn get_cart(&self, user: UserUuid, cart: CartUuid)
    -> Result<CartRecord, CartsServiceError>;

    /// Returns the user's active cart, opening one when none exists.
    async fn get_or_create_active_cart(
        &self,
        user: UserUuid,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Opens a new active cart for the user.
    async fn create_cart(&self, user: UserUuid, cart: NewCart)
    -> Result<CartRecord, CartsServiceError>;

    /// Marks an active cart as abandoned.
    async fn abandon_cart(
        &self,
        user: UserUuid,
        cart: CartUuid,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Deletes a cart that has not been checked out.
    async fn delete_cart(&self, user: UserUuid, cart: CartUuid) -> Result<(), CartsServiceError>;

    /// Add a product to the given cart
    async fn add_item(
        &self,
        user: UserUuid,
        cart: CartUuid,
        item: NewCartItem,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Sets the quantity of a product already in the cart.
    async fn update_item(
        &self,
        user: UserUuid,
        cart: CartUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Removes a product from the cart.
    async fn remove_item(
        &self,
        user: UserUuid,
        cart: CartUuid,
        product: ProductUuid,
    ) -> Result<CartRecord, CartsServiceError>;
}
