//! Cart Data

use crate::domain::{carts::records::CartUuid, products::records::ProductUuid};

/// New Cart Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCart {
    pub uuid: CartUuid,
}

/// New Cart Item Data
///
/// Adding a product already in the cart increases its quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub product_uuid: ProductUuid,
    pub quantity: u32,
}
