//! Order Data

use crate::domain::{carts::records::CartUuid, orders::records::OrderUuid};

/// New Order Data
///
/// Checks out an active cart, optionally redeeming a promotion code.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub cart_uuid: CartUuid,
    pub shipping_address: String,
    pub billing_address: Option<String>,
    pub payment_method: String,
    pub promotion_code: Option<String>,
}
