//! Cart Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::{
    domain::{products::records::ProductUuid, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Cart lifecycle.
///
/// A user holds at most one `Active` cart. Checkout moves it to `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartStatus {
    Active,
    Completed,
    Abandoned,
}

impl CartStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Abandoned => "abandoned",
        }
    }
}

impl fmt::Display for CartStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown cart status: {0}")]
pub struct UnknownCartStatus(String);

impl FromStr for CartStatus {
    type Err = UnknownCartStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "abandoned" => Ok(Self::Abandoned),
            other => Err(UnknownCartStatus(other.to_string())),
        }
    }
}

/// Cart Record
#[derive(Debug, Clone)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub user_uuid: UserUuid,
    pub status: CartStatus,
    pub items: Vec<CartItemRecord>,

    /// Sum of item line totals at current product prices.
    pub subtotal: u64,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// Cart Item Record
#[derive(Debug, Clone)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub cart_uuid: CartUuid,
    pub product_uuid: ProductUuid,
    pub name: String,
    pub unit_price: u64,
    pub quantity: u32,

    /// Saturates on overflow, see [`checked_subtotal`].
    pub line_total: u64,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Largest amount a money column can store.
pub const MAX_AMOUNT: u64 = i64::MAX.unsigned_abs();

/// Sum of `unit_price * quantity` over `items`.
///
/// Returns `None` when any line or the running sum exceeds [`MAX_AMOUNT`].
#[must_use]
pub fn checked_subtotal(items: &[CartItemRecord]) -> Option<u64> {
    items.iter().try_fold(0_u64, |subtotal, item| {
        let line = item.unit_price.checked_mul(u64::from(item.quantity))?;

        subtotal
            .checked_add(line)
            .filter(|subtotal| *subtotal <= MAX_AMOUNT)
    })
}
