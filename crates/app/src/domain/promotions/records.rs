//! Promotions Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::uuids::TypedUuid;

/// Promotion UUID
pub type PromotionUuid = TypedUuid<PromotionRecord>;

/// Promotion Record
#[derive(Debug, Clone)]
pub struct PromotionRecord {
    pub uuid: PromotionUuid,

    /// Redemption code, stored upper-cased.
    pub code: String,

    pub description: Option<String>,

    /// Percentage taken off an order subtotal, in `(0, 100]`.
    pub discount_percent: Decimal,

    pub starts_at: Timestamp,
    pub ends_at: Option<Timestamp>,
    pub max_uses: Option<u32>,
    pub times_used: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Why a known promotion cannot be redeemed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NotRedeemable {
    #[error("promotion is not active yet")]
    NotYetActive,

    #[error("promotion has expired")]
    Expired,

    #[error("promotion usage limit reached")]
    UsageLimitReached,
}

impl PromotionRecord {
    /// Checks the redemption window and usage limit at `now`.
    ///
    /// # Errors
    ///
    /// Returns the first rule the promotion fails.
    pub fn check_redeemable(&self, now: Timestamp) -> Result<(), NotRedeemable> {
        if now < self.starts_at {
            return Err(NotRedeemable::NotYetActive);
        }

        if self.ends_at.is_some_and(|ends_at| now >= ends_at) {
            return Err(NotRedeemable::Expired);
        }

        if self
            .max_uses
            .is_some_and(|max_uses| self.times_used >= max_uses)
        {
            return Err(NotRedeemable::UsageLimitReached);
        }

        Ok(())
    }
}
