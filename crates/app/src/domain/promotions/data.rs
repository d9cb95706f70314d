//! Promotions Data

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::domain::promotions::records::PromotionUuid;

/// New Promotion Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewPromotion {
    pub uuid: PromotionUuid,
    pub code: String,
    pub description: Option<String>,
    pub discount_percent: Decimal,
    pub starts_at: Timestamp,
    pub ends_at: Option<Timestamp>,
    pub max_uses: Option<u32>,
}

/// Normalise a promotion code for storage and lookup.
#[must_use]
pub fn normalise_code(code: &str) -> String {
    code.trim().to_uppercase()
}
