//! Percentage discount arithmetic over minor-unit amounts.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiscountError {
    /// The percentage calculation could not be represented.
    #[error("percentage conversion overflowed")]
    PercentConversion,
}

/// Discount and resulting total for a subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountedTotal {
    pub subtotal: u64,
    pub discount: u64,
    pub total: u64,
}

/// `percent`% of `subtotal`, rounded half away from zero and never more than `subtotal`.
///
/// # Errors
///
/// Returns an error if the intermediate value overflows or is negative.
pub fn percent_of_minor(percent: Decimal, subtotal: u64) -> Result<u64, DiscountError> {
    let discount = Decimal::from(subtotal)
        .checked_mul(percent)
        .and_then(|value| value.checked_div(Decimal::ONE_HUNDRED))
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or(DiscountError::PercentConversion)?;

    Ok(discount.min(subtotal))
}

/// Applies an optional percentage discount to a subtotal.
///
/// # Errors
///
/// Returns an error if the discount cannot be computed.
pub fn apply_discount(
    subtotal: u64,
    percent: Option<Decimal>,
) -> Result<DiscountedTotal, DiscountError> {
    let discount = match percent {
        Some(percent) => percent_of_minor(percent, subtotal)?,
        None => 0,
    };

    Ok(DiscountedTotal {
        subtotal,
        discount,
        total: subtotal - discount,
    })
}
