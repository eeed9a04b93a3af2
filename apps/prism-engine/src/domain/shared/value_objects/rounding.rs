//! Presentation rounding for currency amounts and percentages.
//!
//! Exposure arithmetic runs in `f64`; values are rounded only when they are
//! placed into output records. Rounding goes through `Decimal` so that the
//! result matches half-to-even rounding of the exact binary value.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places for EUR amounts.
pub const CURRENCY_DP: u32 = 2;

/// Round `value` to `dp` decimal places.
///
/// Non-finite values (and values outside the `Decimal` range) are returned unchanged.
#[must_use]
pub fn round_dp(value: f64, dp: u32) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// Round a EUR amount to cents.
#[must_use]
pub fn round_eur(amount: f64) -> f64 {
    round_dp(amount, CURRENCY_DP)
}
