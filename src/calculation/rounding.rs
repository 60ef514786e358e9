//! Monetary rounding.
//!
//! Every monetary figure leaving the engine goes through [`round_money`]:
//! banker's rounding (round half to even) to two fractional digits.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits kept for monetary values.
pub const MONEY_SCALE: u32 = 2;

/// Rounds `amount` half-to-even to two fractional digits.
///
/// The result always carries exactly two fractional digits, so `5` becomes
/// `5.00`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("2.345").unwrap()).to_string(), "2.34");
/// assert_eq!(round_money(Decimal::from_str("2.355").unwrap()).to_string(), "2.36");
/// assert_eq!(round_money(Decimal::from(5)).to_string(), "5.00");
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(MONEY_SCALE);
    rounded
}
