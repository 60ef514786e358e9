//! Core data models for the Payroll Engine.
//!
//! Bracket tables, the discounts applied to gross pay, the payroll aggregate
//! and its serializable result.

mod bracket;
mod discount;
mod payroll;
mod payroll_result;

pub use bracket::{BracketRange, BracketTable, CENT};
pub use discount::{
    ContributionDiscount, Discount, DiscountKind, FIXED_AMOUNT_DISCOUNT_NAME, FixedAmountDiscount,
    PERCENTAGE_DISCOUNT_NAME, PercentageDiscount, WithholdingDiscount,
};
pub use payroll::Payroll;
pub use payroll_result::{DiscountLine, PayrollResult};
