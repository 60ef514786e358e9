//! Calculation logic for the Payroll Engine.
//!
//! This module contains the deduction engines: banker's rounding for
//! monetary values, the progressive contribution, the withholding tax with
//! its two competing deduction methods, and the statutory relief applied on
//! top of the withholding tax.

mod contribution;
mod relief;
mod rounding;
mod withholding;

pub use contribution::{
    ContributionResult, calculate_contribution, previous_ranges_discount, range_discount,
};
pub use relief::calculate_relief;
pub use rounding::{MONEY_SCALE, round_money};
pub use withholding::{
    DeductionMethod, WithholdingCandidate, WithholdingResult, bracket_tax, calculate_withholding,
    itemized_base, simplified_base,
};
