//! Social-security style contribution.
//!
//! The contribution is a cumulative marginal-bracket sum: every completed
//! lower bracket contributes its full marginal amount and only the bracket
//! containing the gross pay is prorated. The first bracket is always charged
//! in full and the last (sentinel) bracket is charged the statutory ceiling.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ContributionRules;
use crate::models::{BracketRange, BracketTable, CENT};

use super::rounding::round_money;

/// The result of a contribution calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionResult {
    /// The contribution, rounded half-to-even to two digits.
    pub amount: Decimal,
    /// Ordinal of the bracket containing the gross pay, if any matched.
    pub ordinal: Option<u32>,
}

/// The full marginal amount charged for a completed bracket.
///
/// The first bracket is charged `rate × upper_bound`; every other bracket
/// is charged over its width counted from one cent below its lower bound.
pub fn range_discount(range: &BracketRange, table: &BracketTable) -> Decimal {
    if table.is_first(range) {
        range.rate * range.upper_bound
    } else {
        (range.upper_bound - (range.lower_bound - CENT)) * range.rate
    }
}

/// Sum of the full marginal amounts of every bracket below `range`.
pub fn previous_ranges_discount(range: &BracketRange, table: &BracketTable) -> Decimal {
    table
        .ranges()
        .iter()
        .filter(|r| r.ordinal < range.ordinal)
        .map(|r| range_discount(r, table))
        .sum()
}

/// Calculates the contribution owed on `gross_pay`.
///
/// # Arguments
///
/// * `gross_pay` - Pre-deduction pay, expected to be non-negative
/// * `rules` - The validated contribution table and ceiling
///
/// # Returns
///
/// The contribution rounded half-to-even to two digits. Any gross pay inside
/// the last bracket, including one above its sentinel upper bound, is charged
/// the ceiling. A negative gross pay yields zero and a warning.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_contribution;
/// use payroll_engine::config::ContributionRules;
/// use payroll_engine::models::BracketRange;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let rules = ContributionRules::new(
///     "INSS",
///     vec![
///         BracketRange { ordinal: 1, lower_bound: dec("0"), upper_bound: dec("1000.00"),
///                        rate: dec("0.10"), deduction_constant: Decimal::ZERO },
///         BracketRange { ordinal: 2, lower_bound: dec("1000.01"), upper_bound: dec("2000.00"),
///                        rate: dec("0.20"), deduction_constant: Decimal::ZERO },
///         BracketRange { ordinal: 3, lower_bound: dec("2000.01"), upper_bound: dec("999999999.99"),
///                        rate: dec("0.20"), deduction_constant: Decimal::ZERO },
///     ],
///     dec("300.00"),
/// )
/// .unwrap();
///
/// // 1000.00 × 0.10 + (1500.00 − 1000.00) × 0.20
/// let result = calculate_contribution(dec("1500.00"), &rules);
/// assert_eq!(result.amount, dec("200.00"));
/// assert_eq!(result.ordinal, Some(2));
/// ```
pub fn calculate_contribution(gross_pay: Decimal, rules: &ContributionRules) -> ContributionResult {
    let table = &rules.table;

    let range = match table.find(gross_pay) {
        Ok(range) => range,
        Err(err) => {
            warn!(error = %err, "Contribution bracket lookup failed, charging zero");
            return ContributionResult {
                amount: round_money(Decimal::ZERO),
                ordinal: None,
            };
        }
    };

    let amount = if table.is_first(range) {
        range_discount(range, table)
    } else if table.is_last(range) {
        rules.ceiling
    } else {
        let current = (gross_pay - (range.lower_bound - CENT)) * range.rate;
        current + previous_ranges_discount(range, table)
    };
    let amount = round_money(amount);

    debug!(
        table = %rules.name,
        gross_pay = %gross_pay,
        ordinal = range.ordinal,
        amount = %amount,
        "Contribution calculated"
    );

    ContributionResult {
        amount,
        ordinal: Some(range.ordinal),
    }
}
