//! Income-tax style withholding.
//!
//! Two taxable bases are evaluated for every gross pay:
//!
//! - **Itemized**: gross pay minus the per-dependent allowances and the
//!   contribution already charged.
//! - **Simplified**: gross pay minus a flat allowance derived from the first
//!   bracket's upper bound.
//!
//! Each base is taxed as `base × rate − deduction_constant` of its bracket,
//! floored at zero, then reduced by the relief schedule if one is
//! configured. The contributor pays the lower of the two.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::WithholdingRules;
use crate::models::BracketTable;

use super::relief::calculate_relief;
use super::rounding::round_money;

/// The deduction method a withholding candidate was computed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionMethod {
    /// Per-dependent allowances plus the contribution.
    Itemized,
    /// Flat simplified allowance.
    Simplified,
}

/// Tax computed under one deduction method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdingCandidate {
    /// The method this candidate was computed with.
    pub method: DeductionMethod,
    /// The taxable base.
    pub base: Decimal,
    /// Tax before relief, floored at zero.
    pub gross_tax: Decimal,
    /// Relief subtracted from `gross_tax`.
    pub relief: Decimal,
    /// Tax after relief.
    pub tax: Decimal,
}

/// The result of a withholding calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdingResult {
    /// The withheld amount: the lower of the two candidates.
    pub amount: Decimal,
    /// The method that produced `amount`.
    pub method: DeductionMethod,
    /// The itemized candidate.
    pub itemized: WithholdingCandidate,
    /// The simplified candidate.
    pub simplified: WithholdingCandidate,
}

/// Taxable base under the itemized method.
pub fn itemized_base(
    gross_pay: Decimal,
    dependents: u32,
    contribution: Decimal,
    rules: &WithholdingRules,
) -> Decimal {
    gross_pay - Decimal::from(dependents) * rules.dependent_allowance - contribution
}

/// Taxable base under the simplified method.
pub fn simplified_base(gross_pay: Decimal, rules: &WithholdingRules) -> Decimal {
    gross_pay - rules.simplified_allowance()
}

/// Applies the bracket containing `base`: `base × rate − deduction_constant`,
/// floored at zero.
///
/// A negative base, e.g. after many dependent allowances, is taxed zero.
pub fn bracket_tax(base: Decimal, table: &BracketTable) -> Decimal {
    match table.find(base) {
        Ok(range) => (base * range.rate - range.deduction_constant).max(Decimal::ZERO),
        Err(err) => {
            debug!(error = %err, "Negative withholding base, taxing zero");
            Decimal::ZERO
        }
    }
}

fn evaluate(
    method: DeductionMethod,
    base: Decimal,
    gross_pay: Decimal,
    rules: &WithholdingRules,
) -> WithholdingCandidate {
    let gross_tax = round_money(bracket_tax(base, &rules.table));
    let relief = match &rules.relief {
        Some(schedule) => calculate_relief(gross_pay, gross_tax, schedule),
        None => round_money(Decimal::ZERO),
    };
    WithholdingCandidate {
        method,
        base,
        gross_tax,
        relief,
        tax: round_money(gross_tax - relief),
    }
}

/// Calculates the withholding for a gross pay.
///
/// # Arguments
///
/// * `gross_pay` - Pre-deduction pay
/// * `dependents` - Number of dependents claimed
/// * `contribution` - The contribution already charged on `gross_pay`
/// * `rules` - The validated withholding table, allowances and relief
///
/// # Returns
///
/// A [`WithholdingResult`] whose `amount` is the minimum of the itemized and
/// simplified candidates. On a tie the simplified method is reported.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{calculate_withholding, DeductionMethod};
/// use payroll_engine::config::WithholdingRules;
/// use payroll_engine::models::BracketRange;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let rules = WithholdingRules::new(
///     "IRRF",
///     vec![
///         BracketRange { ordinal: 1, lower_bound: dec("0"), upper_bound: dec("2000.00"),
///                        rate: dec("0"), deduction_constant: dec("0") },
///         BracketRange { ordinal: 2, lower_bound: dec("2000.01"), upper_bound: dec("999999999.99"),
///                        rate: dec("0.10"), deduction_constant: dec("200.00") },
///     ],
///     dec("100.00"),
///     dec("0.25"),
///     None,
/// )
/// .unwrap();
///
/// // Itemized base 4000 − 0 − 300 = 3700 → 170.00
/// // Simplified base 4000 − 500 = 3500 → 150.00
/// let result = calculate_withholding(dec("4000.00"), 0, dec("300.00"), &rules);
/// assert_eq!(result.amount, dec("150.00"));
/// assert_eq!(result.method, DeductionMethod::Simplified);
/// ```
pub fn calculate_withholding(
    gross_pay: Decimal,
    dependents: u32,
    contribution: Decimal,
    rules: &WithholdingRules,
) -> WithholdingResult {
    let itemized = evaluate(
        DeductionMethod::Itemized,
        itemized_base(gross_pay, dependents, contribution, rules),
        gross_pay,
        rules,
    );
    let simplified = evaluate(
        DeductionMethod::Simplified,
        simplified_base(gross_pay, rules),
        gross_pay,
        rules,
    );

    let chosen = if itemized.tax < simplified.tax {
        itemized
    } else {
        simplified
    };

    debug!(
        table = %rules.name,
        gross_pay = %gross_pay,
        dependents,
        itemized_tax = %itemized.tax,
        simplified_tax = %simplified.tax,
        method = ?chosen.method,
        "Withholding calculated"
    );

    WithholdingResult {
        amount: chosen.tax,
        method: chosen.method,
        itemized,
        simplified,
    }
}
