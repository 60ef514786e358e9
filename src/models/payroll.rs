//! The payroll aggregate.

use rust_decimal::Decimal;

use crate::calculation::round_money;
use crate::config::PayrollRules;

use super::discount::{ContributionDiscount, Discount, WithholdingDiscount};

/// Gross pay together with every discount applied to it.
///
/// The first two discounts are always the contribution followed by the
/// withholding, which is computed from the contribution's value. Optional
/// discounts follow in the order they were supplied. Totals are recomputed
/// on every read; nothing is cached.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::{Discount, Payroll};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let loader = ConfigLoader::load("./config/br-2026").unwrap();
/// let gross = Decimal::from_str("3000.00").unwrap();
/// let payroll = Payroll::new(gross, 0, loader.rules(), [Discount::fixed_amount(Decimal::from(50))]);
///
/// assert_eq!(payroll.discounts().len(), 3);
/// assert_eq!(payroll.net_pay() + payroll.total_discount(), payroll.gross_pay());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payroll {
    gross_pay: Decimal,
    discounts: Vec<Discount>,
}

impl Payroll {
    /// Builds a payroll for `gross_pay`, rounded to cents.
    ///
    /// # Arguments
    ///
    /// * `gross_pay` - Pre-deduction pay
    /// * `dependents` - Number of dependents for the withholding
    /// * `rules` - The deduction schedule in force
    /// * `optional` - Extra discounts appended after the statutory ones
    pub fn new(
        gross_pay: Decimal,
        dependents: u32,
        rules: &PayrollRules,
        optional: impl IntoIterator<Item = Discount>,
    ) -> Self {
        let gross_pay = round_money(gross_pay);
        let contribution = ContributionDiscount::new(gross_pay, rules.contribution());
        let withholding = WithholdingDiscount::new(
            gross_pay,
            dependents,
            contribution.value(),
            rules.withholding(),
        );

        let mut discounts = vec![contribution.into(), withholding.into()];
        discounts.extend(optional);

        Self {
            gross_pay,
            discounts,
        }
    }

    /// Appends an optional discount.
    pub fn add_discount(&mut self, discount: Discount) {
        self.discounts.push(discount);
    }

    /// The gross pay.
    pub fn gross_pay(&self) -> Decimal {
        self.gross_pay
    }

    /// All discounts, statutory ones first.
    pub fn discounts(&self) -> &[Discount] {
        &self.discounts
    }

    /// The contribution discount.
    pub fn contribution(&self) -> &Discount {
        &self.discounts[0]
    }

    /// The withholding discount.
    pub fn withholding(&self) -> &Discount {
        &self.discounts[1]
    }

    /// Sum of every discount value.
    pub fn total_discount(&self) -> Decimal {
        round_money(self.discounts.iter().map(Discount::value).sum())
    }

    /// Gross pay minus the total discount.
    pub fn net_pay(&self) -> Decimal {
        round_money(self.gross_pay - self.total_discount())
    }
}
