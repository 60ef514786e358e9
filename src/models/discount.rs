//! Discount models.
//!
//! A [`Discount`] is anything subtracted from gross pay. The two statutory
//! variants compute their value from the configured tables when they are
//! constructed; the two optional variants compute theirs on every read.
//! Every value is rounded half-to-even to two digits.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{
    ContributionResult, WithholdingResult, calculate_contribution, calculate_withholding,
    round_money,
};
use crate::config::{ContributionRules, WithholdingRules};

/// Display name of [`FixedAmountDiscount`].
pub const FIXED_AMOUNT_DISCOUNT_NAME: &str = "Fixed amount";

/// Display name of [`PercentageDiscount`].
pub const PERCENTAGE_DISCOUNT_NAME: &str = "Percentage";

/// Identifies the variant of a discount in serialized output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    /// Social-security style contribution.
    Contribution,
    /// Income-tax style withholding.
    Withholding,
    /// Caller-supplied fixed amount.
    FixedAmount,
    /// Caller-supplied percentage of a base.
    Percentage,
}

/// The contribution charged on a gross pay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionDiscount {
    name: String,
    gross_pay: Decimal,
    result: ContributionResult,
}

impl ContributionDiscount {
    /// Computes the contribution on `gross_pay` under `rules`.
    pub fn new(gross_pay: Decimal, rules: &ContributionRules) -> Self {
        Self {
            name: rules.name.clone(),
            gross_pay,
            result: calculate_contribution(gross_pay, rules),
        }
    }

    /// The gross pay the contribution was computed on.
    pub fn gross_pay(&self) -> Decimal {
        self.gross_pay
    }

    /// The full engine result.
    pub fn result(&self) -> &ContributionResult {
        &self.result
    }

    /// The contribution amount.
    pub fn value(&self) -> Decimal {
        self.result.amount
    }
}

/// The withholding tax charged on a gross pay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithholdingDiscount {
    name: String,
    gross_pay: Decimal,
    dependents: u32,
    contribution: Decimal,
    result: WithholdingResult,
}

impl WithholdingDiscount {
    /// Computes the withholding on `gross_pay`, given the contribution
    /// already charged on it.
    pub fn new(
        gross_pay: Decimal,
        dependents: u32,
        contribution: Decimal,
        rules: &WithholdingRules,
    ) -> Self {
        Self {
            name: rules.name.clone(),
            gross_pay,
            dependents,
            contribution,
            result: calculate_withholding(gross_pay, dependents, contribution, rules),
        }
    }

    /// The gross pay the withholding was computed on.
    pub fn gross_pay(&self) -> Decimal {
        self.gross_pay
    }

    /// The number of dependents claimed.
    pub fn dependents(&self) -> u32 {
        self.dependents
    }

    /// The contribution fed into the itemized base.
    pub fn contribution(&self) -> Decimal {
        self.contribution
    }

    /// The full engine result, including both candidates.
    pub fn result(&self) -> &WithholdingResult {
        &self.result
    }

    /// The withheld amount.
    pub fn value(&self) -> Decimal {
        self.result.amount
    }
}

/// A fixed amount subtracted from pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedAmountDiscount {
    /// The amount, as supplied.
    pub amount: Decimal,
}

impl FixedAmountDiscount {
    /// The amount rounded to two digits.
    pub fn value(&self) -> Decimal {
        round_money(self.amount)
    }
}

/// A percentage of a base amount subtracted from pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PercentageDiscount {
    /// The amount the rate applies to.
    pub base: Decimal,
    /// The rate, between 0 and 1.
    pub rate: Decimal,
}

impl PercentageDiscount {
    /// `base × rate`, rounded to two digits.
    pub fn value(&self) -> Decimal {
        round_money(self.base * self.rate)
    }
}

/// A discount applied to gross pay.
///
/// # Example
///
/// ```
/// use payroll_engine::models::Discount;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let discount = Discount::percentage(
///     Decimal::from_str("2500.00").unwrap(),
///     Decimal::from_str("0.2").unwrap(),
/// );
/// assert_eq!(discount.value(), Decimal::from_str("500.00").unwrap());
/// assert_eq!(discount.name(), "Percentage");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discount {
    /// Statutory contribution.
    Contribution(ContributionDiscount),
    /// Statutory withholding.
    Withholding(WithholdingDiscount),
    /// Optional fixed amount.
    FixedAmount(FixedAmountDiscount),
    /// Optional percentage.
    Percentage(PercentageDiscount),
}

impl Discount {
    /// Builds a fixed-amount discount.
    pub fn fixed_amount(amount: Decimal) -> Self {
        Discount::FixedAmount(FixedAmountDiscount { amount })
    }

    /// Builds a percentage discount.
    pub fn percentage(base: Decimal, rate: Decimal) -> Self {
        Discount::Percentage(PercentageDiscount { base, rate })
    }

    /// The discount value, rounded half-to-even to two digits.
    pub fn value(&self) -> Decimal {
        match self {
            Discount::Contribution(d) => d.value(),
            Discount::Withholding(d) => d.value(),
            Discount::FixedAmount(d) => d.value(),
            Discount::Percentage(d) => d.value(),
        }
    }

    /// The display name.
    pub fn name(&self) -> &str {
        match self {
            Discount::Contribution(d) => &d.name,
            Discount::Withholding(d) => &d.name,
            Discount::FixedAmount(_) => FIXED_AMOUNT_DISCOUNT_NAME,
            Discount::Percentage(_) => PERCENTAGE_DISCOUNT_NAME,
        }
    }

    /// The variant tag.
    pub fn kind(&self) -> DiscountKind {
        match self {
            Discount::Contribution(_) => DiscountKind::Contribution,
            Discount::Withholding(_) => DiscountKind::Withholding,
            Discount::FixedAmount(_) => DiscountKind::FixedAmount,
            Discount::Percentage(_) => DiscountKind::Percentage,
        }
    }
}

impl From<ContributionDiscount> for Discount {
    fn from(discount: ContributionDiscount) -> Self {
        Discount::Contribution(discount)
    }
}

impl From<WithholdingDiscount> for Discount {
    fn from(discount: WithholdingDiscount) -> Self {
        Discount::Withholding(discount)
    }
}
