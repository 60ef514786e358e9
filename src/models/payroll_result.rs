//! Serializable outcome of a payroll calculation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Discount, DiscountKind, Payroll};

/// One discount as it appears in a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountLine {
    /// Display name, e.g. "INSS".
    pub name: String,
    /// Variant tag.
    pub kind: DiscountKind,
    /// Rounded discount value.
    pub value: Decimal,
}

impl From<&Discount> for DiscountLine {
    fn from(discount: &Discount) -> Self {
        Self {
            name: discount.name().to_string(),
            kind: discount.kind(),
            value: discount.value(),
        }
    }
}

/// The complete result of a payroll calculation.
///
/// `calculation_id`, `timestamp` and `engine_version` are stamped per result
/// and are not persisted anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// Version of the deduction schedule applied.
    pub schedule: String,
    /// Gross pay, rounded to cents.
    pub gross_pay: Decimal,
    /// Gross pay minus the total discount.
    pub net_pay: Decimal,
    /// Sum of all discount values.
    pub total_discount: Decimal,
    /// Every discount, statutory ones first.
    pub discounts: Vec<DiscountLine>,
}

impl PayrollResult {
    /// Snapshots `payroll` into a result stamped with a fresh id and time.
    pub fn from_payroll(payroll: &Payroll, schedule: impl Into<String>) -> Self {
        Self {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            schedule: schedule.into(),
            gross_pay: payroll.gross_pay(),
            net_pay: payroll.net_pay(),
            total_discount: payroll.total_discount(),
            discounts: payroll.discounts().iter().map(DiscountLine::from).collect(),
        }
    }
}
