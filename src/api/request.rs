//! Request types for the Payroll Engine API.
//!
//! This module defines the query string accepted by `GET /payroll` and its
//! validation into engine inputs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::Discount;

/// Query parameters for the `/payroll` endpoint.
///
/// Every field is optional at the parsing stage so that an absent parameter
/// is reported as a validation error naming it, rather than a generic
/// query rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollQuery {
    /// Pre-deduction pay.
    pub gross_pay: Option<Decimal>,
    /// Number of dependents. Signed so a negative value can be rejected
    /// with a clear message.
    pub number_of_dependents: Option<i64>,
    /// Fixed amount subtracted from pay.
    pub fixed_amount_discount: Option<Decimal>,
    /// Rate in `[0, 1]` applied to gross pay.
    #[serde(alias = "percentangeDiscount")]
    pub percentage_discount: Option<Decimal>,
}

/// A validated payroll request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayrollRequest {
    /// Pre-deduction pay, at or above the schedule's minimum.
    pub gross_pay: Decimal,
    /// Number of dependents.
    pub dependents: u32,
    /// Non-negative fixed discount.
    pub fixed_amount_discount: Decimal,
    /// Percentage discount rate in `[0, 1]`.
    pub percentage_discount: Decimal,
}

impl PayrollRequest {
    /// The optional discounts every request carries, in order.
    pub fn optional_discounts(&self) -> [Discount; 2] {
        [
            Discount::fixed_amount(self.fixed_amount_discount),
            Discount::percentage(self.gross_pay, self.percentage_discount),
        ]
    }
}

fn required<T>(value: Option<T>, field: &str) -> EngineResult<T> {
    value.ok_or_else(|| EngineError::Validation {
        field: field.to_string(),
        message: "is required".to_string(),
    })
}

impl PayrollQuery {
    /// Validates the query against the schedule's amount limits.
    ///
    /// `maximum_amount` caps both the gross pay and the fixed discount.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] naming the first offending
    /// parameter.
    pub fn validate(
        self,
        minimum_gross_pay: Decimal,
        maximum_amount: Decimal,
    ) -> EngineResult<PayrollRequest> {
        let gross_pay = required(self.gross_pay, "grossPay")?;
        let dependents = required(self.number_of_dependents, "numberOfDependents")?;
        let fixed_amount_discount = required(self.fixed_amount_discount, "fixedAmountDiscount")?;
        let percentage_discount = required(self.percentage_discount, "percentageDiscount")?;

        if gross_pay < minimum_gross_pay {
            return Err(EngineError::Validation {
                field: "grossPay".to_string(),
                message: format!("must be at least {}", minimum_gross_pay),
            });
        }
        if gross_pay > maximum_amount {
            return Err(EngineError::Validation {
                field: "grossPay".to_string(),
                message: format!("must be at most {}", maximum_amount),
            });
        }

        let dependents = u32::try_from(dependents).map_err(|_| EngineError::Validation {
            field: "numberOfDependents".to_string(),
            message: if dependents < 0 {
                "must not be negative".to_string()
            } else {
                "is too large".to_string()
            },
        })?;

        if fixed_amount_discount < Decimal::ZERO {
            return Err(EngineError::Validation {
                field: "fixedAmountDiscount".to_string(),
                message: "must not be negative".to_string(),
            });
        }
        if fixed_amount_discount > maximum_amount {
            return Err(EngineError::Validation {
                field: "fixedAmountDiscount".to_string(),
                message: format!("must be at most {}", maximum_amount),
            });
        }

        if percentage_discount < Decimal::ZERO || percentage_discount > Decimal::ONE {
            return Err(EngineError::Validation {
                field: "percentageDiscount".to_string(),
                message: "must be between 0 and 1".to_string(),
            });
        }

        Ok(PayrollRequest {
            gross_pay,
            dependents,
            fixed_amount_discount,
            percentage_discount,
        })
    }
}
