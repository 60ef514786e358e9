//! Bracket table models.
//!
//! A [`BracketTable`] is an ordered, validated sequence of [`BracketRange`]s
//! covering `[0, +∞)` at cent granularity. Both the contribution and the
//! withholding engines look amounts up in one of these tables.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The smallest monetary step between two adjacent ranges.
pub const CENT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// A single range of a progressive bracket table.
///
/// Both bounds are inclusive. Lookups through [`BracketTable::find`] only
/// use the lower bound.
///
/// # Example
///
/// ```
/// use payroll_engine::models::BracketRange;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let range = BracketRange {
///     ordinal: 2,
///     lower_bound: Decimal::from_str("1621.01").unwrap(),
///     upper_bound: Decimal::from_str("2902.84").unwrap(),
///     rate: Decimal::from_str("0.09").unwrap(),
///     deduction_constant: Decimal::ZERO,
/// };
/// assert!(range.contains(Decimal::from_str("2902.84").unwrap()));
/// assert!(!range.contains(Decimal::from_str("2902.85").unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketRange {
    /// 1-based position of the range within its table.
    pub ordinal: u32,
    /// Inclusive lower bound.
    pub lower_bound: Decimal,
    /// Inclusive upper bound. The last range uses a very large sentinel.
    pub upper_bound: Decimal,
    /// Marginal rate, between 0 and 1.
    pub rate: Decimal,
    /// Amount subtracted after applying `rate` to the whole base.
    /// Only withholding tables use it; contribution tables leave it at zero.
    #[serde(default)]
    pub deduction_constant: Decimal,
}

impl BracketRange {
    /// Returns `true` when `amount` lies within both inclusive bounds.
    pub fn contains(&self, amount: Decimal) -> bool {
        amount >= self.lower_bound && amount <= self.upper_bound
    }
}

/// An immutable, validated bracket table.
///
/// Construction through [`BracketTable::new`] guarantees that:
/// - the table is non-empty and ordinals run `1..=n` in order,
/// - the first range starts at zero,
/// - each range is contiguous with the next (`next.lower == prev.upper + 0.01`),
/// - rates stay within `[0, 1]` and never decrease,
/// - deduction constants are non-negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketTable {
    name: String,
    ranges: Vec<BracketRange>,
}

impl BracketTable {
    /// Validates `ranges` and builds a table named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidBracketTable`] describing the first
    /// invariant that does not hold.
    pub fn new(name: impl Into<String>, ranges: Vec<BracketRange>) -> EngineResult<Self> {
        let name = name.into();
        let invalid = |message: String| EngineError::InvalidBracketTable {
            table: name.clone(),
            message,
        };

        let Some(first) = ranges.first() else {
            return Err(invalid("table has no ranges".to_string()));
        };
        if first.lower_bound != Decimal::ZERO {
            return Err(invalid(format!(
                "first range must start at 0, starts at {}",
                first.lower_bound
            )));
        }

        for (index, range) in ranges.iter().enumerate() {
            let expected = index as u32 + 1;
            if range.ordinal != expected {
                return Err(invalid(format!(
                    "range at position {} has ordinal {}, expected {}",
                    expected, range.ordinal, expected
                )));
            }
            if range.lower_bound > range.upper_bound {
                return Err(invalid(format!(
                    "range {} has lower bound {} above upper bound {}",
                    range.ordinal, range.lower_bound, range.upper_bound
                )));
            }
            if range.rate < Decimal::ZERO || range.rate > Decimal::ONE {
                return Err(invalid(format!(
                    "range {} has rate {} outside [0, 1]",
                    range.ordinal, range.rate
                )));
            }
            if range.deduction_constant < Decimal::ZERO {
                return Err(invalid(format!(
                    "range {} has negative deduction constant {}",
                    range.ordinal, range.deduction_constant
                )));
            }
        }

        for pair in ranges.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            let expected_lower = prev.upper_bound + CENT;
            if next.lower_bound > expected_lower {
                return Err(invalid(format!(
                    "gap between range {} (ends {}) and range {} (starts {})",
                    prev.ordinal, prev.upper_bound, next.ordinal, next.lower_bound
                )));
            }
            if next.lower_bound < expected_lower {
                return Err(invalid(format!(
                    "range {} (starts {}) overlaps range {} (ends {})",
                    next.ordinal, next.lower_bound, prev.ordinal, prev.upper_bound
                )));
            }
            if next.rate < prev.rate {
                return Err(invalid(format!(
                    "rate decreases from {} in range {} to {} in range {}",
                    prev.rate, prev.ordinal, next.rate, next.ordinal
                )));
            }
        }

        Ok(Self { name, ranges })
    }

    /// Returns the table name used in logs and errors.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns all ranges in ordinal order.
    pub fn ranges(&self) -> &[BracketRange] {
        &self.ranges
    }

    /// Returns the first range.
    pub fn first(&self) -> &BracketRange {
        &self.ranges[0]
    }

    /// Returns the last (sentinel) range.
    pub fn last(&self) -> &BracketRange {
        &self.ranges[self.ranges.len() - 1]
    }

    /// Returns `true` if `range` is the first range of this table.
    pub fn is_first(&self, range: &BracketRange) -> bool {
        range.ordinal == self.first().ordinal
    }

    /// Returns `true` if `range` is the last range of this table.
    pub fn is_last(&self, range: &BracketRange) -> bool {
        range.ordinal == self.last().ordinal
    }

    /// Finds the range `amount` falls in.
    ///
    /// Picks the last range whose lower bound is at or below `amount`, so an
    /// amount between two cents belongs to the lower range and the last range
    /// is open above its sentinel upper bound.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoBracketFound`] for negative amounts.
    pub fn find(&self, amount: Decimal) -> EngineResult<&BracketRange> {
        self.ranges
            .iter()
            .rev()
            .find(|range| range.lower_bound <= amount)
            .ok_or_else(|| EngineError::NoBracketFound {
                table: self.name.clone(),
                amount,
            })
    }
}
