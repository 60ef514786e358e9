//! Configuration types for the deduction schedule.
//!
//! The `*File` structs mirror the YAML files one-to-one and are only used
//! while loading. The validated rule types ([`ContributionRules`],
//! [`WithholdingRules`], [`ReliefSchedule`], [`PayrollRules`]) are what the
//! engines consume.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{BracketRange, BracketTable};

/// Upper limit for `maximum_amount`. Sums of a handful of discounts on
/// amounts this size stay far inside `Decimal`'s range.
pub const AMOUNT_LIMIT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x38D7E, 0, false, 0);

/// Metadata about the deduction schedule, from `schedule.yaml`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScheduleMetadata {
    /// Jurisdiction code (e.g., "BR").
    pub code: String,
    /// Human-readable name of the schedule.
    pub name: String,
    /// Version label of the tables in force (e.g., "2026-01").
    pub version: String,
    /// Date from which the tables apply.
    pub effective_date: NaiveDate,
    /// URL to the official source of the tables.
    pub source_url: String,
    /// Lowest gross pay accepted by the API (the minimum wage floor).
    pub minimum_gross_pay: Decimal,
    /// Largest gross pay or fixed discount accepted by the API.
    pub maximum_amount: Decimal,
}

/// Contents of `contribution.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ContributionFile {
    /// Display name of the contribution discount.
    pub name: String,
    /// Statutory maximum contribution, charged inside the last range.
    pub ceiling: Decimal,
    /// The contribution brackets.
    pub ranges: Vec<BracketRange>,
}

/// Contents of `withholding.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct WithholdingFile {
    /// Display name of the withholding discount.
    pub name: String,
    /// Allowance per dependent under the itemized method.
    pub dependent_allowance: Decimal,
    /// Fraction of the first bracket's upper bound granted by the simplified method.
    pub simplified_allowance_rate: Decimal,
    /// Optional time-limited relief schedule.
    #[serde(default)]
    pub relief: Option<ReliefSchedule>,
    /// The withholding brackets.
    pub ranges: Vec<BracketRange>,
}

/// Statutory relief applied after the withholding tax is computed.
///
/// - `gross_pay <= low_threshold`: `max_relief`
/// - `low_threshold < gross_pay <= high_threshold`:
///   `relief_constant - relief_slope * gross_pay`, floored at zero
/// - above `high_threshold`: nothing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReliefSchedule {
    /// Gross pay up to which the full relief applies.
    pub low_threshold: Decimal,
    /// Gross pay above which no relief applies.
    pub high_threshold: Decimal,
    /// Relief granted at or below `low_threshold`.
    pub max_relief: Decimal,
    /// Intercept of the phase-out line.
    pub relief_constant: Decimal,
    /// Slope of the phase-out line.
    pub relief_slope: Decimal,
}

impl ReliefSchedule {
    fn validate(&self) -> EngineResult<()> {
        non_negative("relief.low_threshold", self.low_threshold)?;
        non_negative("relief.max_relief", self.max_relief)?;
        non_negative("relief.relief_constant", self.relief_constant)?;
        non_negative("relief.relief_slope", self.relief_slope)?;
        if self.high_threshold < self.low_threshold {
            return Err(EngineError::InvalidConfigValue {
                field: "relief.high_threshold".to_string(),
                message: format!(
                    "{} is below low_threshold {}",
                    self.high_threshold, self.low_threshold
                ),
            });
        }
        Ok(())
    }
}

/// Validated rules for the contribution engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributionRules {
    /// Display name of the discount.
    pub name: String,
    /// The contribution brackets.
    pub table: BracketTable,
    /// Statutory maximum contribution.
    pub ceiling: Decimal,
}

impl ContributionRules {
    /// Validates and assembles contribution rules.
    pub fn new(
        name: impl Into<String>,
        ranges: Vec<BracketRange>,
        ceiling: Decimal,
    ) -> EngineResult<Self> {
        let name = name.into();
        non_negative("contribution.ceiling", ceiling)?;
        let table = BracketTable::new(name.clone(), ranges)?;
        Ok(Self {
            name,
            table,
            ceiling,
        })
    }
}

impl TryFrom<ContributionFile> for ContributionRules {
    type Error = EngineError;

    fn try_from(file: ContributionFile) -> EngineResult<Self> {
        Self::new(file.name, file.ranges, file.ceiling)
    }
}

/// Validated rules for the withholding engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WithholdingRules {
    /// Display name of the discount.
    pub name: String,
    /// The withholding brackets.
    pub table: BracketTable,
    /// Allowance per dependent.
    pub dependent_allowance: Decimal,
    /// Simplified allowance rate.
    pub simplified_allowance_rate: Decimal,
    /// Optional relief schedule.
    pub relief: Option<ReliefSchedule>,
}

impl WithholdingRules {
    /// Validates and assembles withholding rules.
    pub fn new(
        name: impl Into<String>,
        ranges: Vec<BracketRange>,
        dependent_allowance: Decimal,
        simplified_allowance_rate: Decimal,
        relief: Option<ReliefSchedule>,
    ) -> EngineResult<Self> {
        let name = name.into();
        non_negative("withholding.dependent_allowance", dependent_allowance)?;
        if simplified_allowance_rate < Decimal::ZERO || simplified_allowance_rate > Decimal::ONE {
            return Err(EngineError::InvalidConfigValue {
                field: "withholding.simplified_allowance_rate".to_string(),
                message: format!("{} is outside [0, 1]", simplified_allowance_rate),
            });
        }
        if let Some(relief) = &relief {
            relief.validate()?;
        }
        let table = BracketTable::new(name.clone(), ranges)?;
        Ok(Self {
            name,
            table,
            dependent_allowance,
            simplified_allowance_rate,
            relief,
        })
    }

    /// The flat allowance granted by the simplified method.
    pub fn simplified_allowance(&self) -> Decimal {
        self.table.first().upper_bound * self.simplified_allowance_rate
    }
}

impl TryFrom<WithholdingFile> for WithholdingRules {
    type Error = EngineError;

    fn try_from(file: WithholdingFile) -> EngineResult<Self> {
        Self::new(
            file.name,
            file.ranges,
            file.dependent_allowance,
            file.simplified_allowance_rate,
            file.relief,
        )
    }
}

/// The complete, validated deduction schedule.
///
/// Built once at startup and shared read-only afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct PayrollRules {
    metadata: ScheduleMetadata,
    contribution: ContributionRules,
    withholding: WithholdingRules,
}

impl PayrollRules {
    /// Assembles a schedule from already validated parts.
    pub fn new(
        metadata: ScheduleMetadata,
        contribution: ContributionRules,
        withholding: WithholdingRules,
    ) -> EngineResult<Self> {
        non_negative("schedule.minimum_gross_pay", metadata.minimum_gross_pay)?;
        if metadata.maximum_amount < metadata.minimum_gross_pay
            || metadata.maximum_amount > AMOUNT_LIMIT
        {
            return Err(EngineError::InvalidConfigValue {
                field: "schedule.maximum_amount".to_string(),
                message: format!(
                    "{} must lie between minimum_gross_pay {} and {}",
                    metadata.maximum_amount, metadata.minimum_gross_pay, AMOUNT_LIMIT
                ),
            });
        }
        Ok(Self {
            metadata,
            contribution,
            withholding,
        })
    }

    /// Returns the schedule metadata.
    pub fn metadata(&self) -> &ScheduleMetadata {
        &self.metadata
    }

    /// Returns the contribution rules.
    pub fn contribution(&self) -> &ContributionRules {
        &self.contribution
    }

    /// Returns the withholding rules.
    pub fn withholding(&self) -> &WithholdingRules {
        &self.withholding
    }

    /// Returns the minimum accepted gross pay.
    pub fn minimum_gross_pay(&self) -> Decimal {
        self.metadata.minimum_gross_pay
    }

    /// Returns the largest accepted gross pay or fixed discount.
    pub fn maximum_amount(&self) -> Decimal {
        self.metadata.maximum_amount
    }
}

fn non_negative(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::InvalidConfigValue {
            field: field.to_string(),
            message: format!("{} must not be negative", value),
        });
    }
    Ok(())
}
