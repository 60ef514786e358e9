//! Time-limited statutory relief on withholding tax.

use rust_decimal::Decimal;

use crate::config::ReliefSchedule;

use super::rounding::round_money;

/// Calculates the relief granted against `computed_tax` for `gross_pay`.
///
/// - At or below the low threshold the maximum relief applies.
/// - Between the thresholds the relief phases out linearly as
///   `relief_constant − relief_slope × gross_pay`, never below zero.
/// - Above the high threshold there is no relief.
///
/// The relief is rounded to two digits and capped at `computed_tax`, so it
/// can never turn the tax negative. The phase-out stops abruptly at the high
/// threshold.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_relief;
/// use payroll_engine::config::ReliefSchedule;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let schedule = ReliefSchedule {
///     low_threshold: dec("5000.00"),
///     high_threshold: dec("7350.00"),
///     max_relief: dec("312.89"),
///     relief_constant: dec("978.62"),
///     relief_slope: dec("0.133145"),
/// };
///
/// // 978.62 − 0.133145 × 6000.00
/// assert_eq!(calculate_relief(dec("6000.00"), dec("500.00"), &schedule), dec("179.75"));
/// ```
pub fn calculate_relief(
    gross_pay: Decimal,
    computed_tax: Decimal,
    schedule: &ReliefSchedule,
) -> Decimal {
    let relief = if gross_pay <= schedule.low_threshold {
        schedule.max_relief
    } else if gross_pay <= schedule.high_threshold {
        (schedule.relief_constant - schedule.relief_slope * gross_pay).max(Decimal::ZERO)
    } else {
        Decimal::ZERO
    };

    round_money(relief).min(round_money(computed_tax.max(Decimal::ZERO)))
}
