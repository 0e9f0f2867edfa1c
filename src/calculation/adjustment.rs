//! Monthly pay adjustment calculation.
//!
//! This module applies one period's absences, extra time, premium overtime
//! and advance payment to a monthly base salary.
//!
//! Every category is an independent linear term. Nothing caps extra time and
//! nothing floors the result, so a large advance can make the final salary
//! negative.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{PayAdjustment, PeriodInputs, SalaryRates};

use super::rounding::round_currency;

/// Returns the multiplier applied to premium overtime hours (1.5).
pub fn premium_multiplier() -> Decimal {
    Decimal::new(15, 1)
}

/// Calculates the adjusted salary for a period.
///
/// ```text
/// premium_earnings = extra_hours_premium * salary_per_hour * 1.5
/// final_salary     = base - advance_payment
///                    - days_absent * salary_per_day
///                    - hours_absent * salary_per_hour
///                    + extra_days * salary_per_day
///                    + extra_hours * salary_per_hour
///                    + premium_earnings
/// ```
///
/// Each output field is rounded to 2 decimal places on its own;
/// `final_salary` is summed from the unrounded terms and rounded once.
/// The function is pure, so identical arguments give identical results.
///
/// # Errors
///
/// Returns `Validation` naming the offending field when the base salary is
/// negative or any input fails [`PeriodInputs::validate`]. Validation runs
/// before any arithmetic.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::calculate_adjustment;
/// use payslip_engine::models::{PeriodInputs, SalaryRates};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rates = SalaryRates {
///     salary_per_day: Decimal::from(100),
///     salary_per_hour: Decimal::from_str("11.11").unwrap(),
/// };
/// let inputs = PeriodInputs {
///     advance_payment: Decimal::from(200),
///     days_absent: 1,
///     hours_absent: 2,
///     ..PeriodInputs::default()
/// };
///
/// let adjustment = calculate_adjustment(Decimal::from(3000), &rates, &inputs).unwrap();
/// assert_eq!(adjustment.final_salary, Decimal::from_str("2677.78").unwrap());
/// ```
pub fn calculate_adjustment(
    base_monthly_salary: Decimal,
    rates: &SalaryRates,
    inputs: &PeriodInputs,
) -> EngineResult<PayAdjustment> {
    if base_monthly_salary < Decimal::ZERO {
        return Err(EngineError::validation(
            "base_monthly_salary",
            format!("must not be negative, got {}", base_monthly_salary),
        ));
    }
    inputs.validate()?;

    let per_day = rates.salary_per_day;
    let per_hour = rates.salary_per_hour;

    let premium_earnings = amount("extra_hours_premium", inputs.extra_hours_premium, per_hour)?
        .checked_mul(premium_multiplier())
        .ok_or_else(|| too_large("extra_hours_premium"))?;

    let extra_hours_value = amount("extra_hours", inputs.extra_hours, per_hour)?;
    let extra_days_value = amount("extra_days", inputs.extra_days, per_day)?;
    let days_absent_value = amount("days_absent", inputs.days_absent, per_day)?;
    let hours_absent_value = amount("hours_absent", inputs.hours_absent, per_hour)?;

    let final_salary = [
        -inputs.advance_payment,
        -days_absent_value,
        -hours_absent_value,
        extra_days_value,
        extra_hours_value,
        premium_earnings,
    ]
    .into_iter()
    .try_fold(base_monthly_salary, Decimal::checked_add)
    .ok_or_else(|| too_large("final_salary"))?;

    let total_extra_hours_value = extra_hours_value
        .checked_add(premium_earnings)
        .ok_or_else(|| too_large("extra_hours"))?;

    Ok(PayAdjustment {
        base_salary: round_currency(base_monthly_salary),
        salary_per_day: round_currency(per_day),
        salary_per_hour: round_currency(per_hour),
        extra_hours_equivalent: round_currency(extra_hours_value),
        premium_earnings: round_currency(premium_earnings),
        total_extra_hours_equivalent: round_currency(total_extra_hours_value),
        extra_days_equivalent: round_currency(extra_days_value),
        days_absent_equivalent: round_currency(days_absent_value),
        hours_absent_equivalent: round_currency(hours_absent_value),
        advance_payment: round_currency(inputs.advance_payment),
        final_salary: round_currency(final_salary),
    })
}

/// Value of `count` units at `rate`.
fn amount(field: &str, count: i64, rate: Decimal) -> EngineResult<Decimal> {
    Decimal::from(count)
        .checked_mul(rate)
        .ok_or_else(|| too_large(field))
}

fn too_large(field: &str) -> EngineError {
    EngineError::validation(field, "value is too large to compute")
}
