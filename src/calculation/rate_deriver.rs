//! Salary rate derivation.
//!
//! This module converts a monthly salary into the per-day and per-hour
//! rates used for every time-based adjustment in that month.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::SalaryRates;

/// Hours in a standard workday. Applies to every employee.
pub const STANDARD_WORKDAY_HOURS: u32 = 9;

/// Returns the number of days in a calendar month.
///
/// Uses the proleptic Gregorian calendar, so leap years follow the usual
/// 4/100/400 rule.
///
/// # Errors
///
/// Returns `Validation` on `month` when it is outside `1..=12`, or on
/// `year` when the date is outside the representable range.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::days_in_month;
///
/// assert_eq!(days_in_month(2024, 2).unwrap(), 29);
/// assert_eq!(days_in_month(2025, 2).unwrap(), 28);
/// assert_eq!(days_in_month(1900, 2).unwrap(), 28);
/// assert_eq!(days_in_month(2025, 12).unwrap(), 31);
/// ```
pub fn days_in_month(year: i32, month: u32) -> EngineResult<u32> {
    if !(1..=12).contains(&month) {
        return Err(EngineError::validation(
            "month",
            format!("must be between 1 and 12, got {}", month),
        ));
    }

    let out_of_range =
        || EngineError::validation("year", format!("{} is outside the supported range", year));

    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(out_of_range)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(out_of_range)?;

    Ok(next.signed_duration_since(first).num_days() as u32)
}

/// Derives the daily and hourly rates for a monthly salary.
///
/// `salary_per_day = base / days_in_month` and
/// `salary_per_hour = salary_per_day / 9`. No rounding is applied.
///
/// # Errors
///
/// Returns `Validation` when the salary is negative or the month is invalid.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::derive_rates;
/// use rust_decimal::Decimal;
///
/// let rates = derive_rates(Decimal::new(3100, 0), 2025, 1).unwrap();
/// assert_eq!(rates.salary_per_day, Decimal::new(100, 0));
/// assert_eq!(rates.salary_per_hour, Decimal::new(100, 0) / Decimal::from(9));
/// ```
pub fn derive_rates(
    base_monthly_salary: Decimal,
    year: i32,
    month: u32,
) -> EngineResult<SalaryRates> {
    if base_monthly_salary < Decimal::ZERO {
        return Err(EngineError::validation(
            "base_monthly_salary",
            format!("must not be negative, got {}", base_monthly_salary),
        ));
    }

    let days = days_in_month(year, month)?;
    let salary_per_day = base_monthly_salary / Decimal::from(days);
    let salary_per_hour = salary_per_day / Decimal::from(STANDARD_WORKDAY_HOURS);

    Ok(SalaryRates {
        salary_per_day,
        salary_per_hour,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn tolerance() -> Decimal {
        dec("0.000000001")
    }

    #[test]
    fn test_february_non_leap_year() {
        let rates = derive_rates(dec("3000"), 2025, 2).unwrap();

        assert!(rates.salary_per_day.to_string().starts_with("107.142857"));
        assert!(rates.salary_per_hour.to_string().starts_with("11.904761"));
    }

    #[test]
    fn test_february_leap_year_uses_29_days() {
        let rates = derive_rates(dec("2900"), 2024, 2).unwrap();
        assert_eq!(rates.salary_per_day, dec("100"));
    }

    #[test]
    fn test_thirty_day_month() {
        let rates = derive_rates(dec("2700"), 2025, 4).unwrap();
        assert_eq!(rates.salary_per_day, dec("90"));
        assert_eq!(rates.salary_per_hour, dec("10"));
    }

    #[test]
    fn test_hourly_rate_is_daily_rate_over_nine() {
        let rates = derive_rates(dec("3000"), 2025, 2).unwrap();
        assert_eq!(rates.salary_per_hour, rates.salary_per_day / dec("9"));
    }

    #[test]
    fn test_zero_salary_is_valid() {
        let rates = derive_rates(Decimal::ZERO, 2025, 6).unwrap();
        assert_eq!(rates.salary_per_day, Decimal::ZERO);
        assert_eq!(rates.salary_per_hour, Decimal::ZERO);
    }

    #[test]
    fn test_negative_salary_is_rejected() {
        match derive_rates(dec("-0.01"), 2025, 6) {
            Err(EngineError::Validation { field, .. }) => {
                assert_eq!(field, "base_monthly_salary")
            }
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_month_zero_is_rejected() {
        match derive_rates(dec("3000"), 2025, 0) {
            Err(EngineError::Validation { field, .. }) => assert_eq!(field, "month"),
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_month_thirteen_is_rejected() {
        match days_in_month(2025, 13) {
            Err(EngineError::Validation { field, message }) => {
                assert_eq!(field, "month");
                assert!(message.contains("13"));
            }
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_century_leap_rules() {
        assert_eq!(days_in_month(2000, 2).unwrap(), 29);
        assert_eq!(days_in_month(2100, 2).unwrap(), 28);
    }

    #[test]
    fn test_days_in_every_month_of_2025() {
        let expected = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for (index, days) in expected.iter().enumerate() {
            assert_eq!(days_in_month(2025, index as u32 + 1).unwrap(), *days);
        }
    }

    #[test]
    fn test_unrepresentable_year_is_rejected() {
        match days_in_month(i32::MAX, 12) {
            Err(EngineError::Validation { field, .. }) => assert_eq!(field, "year"),
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    proptest! {
        #[test]
        fn prop_daily_rate_times_days_recovers_salary(
            cents in 0i64..100_000_000,
            year in 1900i32..2200,
            month in 1u32..=12,
        ) {
            let base = Decimal::new(cents, 2);
            let rates = derive_rates(base, year, month).unwrap();
            let days = Decimal::from(days_in_month(year, month).unwrap());

            let recovered = rates.salary_per_day * days;
            prop_assert!((recovered - base).abs() < tolerance());
        }

        #[test]
        fn prop_hourly_rate_is_exactly_daily_over_nine(
            cents in 0i64..100_000_000,
            month in 1u32..=12,
        ) {
            let rates = derive_rates(Decimal::new(cents, 2), 2025, month).unwrap();
            prop_assert_eq!(rates.salary_per_hour, rates.salary_per_day / Decimal::from(9));
        }
    }
}
