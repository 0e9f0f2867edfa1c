//! Calculation result models.
//!
//! This module contains the derived salary rates, the [`PayAdjustment`]
//! produced for one employee and period, and the [`PeriodSummary`] shown
//! to administrators.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PeriodInputs;

/// Day and hour rates derived from a monthly salary.
///
/// Values are unrounded; rounding happens once per output field.
///
/// # Example
///
/// ```
/// use payslip_engine::models::SalaryRates;
/// use rust_decimal::Decimal;
///
/// let rates = SalaryRates {
///     salary_per_day: Decimal::new(100, 0),
///     salary_per_hour: Decimal::new(1111, 2),
/// };
/// assert_eq!(rates.salary_per_hour.to_string(), "11.11");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRates {
    /// Monthly salary divided by the days in the month.
    pub salary_per_day: Decimal,
    /// Daily rate divided by the standard workday length.
    pub salary_per_hour: Decimal,
}

/// The monetary outcome of applying one period's adjustments.
///
/// Every field is rounded to 2 decimal places. `final_salary` is computed
/// from the unrounded terms and rounded once, so it may differ by a cent
/// from re-adding the rounded fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayAdjustment {
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Daily rate.
    pub salary_per_day: Decimal,
    /// Hourly rate.
    pub salary_per_hour: Decimal,
    /// Value of regular-rate extra hours.
    pub extra_hours_equivalent: Decimal,
    /// Value of premium extra hours at 1.5x the hourly rate.
    pub premium_earnings: Decimal,
    /// Regular extra-hour value plus premium earnings.
    pub total_extra_hours_equivalent: Decimal,
    /// Value of extra days worked.
    pub extra_days_equivalent: Decimal,
    /// Value deducted for absent days.
    pub days_absent_equivalent: Decimal,
    /// Value deducted for absent hours.
    pub hours_absent_equivalent: Decimal,
    /// Advance payment deducted.
    pub advance_payment: Decimal,
    /// Amount payable for the period. May be negative.
    pub final_salary: Decimal,
}

/// What an administrator sees for one employee and month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// The employee the summary is for.
    pub employee_id: u64,
    /// The employee's name.
    pub employee_name: String,
    /// Calendar year of the period.
    pub year: i32,
    /// Calendar month of the period (1-12).
    pub month: u32,
    /// English month name, e.g. "February".
    pub month_name: String,
    /// Number of days in the month.
    pub days_in_month: u32,
    /// The inputs the adjustment was computed from.
    pub inputs: PeriodInputs,
    /// The computed adjustment.
    pub adjustment: PayAdjustment,
    /// Holiday usage, e.g. "3/14".
    pub holidays_value: String,
    /// Monthly salary with thousands separators, e.g. "3,000.00".
    pub formatted_salary: String,
    /// Final salary with thousands separators.
    pub formatted_final_salary: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_sample_adjustment() -> PayAdjustment {
        PayAdjustment {
            base_salary: dec("3000.00"),
            salary_per_day: dec("100.00"),
            salary_per_hour: dec("11.11"),
            extra_hours_equivalent: dec("0.00"),
            premium_earnings: dec("0.00"),
            total_extra_hours_equivalent: dec("0.00"),
            extra_days_equivalent: dec("0.00"),
            days_absent_equivalent: dec("100.00"),
            hours_absent_equivalent: dec("22.22"),
            advance_payment: dec("200.00"),
            final_salary: dec("2677.78"),
        }
    }

    #[test]
    fn test_pay_adjustment_serializes_amounts_as_strings() {
        let json = serde_json::to_string(&create_sample_adjustment()).unwrap();
        assert!(json.contains("\"final_salary\":\"2677.78\""));
        assert!(json.contains("\"hours_absent_equivalent\":\"22.22\""));
    }

    #[test]
    fn test_pay_adjustment_deserializes_numbers_and_strings() {
        let json = r#"{
            "base_salary": 3000,
            "salary_per_day": "100.00",
            "salary_per_hour": "11.11",
            "extra_hours_equivalent": "0",
            "premium_earnings": "0",
            "total_extra_hours_equivalent": "0",
            "extra_days_equivalent": "0",
            "days_absent_equivalent": "100.00",
            "hours_absent_equivalent": "22.22",
            "advance_payment": "200",
            "final_salary": "2677.78"
        }"#;
        let adjustment: PayAdjustment = serde_json::from_str(json).unwrap();
        assert_eq!(adjustment.base_salary, dec("3000"));
        assert_eq!(adjustment.final_salary, dec("2677.78"));
    }

    #[test]
    fn test_salary_rates_are_copy() {
        fn assert_copy<T: Copy>() {}
        assert_copy::<SalaryRates>();
    }

    #[test]
    fn test_period_summary_serialization() {
        let summary = PeriodSummary {
            employee_id: 1,
            employee_name: "Lina Haddad".to_string(),
            year: 2025,
            month: 2,
            month_name: "February".to_string(),
            days_in_month: 28,
            inputs: PeriodInputs::default(),
            adjustment: create_sample_adjustment(),
            holidays_value: "0/14".to_string(),
            formatted_salary: "3,000.00".to_string(),
            formatted_final_salary: "2,677.78".to_string(),
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"month_name\":\"February\""));
        assert!(json.contains("\"holidays_value\":\"0/14\""));
        assert!(json.contains("\"days_in_month\":28"));
        assert!(json.contains("\"formatted_salary\":\"3,000.00\""));
    }
}
