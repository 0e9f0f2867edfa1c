//! Period summary for one employee.
//!
//! Combines rate derivation and the adjustment calculation into the view an
//! administrator reviews before issuing a payslip.

use chrono::Month;

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, PeriodInputs, PeriodSummary, holidays_display};

use super::adjustment::calculate_adjustment;
use super::rate_deriver::{days_in_month, derive_rates};
use super::rounding::format_currency;

/// Builds the summary of an employee's pay for a calendar month.
///
/// The holiday display uses `inputs.holidays_taken`, which is the value
/// written back to the employee record when the period is recorded.
///
/// # Errors
///
/// Propagates `Validation` from rate derivation and input validation.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::summarize_period;
/// use payslip_engine::models::{Employee, PeriodInputs};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: 1,
///     name: "Lina Haddad".to_string(),
///     monthly_salary: Decimal::from(3000),
///     phone_number: None,
///     id_number: "985512345".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
///     address: None,
///     holidays_taken: 0,
/// };
///
/// let summary = summarize_period(&employee, &PeriodInputs::default(), 2025, 2).unwrap();
/// assert_eq!(summary.month_name, "February");
/// assert_eq!(summary.days_in_month, 28);
/// assert_eq!(summary.holidays_value, "0/14");
/// assert_eq!(summary.formatted_salary, "3,000.00");
/// ```
pub fn summarize_period(
    employee: &Employee,
    inputs: &PeriodInputs,
    year: i32,
    month: u32,
) -> EngineResult<PeriodSummary> {
    let days = days_in_month(year, month)?;
    let rates = derive_rates(employee.monthly_salary, year, month)?;
    let adjustment = calculate_adjustment(employee.monthly_salary, &rates, inputs)?;

    let month_name = u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name().to_string())
        .ok_or_else(|| {
            EngineError::validation("month", format!("must be between 1 and 12, got {}", month))
        })?;

    Ok(PeriodSummary {
        employee_id: employee.id,
        employee_name: employee.name.clone(),
        year,
        month,
        month_name,
        days_in_month: days,
        inputs: inputs.clone(),
        holidays_value: holidays_display(inputs.holidays_taken),
        formatted_salary: format_currency(employee.monthly_salary),
        formatted_final_salary: format_currency(adjustment.final_salary),
        adjustment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_employee(salary: &str) -> Employee {
        Employee {
            id: 3,
            name: "Omar Saleh".to_string(),
            monthly_salary: dec(salary),
            phone_number: None,
            id_number: "401234567".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            address: None,
            holidays_taken: 2,
        }
    }

    #[test]
    fn test_summary_for_thirty_day_month() {
        let employee = create_test_employee("2700");
        let inputs = PeriodInputs {
            days_absent: 1,
            extra_hours_premium: 2,
            holidays_taken: 5,
            ..PeriodInputs::default()
        };

        let summary = summarize_period(&employee, &inputs, 2025, 9).unwrap();

        assert_eq!(summary.employee_id, 3);
        assert_eq!(summary.employee_name, "Omar Saleh");
        assert_eq!(summary.month_name, "September");
        assert_eq!(summary.days_in_month, 30);
        assert_eq!(summary.adjustment.salary_per_day, dec("90.00"));
        assert_eq!(summary.adjustment.salary_per_hour, dec("10.00"));
        assert_eq!(summary.adjustment.premium_earnings, dec("30.00"));
        // 2700 - 90 + 30
        assert_eq!(summary.adjustment.final_salary, dec("2640.00"));
        assert_eq!(summary.holidays_value, "5/14");
    }

    #[test]
    fn test_summary_rejects_invalid_month() {
        let employee = create_test_employee("2700");
        match summarize_period(&employee, &PeriodInputs::default(), 2025, 13) {
            Err(EngineError::Validation { field, .. }) => assert_eq!(field, "month"),
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_summary_rejects_invalid_inputs() {
        let employee = create_test_employee("2700");
        let inputs = PeriodInputs {
            holidays_taken: 20,
            ..PeriodInputs::default()
        };
        assert!(summarize_period(&employee, &inputs, 2025, 1).is_err());
    }

    #[test]
    fn test_summary_keeps_inputs() {
        let employee = create_test_employee("3100");
        let inputs = PeriodInputs {
            extra_days: 1,
            ..PeriodInputs::default()
        };

        let summary = summarize_period(&employee, &inputs, 2025, 1).unwrap();

        assert_eq!(summary.inputs, inputs);
        assert_eq!(summary.adjustment.final_salary, dec("3200.00"));
    }

    #[test]
    fn test_summary_formats_salaries_with_separators() {
        let employee = create_test_employee("12500");
        let inputs = PeriodInputs {
            advance_payment: dec("13000.5"),
            ..PeriodInputs::default()
        };

        let summary = summarize_period(&employee, &inputs, 2025, 9).unwrap();

        assert_eq!(summary.formatted_salary, "12,500.00");
        assert_eq!(summary.formatted_final_salary, "-500.50");
    }
}
