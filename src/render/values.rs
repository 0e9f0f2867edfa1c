//! Payslip value formatting.
//!
//! Turns an employee, the period inputs and the computed adjustment into the
//! exact strings printed on the payslip, one per [`PayslipField`].

use std::collections::BTreeMap;
use std::fmt::Write;

use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};

use crate::calculation::fixed_2dp;
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, PayAdjustment, PeriodInputs};

use super::layout::PayslipField;

/// Default format of the issue date (`DD/MM/YYYY`).
pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

/// The text to print for every payslip field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayslipValues {
    values: BTreeMap<PayslipField, String>,
}

impl PayslipValues {
    /// Formats the payslip values for one employee and period.
    ///
    /// Counts are printed as whole numbers; currency amounts with exactly
    /// two decimals.
    ///
    /// # Errors
    ///
    /// Returns `Validation` on `date_format` when the strftime pattern is
    /// invalid or cannot be applied to a date, and on `extra_hours` when the
    /// combined hour count overflows.
    ///
    /// # Examples
    ///
    /// ```
    /// use payslip_engine::calculation::{calculate_adjustment, derive_rates};
    /// use payslip_engine::models::{Employee, PeriodInputs};
    /// use payslip_engine::render::{PayslipField, PayslipValues, DEFAULT_DATE_FORMAT};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: 1,
    ///     name: "Lina Haddad".to_string(),
    ///     monthly_salary: Decimal::from(2700),
    ///     phone_number: None,
    ///     id_number: "985512345".to_string(),
    ///     start_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
    ///     address: None,
    ///     holidays_taken: 0,
    /// };
    /// let inputs = PeriodInputs { days_absent: 1, ..PeriodInputs::default() };
    /// let rates = derive_rates(employee.monthly_salary, 2025, 9).unwrap();
    /// let adjustment = calculate_adjustment(employee.monthly_salary, &rates, &inputs).unwrap();
    /// let issued = NaiveDate::from_ymd_opt(2025, 9, 30).unwrap();
    ///
    /// let values =
    ///     PayslipValues::new(&employee, &inputs, &adjustment, issued, DEFAULT_DATE_FORMAT)
    ///         .unwrap();
    /// assert_eq!(values.get(PayslipField::IssueDate), "30/09/2025");
    /// assert_eq!(values.get(PayslipField::DaysAbsentEquivalent), "90.00");
    /// assert_eq!(values.get(PayslipField::FinalSalary), "2610.00");
    /// ```
    pub fn new(
        employee: &Employee,
        inputs: &PeriodInputs,
        adjustment: &PayAdjustment,
        issue_date: NaiveDate,
        date_format: &str,
    ) -> EngineResult<Self> {
        let values = BTreeMap::from([
            (PayslipField::IssueDate, format_date(issue_date, date_format)?),
            (PayslipField::EmployeeName, employee.name.clone()),
            (PayslipField::IdNumber, employee.id_number.clone()),
            (PayslipField::BaseSalary, fixed_2dp(adjustment.base_salary)),
            (
                PayslipField::TotalExtraHours,
                inputs.total_extra_hours()?.to_string(),
            ),
            (
                PayslipField::TotalExtraHoursEquivalent,
                fixed_2dp(adjustment.total_extra_hours_equivalent),
            ),
            (PayslipField::ExtraDays, inputs.extra_days.to_string()),
            (
                PayslipField::ExtraDaysEquivalent,
                fixed_2dp(adjustment.extra_days_equivalent),
            ),
            (PayslipField::DaysAbsent, inputs.days_absent.to_string()),
            (
                PayslipField::DaysAbsentEquivalent,
                fixed_2dp(adjustment.days_absent_equivalent),
            ),
            (PayslipField::HoursAbsent, inputs.hours_absent.to_string()),
            (
                PayslipField::HoursAbsentEquivalent,
                fixed_2dp(adjustment.hours_absent_equivalent),
            ),
            (
                PayslipField::AdvancePayment,
                fixed_2dp(adjustment.advance_payment),
            ),
            (PayslipField::FinalSalary, fixed_2dp(adjustment.final_salary)),
        ]);

        Ok(Self { values })
    }

    /// The text for a field.
    pub fn get(&self, field: PayslipField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or_default()
    }

    /// Iterates over every field and its text.
    pub fn iter(&self) -> impl Iterator<Item = (PayslipField, &str)> + '_ {
        self.values
            .iter()
            .map(|(field, value)| (*field, value.as_str()))
    }
}

/// Formats a date with a strftime pattern, rejecting unusable patterns.
pub fn format_date(date: NaiveDate, pattern: &str) -> EngineResult<String> {
    let invalid = || {
        EngineError::validation(
            "date_format",
            format!("'{}' is not a usable date pattern", pattern),
        )
    };

    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(invalid());
    }

    let mut out = String::new();
    write!(out, "{}", date.format_with_items(items.iter())).map_err(|_| invalid())?;
    Ok(out)
}
