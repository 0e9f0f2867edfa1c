//! Request types for the payslip API.
//!
//! Employee create and update bodies reuse [`NewEmployee`] and
//! [`EmployeeUpdate`] directly; the types here cover the period endpoints.
//!
//! [`NewEmployee`]: crate::models::NewEmployee
//! [`EmployeeUpdate`]: crate::models::EmployeeUpdate

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::PeriodInputs;

/// Request body for `POST /calculate`.
///
/// Stateless: nothing is read from or written to the employee store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The monthly salary the rates are derived from.
    pub base_monthly_salary: Decimal,
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// Adjustments for the period. Omitted fields are zero.
    #[serde(default)]
    pub inputs: PeriodInputs,
}

/// Request body for `POST /employees/{id}/adjustment`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdjustmentRequest {
    /// Calendar year; defaults to the current year.
    #[serde(default)]
    pub year: Option<i32>,
    /// Calendar month; defaults to the current month.
    #[serde(default)]
    pub month: Option<u32>,
    /// Adjustments for the period. Omitted fields are zero.
    #[serde(default)]
    pub inputs: PeriodInputs,
}

impl AdjustmentRequest {
    /// The `(year, month)` this request targets, given today's date.
    pub fn period(&self, today: NaiveDate) -> (i32, u32) {
        PeriodQuery {
            year: self.year,
            month: self.month,
        }
        .resolve(today)
    }
}

/// Optional `?year=&month=` query on the period endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodQuery {
    /// Calendar year; defaults to the current year.
    pub year: Option<i32>,
    /// Calendar month; defaults to the current month.
    pub month: Option<u32>,
}

impl PeriodQuery {
    /// Fills missing parts from `today`.
    pub fn resolve(&self, today: NaiveDate) -> (i32, u32) {
        (
            self.year.unwrap_or_else(|| today.year()),
            self.month.unwrap_or_else(|| today.month()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 17).unwrap()
    }

    #[test]
    fn test_calculation_request_defaults_inputs() {
        let json = r#"{"base_monthly_salary": "3000", "year": 2025, "month": 2}"#;
        let request: CalculationRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.base_monthly_salary, Decimal::from(3000));
        assert_eq!(request.inputs, PeriodInputs::default());
    }

    #[test]
    fn test_calculation_request_requires_month() {
        let json = r#"{"base_monthly_salary": "3000", "year": 2025}"#;
        let result: Result<CalculationRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_adjustment_request_defaults_to_current_month() {
        let request: AdjustmentRequest =
            serde_json::from_str(r#"{"inputs": {"days_absent": 2}}"#).unwrap();

        assert_eq!(request.inputs.days_absent, 2);
        assert_eq!(request.period(today()), (2025, 9));
    }

    #[test]
    fn test_period_query_keeps_explicit_values() {
        let query = PeriodQuery {
            year: Some(2024),
            month: Some(2),
        };
        assert_eq!(query.resolve(today()), (2024, 2));

        let partial = PeriodQuery {
            year: None,
            month: Some(1),
        };
        assert_eq!(partial.resolve(today()), (2025, 1));
    }
}
