//! Employee record and the payloads used to create and update it.
//!
//! The record store owns these; the calculation core only reads the
//! identity fields and the monthly salary.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The most holiday days an employee can take in a year.
pub const MAX_HOLIDAYS: i64 = 14;

/// Date format used for hire dates on input and output (`DD/MM/YYYY`).
pub const START_DATE_FORMAT: &str = "%d/%m/%Y";

/// Represents an employee on the payroll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Identifier assigned by the record store.
    pub id: u64,
    /// Full name as printed on the payslip.
    pub name: String,
    /// Fixed monthly compensation before adjustments.
    pub monthly_salary: Decimal,
    /// Contact phone number.
    #[serde(default)]
    pub phone_number: Option<String>,
    /// National identity number. Unique across employees.
    pub id_number: String,
    /// The date the employee was hired.
    #[serde(with = "dmy_date")]
    pub start_date: NaiveDate,
    /// Postal address.
    #[serde(default)]
    pub address: Option<String>,
    /// Cumulative holiday days taken, bounded by [`MAX_HOLIDAYS`].
    #[serde(default)]
    pub holidays_taken: i64,
}

/// Holiday usage as displayed to administrators, e.g. `"3/14"`.
///
/// # Examples
///
/// ```
/// use payslip_engine::models::holidays_display;
///
/// assert_eq!(holidays_display(3), "3/14");
/// ```
pub fn holidays_display(taken: i64) -> String {
    format!("{}/{}", taken, MAX_HOLIDAYS)
}

/// Fields supplied when adding an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEmployee {
    /// Full name.
    pub name: String,
    /// Monthly base salary. Must not be negative.
    pub monthly_salary: Decimal,
    /// Contact phone number.
    #[serde(default)]
    pub phone_number: Option<String>,
    /// National identity number.
    pub id_number: String,
    /// Hire date in `DD/MM/YYYY` form.
    pub start_date: String,
    /// Postal address.
    #[serde(default)]
    pub address: Option<String>,
}

impl NewEmployee {
    /// Checks the payload and returns the parsed hire date.
    pub fn validate(&self) -> EngineResult<NaiveDate> {
        if self.name.trim().is_empty() {
            return Err(EngineError::validation("name", "must not be empty"));
        }
        if self.id_number.trim().is_empty() {
            return Err(EngineError::validation("id_number", "must not be empty"));
        }
        if self.monthly_salary < Decimal::ZERO {
            return Err(EngineError::validation(
                "monthly_salary",
                format!("must not be negative, got {}", self.monthly_salary),
            ));
        }
        parse_start_date(&self.start_date)
    }
}

/// Fields an administrator may change on an existing employee.
///
/// The salary is always replaced. Phone number and address are only
/// replaced when a non-empty value is supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    /// The new monthly salary.
    pub monthly_salary: Decimal,
    /// Replacement phone number.
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Replacement address.
    #[serde(default)]
    pub address: Option<String>,
}

impl EmployeeUpdate {
    /// Applies the update to an employee record.
    pub fn apply_to(&self, employee: &mut Employee) -> EngineResult<()> {
        if self.monthly_salary < Decimal::ZERO {
            return Err(EngineError::validation(
                "monthly_salary",
                format!("must not be negative, got {}", self.monthly_salary),
            ));
        }
        employee.monthly_salary = self.monthly_salary;
        if let Some(phone) = self.phone_number.as_ref().filter(|p| !p.is_empty()) {
            employee.phone_number = Some(phone.clone());
        }
        if let Some(address) = self.address.as_ref().filter(|a| !a.is_empty()) {
            employee.address = Some(address.clone());
        }
        Ok(())
    }
}

/// Parses a hire date in `DD/MM/YYYY` form.
///
/// # Examples
///
/// ```
/// use payslip_engine::models::parse_start_date;
/// use chrono::NaiveDate;
///
/// let date = parse_start_date("01/06/2023").unwrap();
/// assert_eq!(date, NaiveDate::from_ymd_opt(2023, 6, 1).unwrap());
/// assert!(parse_start_date("2023-06-01").is_err());
/// ```
pub fn parse_start_date(value: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), START_DATE_FORMAT).map_err(|_| {
        EngineError::validation(
            "start_date",
            format!("'{}' is not a valid DD/MM/YYYY date", value),
        )
    })
}

mod dmy_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::START_DATE_FORMAT;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(START_DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, START_DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}
