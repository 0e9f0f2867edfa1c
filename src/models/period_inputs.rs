//! Per-period attendance and overtime inputs.
//!
//! This module contains [`PeriodInputs`], the set of adjustments an
//! administrator enters for one employee for one month.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::employee::MAX_HOLIDAYS;

/// Adjustments entered for a single pay period.
///
/// Day and hour counts are whole numbers; the advance payment is a currency
/// amount. Every field defaults to zero so partial payloads are accepted.
///
/// # Example
///
/// ```
/// use payslip_engine::models::PeriodInputs;
/// use rust_decimal::Decimal;
///
/// let inputs = PeriodInputs {
///     days_absent: 1,
///     hours_absent: 2,
///     advance_payment: Decimal::new(200, 0),
///     ..PeriodInputs::default()
/// };
/// assert!(inputs.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodInputs {
    /// Whole days of unpaid absence.
    #[serde(default)]
    pub days_absent: i64,
    /// Hours of unpaid absence.
    #[serde(default)]
    pub hours_absent: i64,
    /// Extra days worked, paid at the daily rate.
    #[serde(default)]
    pub extra_days: i64,
    /// Extra hours paid at the regular hourly rate.
    #[serde(default)]
    pub extra_hours: i64,
    /// Extra hours paid at the premium (1.5x) hourly rate.
    #[serde(default)]
    pub extra_hours_premium: i64,
    /// Salary already advanced during the period.
    #[serde(default)]
    pub advance_payment: Decimal,
    /// Cumulative holiday days taken as of this period.
    #[serde(default)]
    pub holidays_taken: i64,
}

impl PeriodInputs {
    /// Checks every field, reporting the first offending one.
    ///
    /// Counts and the advance payment must not be negative, and
    /// `holidays_taken` must lie in `0..=14`. Extra hours are uncapped but
    /// their combined count must fit an `i64`. Values are never clamped.
    pub fn validate(&self) -> EngineResult<()> {
        let counts = [
            ("days_absent", self.days_absent),
            ("hours_absent", self.hours_absent),
            ("extra_days", self.extra_days),
            ("extra_hours", self.extra_hours),
            ("extra_hours_premium", self.extra_hours_premium),
        ];
        for (field, value) in counts {
            if value < 0 {
                return Err(EngineError::validation(
                    field,
                    format!("must not be negative, got {}", value),
                ));
            }
        }

        self.total_extra_hours()?;

        if self.advance_payment < Decimal::ZERO {
            return Err(EngineError::validation(
                "advance_payment",
                format!("must not be negative, got {}", self.advance_payment),
            ));
        }

        if !(0..=MAX_HOLIDAYS).contains(&self.holidays_taken) {
            return Err(EngineError::validation(
                "holidays_taken",
                format!(
                    "must be between 0 and {}, got {}",
                    MAX_HOLIDAYS, self.holidays_taken
                ),
            ));
        }

        Ok(())
    }

    /// Regular plus premium overtime hours.
    ///
    /// # Errors
    ///
    /// Returns `Validation` on `extra_hours` when the sum overflows.
    pub fn total_extra_hours(&self) -> EngineResult<i64> {
        self.extra_hours
            .checked_add(self.extra_hours_premium)
            .ok_or_else(|| {
                EngineError::validation(
                    "extra_hours",
                    "combined regular and premium hours are too large",
                )
            })
    }
}
