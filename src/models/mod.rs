//! Core data models for the payslip engine.
//!
//! This module contains the employee record supplied by the record store,
//! the per-period inputs, and the derived calculation results.

mod employee;
mod pay_adjustment;
mod period_inputs;

pub use employee::{
    Employee, EmployeeUpdate, MAX_HOLIDAYS, NewEmployee, START_DATE_FORMAT, holidays_display,
    parse_start_date,
};
pub use pay_adjustment::{PayAdjustment, PeriodSummary, SalaryRates};
pub use period_inputs::PeriodInputs;
