//! Employee record storage.
//!
//! The [`EmployeeStore`] trait is the seam between the HTTP layer and
//! wherever employee records live. [`InMemoryEmployeeStore`] keeps them in
//! process memory.

mod memory;

pub use memory::InMemoryEmployeeStore;

use crate::error::EngineResult;
use crate::models::{Employee, EmployeeUpdate, NewEmployee, PeriodInputs};

/// Storage for employees and the period inputs recorded against them.
pub trait EmployeeStore: Send + Sync {
    /// All employees, ordered by id.
    fn list(&self) -> EngineResult<Vec<Employee>>;

    /// Gets an employee by id.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeNotFound` when no record has this id.
    fn get(&self, id: u64) -> EngineResult<Employee>;

    /// Adds an employee and assigns its id.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a malformed payload and `DuplicateIdNumber`
    /// when another employee already holds the identity number.
    fn insert(&self, new_employee: NewEmployee) -> EngineResult<Employee>;

    /// Applies an update to an existing employee.
    fn update(&self, id: u64, update: &EmployeeUpdate) -> EngineResult<Employee>;

    /// Removes an employee together with any recorded periods.
    fn delete(&self, id: u64) -> EngineResult<Employee>;

    /// Records the inputs for one month, replacing any earlier entry.
    ///
    /// The employee's `holidays_taken` is set to the value in `inputs`.
    fn record_period(
        &self,
        id: u64,
        year: i32,
        month: u32,
        inputs: &PeriodInputs,
    ) -> EngineResult<Employee>;

    /// The inputs recorded for one month, if any.
    fn period_inputs(&self, id: u64, year: i32, month: u32) -> EngineResult<Option<PeriodInputs>>;
}
