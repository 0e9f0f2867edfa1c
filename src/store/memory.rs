//! In-memory employee store.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, EmployeeUpdate, NewEmployee, PeriodInputs};

use super::EmployeeStore;

#[derive(Debug, Default)]
struct Records {
    employees: BTreeMap<u64, Employee>,
    periods: BTreeMap<(u64, i32, u32), PeriodInputs>,
    last_id: u64,
}

/// Employee records held in process memory.
///
/// Ids start at 1 and are never reused, even after a delete.
#[derive(Debug, Default)]
pub struct InMemoryEmployeeStore {
    records: RwLock<Records>,
}

impl InMemoryEmployeeStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Records> {
        self.records.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Records> {
        self.records.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl EmployeeStore for InMemoryEmployeeStore {
    fn list(&self) -> EngineResult<Vec<Employee>> {
        Ok(self.read().employees.values().cloned().collect())
    }

    fn get(&self, id: u64) -> EngineResult<Employee> {
        self.read()
            .employees
            .get(&id)
            .cloned()
            .ok_or(EngineError::EmployeeNotFound { id })
    }

    fn insert(&self, new_employee: NewEmployee) -> EngineResult<Employee> {
        let start_date = new_employee.validate()?;
        let mut records = self.write();

        if records
            .employees
            .values()
            .any(|e| e.id_number == new_employee.id_number)
        {
            return Err(EngineError::DuplicateIdNumber {
                id_number: new_employee.id_number,
            });
        }

        records.last_id += 1;
        let employee = Employee {
            id: records.last_id,
            name: new_employee.name,
            monthly_salary: new_employee.monthly_salary,
            phone_number: new_employee.phone_number,
            id_number: new_employee.id_number,
            start_date,
            address: new_employee.address,
            holidays_taken: 0,
        };
        records.employees.insert(employee.id, employee.clone());

        info!(employee_id = employee.id, "Employee added");
        Ok(employee)
    }

    fn update(&self, id: u64, update: &EmployeeUpdate) -> EngineResult<Employee> {
        let mut records = self.write();
        let employee = records
            .employees
            .get_mut(&id)
            .ok_or(EngineError::EmployeeNotFound { id })?;

        update.apply_to(employee)?;

        info!(employee_id = id, "Employee updated");
        Ok(employee.clone())
    }

    fn delete(&self, id: u64) -> EngineResult<Employee> {
        let mut records = self.write();
        let employee = records
            .employees
            .remove(&id)
            .ok_or(EngineError::EmployeeNotFound { id })?;
        records.periods.retain(|(employee_id, _, _), _| *employee_id != id);

        info!(employee_id = id, "Employee deleted");
        Ok(employee)
    }

    fn record_period(
        &self,
        id: u64,
        year: i32,
        month: u32,
        inputs: &PeriodInputs,
    ) -> EngineResult<Employee> {
        inputs.validate()?;
        let mut records = self.write();
        let employee = records
            .employees
            .get_mut(&id)
            .ok_or(EngineError::EmployeeNotFound { id })?;

        employee.holidays_taken = inputs.holidays_taken;
        let employee = employee.clone();
        records.periods.insert((id, year, month), inputs.clone());

        debug!(employee_id = id, year, month, "Period inputs recorded");
        Ok(employee)
    }

    fn period_inputs(&self, id: u64, year: i32, month: u32) -> EngineResult<Option<PeriodInputs>> {
        let records = self.read();
        if !records.employees.contains_key(&id) {
            return Err(EngineError::EmployeeNotFound { id });
        }
        Ok(records.periods.get(&(id, year, month)).cloned())
    }
}
