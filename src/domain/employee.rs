//! Employee record guarded by the adjustment rules
//!
//! Architecture: Entity with invariants - salary can never go negative
//! - Construction and deserialization both check the invariant
//! - Salary and last-adjustment date only change together, through one method
//! - SharedEmployee gives every record its own lock for concurrent callers

use crate::domain::adjustments::{AdjustmentError, AdjustmentResult};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

/// An employee's current salary and the date it last changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EmployeeRecord")]
pub struct Employee {
    salary: Decimal,
    last_adjustment_date: NaiveDate,
}

/// Unchecked wire form of an employee
#[derive(Deserialize)]
struct EmployeeRecord {
    salary: Decimal,
    last_adjustment_date: NaiveDate,
}

impl TryFrom<EmployeeRecord> for Employee {
    type Error = AdjustmentError;

    fn try_from(record: EmployeeRecord) -> AdjustmentResult<Self> {
        Self::new(record.salary, record.last_adjustment_date)
    }
}

impl Employee {
    /// Create an employee; a negative salary is rejected
    pub fn new(salary: Decimal, last_adjustment_date: NaiveDate) -> AdjustmentResult<Self> {
        if salary < Decimal::ZERO {
            return Err(AdjustmentError::precondition(format!(
                "salary must not be negative, got {salary}"
            )));
        }

        Ok(Self { salary, last_adjustment_date })
    }

    /// Current salary
    pub fn salary(&self) -> Decimal {
        self.salary
    }

    /// Date of the last applied adjustment
    pub fn last_adjustment_date(&self) -> NaiveDate {
        self.last_adjustment_date
    }

    /// Add `increase` to the salary and stamp `effective_date`.
    ///
    /// Both fields are assigned only after the new salary has been computed,
    /// so a failure leaves the record untouched.
    pub(crate) fn apply_adjustment(
        &mut self,
        increase: Decimal,
        effective_date: NaiveDate,
    ) -> AdjustmentResult<Decimal> {
        let new_salary = self.salary.checked_add(increase).ok_or_else(|| {
            AdjustmentError::precondition(format!(
                "salary {} plus increase {} overflows",
                self.salary, increase
            ))
        })?;

        if new_salary < Decimal::ZERO {
            return Err(AdjustmentError::precondition(format!(
                "adjusted salary {new_salary} would be negative"
            )));
        }

        let previous = self.salary;
        self.salary = new_salary;
        self.last_adjustment_date = effective_date;
        Ok(previous)
    }
}

/// Handle to an employee record shared between callers.
///
/// Each handle guards its record with its own mutex; the adjustment service
/// holds that lock across validation and mutation.
#[derive(Debug, Clone)]
pub struct SharedEmployee {
    inner: Arc<Mutex<Employee>>,
}

impl SharedEmployee {
    /// Wrap an employee record
    pub fn new(employee: Employee) -> Self {
        Self { inner: Arc::new(Mutex::new(employee)) }
    }

    /// Copy of the record's current state
    pub fn snapshot(&self) -> AdjustmentResult<Employee> {
        Ok(self.lock()?.clone())
    }

    /// Acquire the per-record lock
    pub(crate) fn lock(&self) -> AdjustmentResult<MutexGuard<'_, Employee>> {
        self.inner
            .lock()
            .map_err(|_| AdjustmentError::precondition("employee record lock is poisoned"))
    }
}

impl From<Employee> for SharedEmployee {
    fn from(employee: Employee) -> Self {
        Self::new(employee)
    }
}
