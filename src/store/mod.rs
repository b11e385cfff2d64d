//! Storage capabilities injected into the engine.
//!
//! Each component takes the store it needs at construction instead of
//! reaching for a process-wide pool, so tests can substitute [`MemoryStore`].
//! A failing store must surface as [`PayrollError::Storage`]; returning
//! fabricated fallback data is not an option here.

use std::sync::Arc;

use crate::error::PayrollError;
use crate::model::{AttendanceRecord, Employee, PayPeriod, PayrollRecord};

mod memory;
mod mysql;

pub use memory::MemoryStore;
pub use mysql::MySqlStore;

/// Read-only view of the attendance rows the aggregator consumes.
pub trait AttendanceStore {
    /// All attendance rows for one employee within the period's calendar month.
    fn records_for_month(
        &self,
        employee_id: u64,
        period: PayPeriod,
    ) -> impl Future<Output = Result<Vec<AttendanceRecord>, PayrollError>> + Send;
}

/// Read-only view of the employee roster.
pub trait EmployeeStore {
    /// Employees with status `active`, optionally narrowed to one department.
    fn active_employees(
        &self,
        department: Option<&str>,
    ) -> impl Future<Output = Result<Vec<Employee>, PayrollError>> + Send;
}

/// The payroll table, keyed uniquely by (employee_id, pay period).
pub trait PayrollStore {
    /// Insert-or-overwrite on the period key, atomically. A write failure
    /// leaves no partial record behind.
    fn upsert(
        &self,
        record: &PayrollRecord,
    ) -> impl Future<Output = Result<(), PayrollError>> + Send;

    /// Payslip lookup for one employee and period.
    fn find_for_period(
        &self,
        employee_id: u64,
        period: PayPeriod,
    ) -> impl Future<Output = Result<Option<PayrollRecord>, PayrollError>> + Send;
}

impl<S: AttendanceStore + Sync + Send> AttendanceStore for Arc<S> {
    async fn records_for_month(
        &self,
        employee_id: u64,
        period: PayPeriod,
    ) -> Result<Vec<AttendanceRecord>, PayrollError> {
        (**self).records_for_month(employee_id, period).await
    }
}

impl<S: EmployeeStore + Sync + Send> EmployeeStore for Arc<S> {
    async fn active_employees(
        &self,
        department: Option<&str>,
    ) -> Result<Vec<Employee>, PayrollError> {
        (**self).active_employees(department).await
    }
}

impl<S: PayrollStore + Sync + Send> PayrollStore for Arc<S> {
    async fn upsert(&self, record: &PayrollRecord) -> Result<(), PayrollError> {
        (**self).upsert(record).await
    }

    async fn find_for_period(
        &self,
        employee_id: u64,
        period: PayPeriod,
    ) -> Result<Option<PayrollRecord>, PayrollError> {
        (**self).find_for_period(employee_id, period).await
    }
}
