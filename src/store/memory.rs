use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use chrono::NaiveDate;

use super::{AttendanceStore, EmployeeStore, PayrollStore};
use crate::error::PayrollError;
use crate::model::{AttendanceRecord, Employee, EmployeeStatus, PayPeriod, PayrollRecord};

/// In-process stand-in for the MySQL stores, used by engine tests.
///
/// Failure injection mirrors how the real store fails: per-employee read
/// faults (one bad attendance query) and a global write fault (payroll
/// table unavailable). Injected failures surface as `Storage` errors,
/// never as substitute data.
#[derive(Default)]
pub struct MemoryStore {
    employees: Mutex<Vec<Employee>>,
    attendance: Mutex<HashMap<(u64, NaiveDate), AttendanceRecord>>,
    payroll: Mutex<HashMap<(u64, NaiveDate), PayrollRecord>>,
    next_payroll_id: AtomicU64,
    fail_attendance_reads_for: Mutex<Vec<u64>>,
    fail_payroll_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            next_payroll_id: AtomicU64::new(1),
            ..Self::default()
        }
    }

    pub fn add_employee(&self, employee: Employee) {
        self.employees.lock().unwrap().push(employee);
    }

    /// Inserts or replaces the row for (employee, date).
    pub fn add_attendance(&self, record: AttendanceRecord) {
        self.attendance
            .lock()
            .unwrap()
            .insert((record.employee_id, record.date), record);
    }

    pub fn payroll_record(&self, employee_id: u64, period: PayPeriod) -> Option<PayrollRecord> {
        self.payroll
            .lock()
            .unwrap()
            .get(&(employee_id, period.start()))
            .cloned()
    }

    pub fn payroll_row_count(&self) -> usize {
        self.payroll.lock().unwrap().len()
    }

    /// Makes every attendance read for the given employee fail.
    pub fn fail_attendance_reads_for(&self, employee_id: u64) {
        self.fail_attendance_reads_for.lock().unwrap().push(employee_id);
    }

    /// Makes every payroll upsert fail.
    pub fn fail_payroll_writes(&self, fail: bool) {
        self.fail_payroll_writes.store(fail, Ordering::Relaxed);
    }
}

fn storage_unavailable() -> PayrollError {
    PayrollError::Storage(sqlx::Error::PoolTimedOut)
}

impl AttendanceStore for MemoryStore {
    async fn records_for_month(
        &self,
        employee_id: u64,
        period: PayPeriod,
    ) -> Result<Vec<AttendanceRecord>, PayrollError> {
        if self
            .fail_attendance_reads_for
            .lock()
            .unwrap()
            .contains(&employee_id)
        {
            return Err(storage_unavailable());
        }

        let mut records: Vec<AttendanceRecord> = self
            .attendance
            .lock()
            .unwrap()
            .values()
            .filter(|r| {
                r.employee_id == employee_id
                    && r.date >= period.start()
                    && r.date <= period.end()
            })
            .cloned()
            .collect();
        records.sort_by_key(|r| r.date);

        Ok(records)
    }
}

impl EmployeeStore for MemoryStore {
    async fn active_employees(
        &self,
        department: Option<&str>,
    ) -> Result<Vec<Employee>, PayrollError> {
        let employees = self
            .employees
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.status == EmployeeStatus::Active)
            .filter(|e| match department {
                Some(name) => e.department.as_deref() == Some(name),
                None => true,
            })
            .cloned()
            .collect();

        Ok(employees)
    }
}

impl PayrollStore for MemoryStore {
    async fn upsert(&self, record: &PayrollRecord) -> Result<(), PayrollError> {
        if self.fail_payroll_writes.load(Ordering::Relaxed) {
            return Err(storage_unavailable());
        }

        let mut payroll = self.payroll.lock().unwrap();
        let key = (record.employee_id, record.pay_period_start);
        let id = match payroll.get(&key) {
            Some(existing) => existing.id,
            None => self.next_payroll_id.fetch_add(1, Ordering::Relaxed),
        };

        let mut stored = record.clone();
        stored.id = id;
        payroll.insert(key, stored);

        Ok(())
    }

    async fn find_for_period(
        &self,
        employee_id: u64,
        period: PayPeriod,
    ) -> Result<Option<PayrollRecord>, PayrollError> {
        Ok(self.payroll_record(employee_id, period))
    }
}
