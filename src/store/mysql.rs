use std::time::Duration;

use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;

use super::{AttendanceStore, EmployeeStore, PayrollStore};
use crate::error::PayrollError;
use crate::model::{AttendanceRecord, Employee, PayPeriod, PayrollRecord};

/// MySQL-backed stores over the `employees`/`departments`, `attendance` and
/// `payroll` tables. The payroll table carries a unique key on
/// (employee_id, pay_period_start); the upsert below relies on it.
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    /// Connects with a bounded acquire timeout so a stalled database turns
    /// into a `Storage` error instead of an indefinite wait.
    pub async fn connect(database_url: &str, acquire_timeout: Duration) -> Result<Self, PayrollError> {
        let pool = MySqlPoolOptions::new()
            .acquire_timeout(acquire_timeout)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub fn from_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

impl AttendanceStore for MySqlStore {
    async fn records_for_month(
        &self,
        employee_id: u64,
        period: PayPeriod,
    ) -> Result<Vec<AttendanceRecord>, PayrollError> {
        let records = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            SELECT employee_id, date, status, overtime_hours
            FROM attendance
            WHERE employee_id = ? AND date BETWEEN ? AND ?
            ORDER BY date
            "#,
        )
        .bind(employee_id)
        .bind(period.start())
        .bind(period.end())
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}

impl EmployeeStore for MySqlStore {
    async fn active_employees(
        &self,
        department: Option<&str>,
    ) -> Result<Vec<Employee>, PayrollError> {
        let base = r#"
            SELECT e.id, e.employee_code, e.first_name, e.last_name,
                   e.salary, d.name AS department, e.status
            FROM employees e
            LEFT JOIN departments d ON e.department_id = d.id
            WHERE e.status = 'active'
        "#;

        let employees = match department {
            Some(name) => {
                sqlx::query_as::<_, Employee>(&format!("{base} AND d.name = ? ORDER BY e.id"))
                    .bind(name)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_as::<_, Employee>(&format!("{base} ORDER BY e.id"))
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(employees)
    }
}

impl PayrollStore for MySqlStore {
    async fn upsert(&self, record: &PayrollRecord) -> Result<(), PayrollError> {
        // Single statement keyed on (employee_id, pay_period_start): no
        // select-then-insert window for a concurrent run to race through.
        sqlx::query(
            r#"
            INSERT INTO payroll
                (employee_id, pay_period_start, pay_period_end, basic_salary,
                 overtime_pay, bonus, allowances, deductions, tax_deduction,
                 net_pay, status, processed_by, processed_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                pay_period_end = VALUES(pay_period_end),
                basic_salary = VALUES(basic_salary),
                overtime_pay = VALUES(overtime_pay),
                bonus = VALUES(bonus),
                allowances = VALUES(allowances),
                deductions = VALUES(deductions),
                tax_deduction = VALUES(tax_deduction),
                net_pay = VALUES(net_pay),
                status = VALUES(status),
                processed_by = VALUES(processed_by),
                processed_at = VALUES(processed_at)
            "#,
        )
        .bind(record.employee_id)
        .bind(record.pay_period_start)
        .bind(record.pay_period_end)
        .bind(record.basic_salary)
        .bind(record.overtime_pay)
        .bind(record.bonus)
        .bind(record.allowances)
        .bind(record.deductions)
        .bind(record.tax_deduction)
        .bind(record.net_pay)
        .bind(record.status)
        .bind(record.processed_by)
        .bind(record.processed_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_for_period(
        &self,
        employee_id: u64,
        period: PayPeriod,
    ) -> Result<Option<PayrollRecord>, PayrollError> {
        let record = sqlx::query_as::<_, PayrollRecord>(
            r#"
            SELECT id, employee_id, pay_period_start, pay_period_end,
                   basic_salary, overtime_pay, bonus, allowances, deductions,
                   tax_deduction, net_pay, status, processed_by, processed_at
            FROM payroll
            WHERE employee_id = ? AND pay_period_start = ?
            "#,
        )
        .bind(employee_id)
        .bind(period.start())
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }
}
