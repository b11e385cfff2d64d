use std::sync::atomic::{AtomicBool, Ordering};

use futures::{StreamExt, future, stream};
use serde::Serialize;
use tracing::{error, info};

use super::aggregator::AttendanceAggregator;
use super::calculator::PayrollCalculator;
use crate::config::PayrollSettings;
use crate::error::PayrollError;
use crate::model::{Employee, PayPeriod, PayrollRecord};
use crate::store::{AttendanceStore, EmployeeStore, PayrollStore};

/// One employee the batch could not pay this run. The rest of the batch is
/// unaffected; the caller decides whether to retry or surface it.
#[derive(Debug, Serialize)]
pub struct BatchFailure {
    pub employee_id: u64,
    pub employee_code: String,
    pub reason: String,
}

/// Outcome of one generation run, returned to the calling layer as the
/// externally visible summary.
#[derive(Debug, Serialize)]
pub struct BatchResult {
    pub period: PayPeriod,
    /// Employees whose payroll record was written this run.
    pub processed: usize,
    pub failures: Vec<BatchFailure>,
    /// Net pay summed over the succeeded employees only.
    pub total_net_pay: f64,
}

impl BatchResult {
    /// False as soon as any employee's record failed to write; a partial
    /// run must never read as a fully successful one.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs payroll generation for every active employee of a period:
/// aggregate, calculate, upsert, per employee, with bounded concurrency.
/// Rerunning a period overwrites each (employee, period) record in place,
/// so generation is idempotent for unchanged attendance data.
pub struct PayrollBatchRunner<A, E, P> {
    aggregator: AttendanceAggregator<A>,
    calculator: PayrollCalculator,
    employees: E,
    payroll: P,
    concurrency: usize,
    aborted: AtomicBool,
}

impl<A, E, P> PayrollBatchRunner<A, E, P>
where
    A: AttendanceStore + Sync,
    E: EmployeeStore + Sync,
    P: PayrollStore + Sync,
{
    pub fn new(settings: PayrollSettings, attendance: A, employees: E, payroll: P) -> Self {
        Self {
            aggregator: AttendanceAggregator::new(attendance),
            calculator: PayrollCalculator::new(settings.clone()),
            employees,
            payroll,
            concurrency: settings.batch_concurrency.max(1),
            aborted: AtomicBool::new(false),
        }
    }

    /// Stops scheduling further employees. Per-employee work already in
    /// flight completes or fails on its own.
    pub fn abort(&self) {
        self.aborted.store(true, Ordering::Relaxed);
    }

    pub async fn generate(
        &self,
        period: PayPeriod,
        department: Option<&str>,
        processed_by: Option<u64>,
    ) -> Result<BatchResult, PayrollError> {
        // Roster read failure is fatal for the whole call; there is no
        // employee set to iterate.
        let roster = self.employees.active_employees(department).await?;

        info!(
            period = %period,
            department = department.unwrap_or("all"),
            employees = roster.len(),
            "generating payroll"
        );

        let outcomes: Vec<Result<f64, BatchFailure>> = stream::iter(roster)
            .take_while(|_| future::ready(!self.aborted.load(Ordering::Relaxed)))
            .map(|employee| self.process_employee(employee, period, processed_by))
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let mut result = BatchResult {
            period,
            processed: 0,
            failures: Vec::new(),
            total_net_pay: 0.0,
        };
        for outcome in outcomes {
            match outcome {
                Ok(net_pay) => {
                    result.processed += 1;
                    result.total_net_pay += net_pay;
                }
                Err(failure) => result.failures.push(failure),
            }
        }

        info!(
            period = %period,
            processed = result.processed,
            failed = result.failures.len(),
            total_net_pay = result.total_net_pay,
            "payroll generation finished"
        );

        Ok(result)
    }

    /// One employee's full pipeline. Every error is contained here so a bad
    /// row never disturbs the rest of the batch.
    async fn process_employee(
        &self,
        employee: Employee,
        period: PayPeriod,
        processed_by: Option<u64>,
    ) -> Result<f64, BatchFailure> {
        let run = async {
            let aggregate = self.aggregator.aggregate(employee.id, period).await?;
            let breakdown = self.calculator.calculate(employee.salary, &aggregate)?;
            let record = PayrollRecord::processed(employee.id, period, &breakdown, processed_by);
            self.payroll.upsert(&record).await?;
            Ok::<f64, PayrollError>(record.net_pay)
        };

        run.await.map_err(|e| {
            error!(error = %e, employee_id = employee.id, %period, "payroll generation failed for employee");
            BatchFailure {
                employee_id: employee.id,
                employee_code: employee.employee_code.clone(),
                reason: e.to_string(),
            }
        })
    }
}
