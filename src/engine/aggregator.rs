use crate::error::PayrollError;
use crate::model::{AttendanceAggregate, AttendanceStatus, PayPeriod};
use crate::store::AttendanceStore;

/// Reduces one employee's attendance rows for a month into the figures the
/// calculator consumes. Read-only over the attendance store.
pub struct AttendanceAggregator<S> {
    store: S,
}

impl<S: AttendanceStore> AttendanceAggregator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn aggregate(
        &self,
        employee_id: u64,
        period: PayPeriod,
    ) -> Result<AttendanceAggregate, PayrollError> {
        let records = self.store.records_for_month(employee_id, period).await?;

        let mut present_days = 0u32;
        let mut effective_days = 0.0f64;
        let mut total_overtime_hours = 0.0f64;

        for record in &records {
            if record.status == AttendanceStatus::Present {
                present_days += 1;
            }
            effective_days += record.status.effective_day_weight();
            // Overtime counts whatever the day's status was.
            total_overtime_hours += record.overtime_hours;
        }

        Ok(AttendanceAggregate {
            // Calendar length of the month, not the number of rows found:
            // this is the proration denominator and never collapses to zero.
            working_days_in_month: period.days_in_month(),
            present_days,
            effective_days,
            total_overtime_hours,
        })
    }
}
