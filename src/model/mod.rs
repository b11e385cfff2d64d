mod attendance;
mod employee;
mod payroll;
mod period;

pub use attendance::{AttendanceAggregate, AttendanceRecord, AttendanceStatus};
pub use employee::{Employee, EmployeeStatus};
pub use payroll::{PayrollBreakdown, PayrollRecord, PayrollStatus, round_currency};
pub use period::PayPeriod;
