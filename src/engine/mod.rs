//! The payroll core: attendance reduction, pay computation, batch generation.

mod aggregator;
mod batch;
mod calculator;

pub use aggregator::AttendanceAggregator;
pub use batch::{BatchFailure, BatchResult, PayrollBatchRunner};
pub use calculator::PayrollCalculator;
