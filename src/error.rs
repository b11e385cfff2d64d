use thiserror::Error;

/// Failure taxonomy for the payroll engine.
///
/// `Input` and `Computation` are terminal for the call that raised them;
/// `Storage` is terminal for the affected employee's payroll line but not
/// for a batch as a whole.
#[derive(Debug, Error)]
pub enum PayrollError {
    /// Malformed caller input: out-of-range month/year, unknown employee.
    #[error("invalid input: {0}")]
    Input(String),

    /// Read or write failure against the attendance/employee/payroll stores.
    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),

    /// Defensive guard tripped: zero working days, negative salary or hours
    /// reaching the calculator. Indicates an upstream validation defect.
    #[error("computation invariant violated: {0}")]
    Computation(String),
}

impl PayrollError {
    pub fn is_storage(&self) -> bool {
        matches!(self, PayrollError::Storage(_))
    }
}
