//! Payroll computation engine for the HRM system.
//!
//! Converts a month of attendance records and an employee's base salary into
//! a stored pay breakdown: proration by effective attendance, time-and-a-half
//! overtime, flat allowances, an attendance-gated bonus and two-tier
//! deductions. The web/API layer is a collaborator: it calls
//! [`engine::PayrollBatchRunner::generate`] and shapes the returned
//! [`engine::BatchResult`] and stored [`model::PayrollRecord`]s for clients.
//!
//! Storage is injected through the [`store`] traits; production runs against
//! [`store::MySqlStore`], tests against [`store::MemoryStore`].

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod store;

pub use config::PayrollSettings;
pub use error::PayrollError;
