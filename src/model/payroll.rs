use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::PayPeriod;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, sqlx::Type)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum PayrollStatus {
    Draft,
    Processed,
    Paid,
}

/// Every component of one employee's pay for one period, full precision.
/// All intermediates are kept for payslip display and audit; rounding to
/// currency happens only when a [`PayrollRecord`] is built for storage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayrollBreakdown {
    /// Base salary prorated by effective attendance.
    pub basic_salary: f64,
    pub overtime_pay: f64,
    pub allowances: f64,
    pub bonus: f64,
    pub gross_salary: f64,
    pub tax_deduction: f64,
    pub other_deductions: f64,
    pub net_pay: f64,
}

/// One generated payroll row, keyed uniquely by (employee, pay period).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PayrollRecord {
    /// 0 until the store assigns one.
    pub id: u64,
    pub employee_id: u64,
    pub pay_period_start: NaiveDate,
    pub pay_period_end: NaiveDate,
    pub basic_salary: f64,
    pub overtime_pay: f64,
    pub bonus: f64,
    pub allowances: f64,
    /// Non-tax deductions.
    pub deductions: f64,
    pub tax_deduction: f64,
    pub net_pay: f64,
    pub status: PayrollStatus,
    pub processed_by: Option<u64>,
    pub processed_at: Option<NaiveDateTime>,
}

impl PayrollRecord {
    /// Builds the `processed` record for an upsert, rounding every stored
    /// amount to 2 decimal places.
    pub fn processed(
        employee_id: u64,
        period: PayPeriod,
        breakdown: &PayrollBreakdown,
        processed_by: Option<u64>,
    ) -> Self {
        Self {
            id: 0,
            employee_id,
            pay_period_start: period.start(),
            pay_period_end: period.end(),
            basic_salary: round_currency(breakdown.basic_salary),
            overtime_pay: round_currency(breakdown.overtime_pay),
            bonus: round_currency(breakdown.bonus),
            allowances: round_currency(breakdown.allowances),
            deductions: round_currency(breakdown.other_deductions),
            tax_deduction: round_currency(breakdown.tax_deduction),
            net_pay: round_currency(breakdown.net_pay),
            status: PayrollStatus::Processed,
            processed_by,
            processed_at: Some(Utc::now().naive_utc()),
        }
    }
}

/// Round to 2 decimal places, half away from zero.
pub fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
