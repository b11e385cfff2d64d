use std::env;

use dotenvy::dotenv;

/// Rates and thresholds the calculator applies. Kept together so a
/// deployment can tune them from the environment without touching code.
#[derive(Debug, Clone)]
pub struct PayrollSettings {
    /// Used when an employee's stored salary is missing or zero.
    pub fallback_base_salary: f64,
    /// Hours in a standard working day, the overtime-rate denominator.
    pub standard_day_hours: f64,
    /// Overtime premium over the derived hourly rate.
    pub overtime_multiplier: f64,
    /// Allowances as a share of the prorated basic salary.
    pub allowance_rate: f64,
    /// Bonus as a share of the full base salary.
    pub bonus_rate: f64,
    /// Fraction of working days an employee must be present to earn the bonus.
    pub bonus_attendance_threshold: f64,
    /// Gross salary above which the upper tax rate applies (strict).
    pub tax_bracket_threshold: f64,
    pub tax_rate_lower: f64,
    pub tax_rate_upper: f64,
    /// Other deductions as a share of gross.
    pub other_deduction_rate: f64,
    /// Per-employee tasks in flight at once during batch generation.
    pub batch_concurrency: usize,
}

impl Default for PayrollSettings {
    fn default() -> Self {
        Self {
            fallback_base_salary: 30_000.0,
            standard_day_hours: 8.0,
            overtime_multiplier: 1.5,
            allowance_rate: 0.20,
            bonus_rate: 0.05,
            bonus_attendance_threshold: 0.95,
            tax_bracket_threshold: 50_000.0,
            tax_rate_lower: 0.05,
            tax_rate_upper: 0.10,
            other_deduction_rate: 0.02,
            batch_concurrency: 8,
        }
    }
}

impl PayrollSettings {
    pub fn from_env() -> Self {
        dotenv().ok();

        let defaults = Self::default();

        Self {
            fallback_base_salary: env_f64("PAYROLL_FALLBACK_BASE_SALARY")
                .unwrap_or(defaults.fallback_base_salary),
            standard_day_hours: env_f64("PAYROLL_STANDARD_DAY_HOURS")
                .unwrap_or(defaults.standard_day_hours),
            overtime_multiplier: env_f64("PAYROLL_OVERTIME_MULTIPLIER")
                .unwrap_or(defaults.overtime_multiplier),
            allowance_rate: env_f64("PAYROLL_ALLOWANCE_RATE").unwrap_or(defaults.allowance_rate),
            bonus_rate: env_f64("PAYROLL_BONUS_RATE").unwrap_or(defaults.bonus_rate),
            bonus_attendance_threshold: env_f64("PAYROLL_BONUS_ATTENDANCE_THRESHOLD")
                .unwrap_or(defaults.bonus_attendance_threshold),
            tax_bracket_threshold: env_f64("PAYROLL_TAX_BRACKET_THRESHOLD")
                .unwrap_or(defaults.tax_bracket_threshold),
            tax_rate_lower: env_f64("PAYROLL_TAX_RATE_LOWER").unwrap_or(defaults.tax_rate_lower),
            tax_rate_upper: env_f64("PAYROLL_TAX_RATE_UPPER").unwrap_or(defaults.tax_rate_upper),
            other_deduction_rate: env_f64("PAYROLL_OTHER_DEDUCTION_RATE")
                .unwrap_or(defaults.other_deduction_rate),
            batch_concurrency: env::var("PAYROLL_BATCH_CONCURRENCY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.batch_concurrency),
        }
    }
}

fn env_f64(key: &str) -> Option<f64> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
