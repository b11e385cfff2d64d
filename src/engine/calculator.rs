use crate::config::PayrollSettings;
use crate::error::PayrollError;
use crate::model::{AttendanceAggregate, PayrollBreakdown};

/// Turns a base salary and one month's attendance aggregate into a full pay
/// breakdown. Pure arithmetic, no storage access; every intermediate keeps
/// full precision so rounding happens once, at the storage boundary.
pub struct PayrollCalculator {
    settings: PayrollSettings,
}

impl PayrollCalculator {
    pub fn new(settings: PayrollSettings) -> Self {
        Self { settings }
    }

    /// `base_salary` of `None` or zero falls back to the configured default
    /// so a missing salary never silently prorates into zero pay. A negative
    /// salary or negative aggregate figures are upstream validation defects
    /// and fail loudly as `Computation` errors.
    pub fn calculate(
        &self,
        base_salary: Option<f64>,
        aggregate: &AttendanceAggregate,
    ) -> Result<PayrollBreakdown, PayrollError> {
        let base = match base_salary {
            Some(salary) if salary > 0.0 => salary,
            Some(salary) if salary < 0.0 => {
                return Err(PayrollError::Computation(format!(
                    "negative base salary {salary} reached the calculator"
                )));
            }
            _ => self.settings.fallback_base_salary,
        };

        if aggregate.working_days_in_month == 0 {
            return Err(PayrollError::Computation(
                "working_days_in_month is zero".into(),
            ));
        }
        if aggregate.effective_days < 0.0 || aggregate.total_overtime_hours < 0.0 {
            return Err(PayrollError::Computation(format!(
                "negative attendance figures: effective_days={}, overtime={}",
                aggregate.effective_days, aggregate.total_overtime_hours
            )));
        }

        let working_days = f64::from(aggregate.working_days_in_month);
        let daily_salary = base / working_days;

        // Clamp so duplicate or mis-weighted rows can never inflate the
        // basic beyond one full month's salary.
        let adjusted_basic = daily_salary * aggregate.effective_days.min(working_days);

        let overtime_hourly_rate =
            base / working_days / self.settings.standard_day_hours * self.settings.overtime_multiplier;
        let overtime_pay = aggregate.total_overtime_hours * overtime_hourly_rate;

        let allowances = adjusted_basic * self.settings.allowance_rate;

        // All-or-nothing attendance gate on the full base, not prorated.
        let bonus = if f64::from(aggregate.present_days)
            >= working_days * self.settings.bonus_attendance_threshold
        {
            base * self.settings.bonus_rate
        } else {
            0.0
        };

        let gross_salary = adjusted_basic + overtime_pay + allowances + bonus;

        let tax_deduction = if gross_salary > self.settings.tax_bracket_threshold {
            gross_salary * self.settings.tax_rate_upper
        } else {
            gross_salary * self.settings.tax_rate_lower
        };
        let other_deductions = gross_salary * self.settings.other_deduction_rate;

        let net_pay = gross_salary - tax_deduction - other_deductions;

        Ok(PayrollBreakdown {
            basic_salary: adjusted_basic,
            overtime_pay,
            allowances,
            bonus,
            gross_salary,
            tax_deduction,
            other_deductions,
            net_pay,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn calculator() -> PayrollCalculator {
        PayrollCalculator::new(PayrollSettings::default())
    }

    fn aggregate(
        working_days_in_month: u32,
        present_days: u32,
        effective_days: f64,
        total_overtime_hours: f64,
    ) -> AttendanceAggregate {
        AttendanceAggregate {
            working_days_in_month,
            present_days,
            effective_days,
            total_overtime_hours,
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn partial_attendance_with_overtime() {
        // 30-day month, 28 effective days, 26 present, 5h overtime.
        let breakdown = calculator()
            .calculate(Some(30_000.0), &aggregate(30, 26, 28.0, 5.0))
            .unwrap();

        assert_close(breakdown.basic_salary, 28_000.0);
        assert_close(breakdown.overtime_pay, 937.5);
        assert_close(breakdown.allowances, 5_600.0);
        // 26 present < 28.5 threshold, no bonus.
        assert_close(breakdown.bonus, 0.0);
        assert_close(breakdown.gross_salary, 34_537.5);
        assert_close(breakdown.tax_deduction, 1_726.875);
        assert_close(breakdown.other_deductions, 690.75);
        assert_close(breakdown.net_pay, 32_119.875);
    }

    #[test]
    fn full_attendance_crosses_the_tax_bracket() {
        let breakdown = calculator()
            .calculate(Some(50_000.0), &aggregate(30, 30, 30.0, 0.0))
            .unwrap();

        assert_close(breakdown.basic_salary, 50_000.0);
        assert_close(breakdown.bonus, 2_500.0);
        assert_close(breakdown.allowances, 10_000.0);
        assert_close(breakdown.gross_salary, 62_500.0);
        assert_close(breakdown.tax_deduction, 6_250.0);
        assert_close(breakdown.other_deductions, 1_250.0);
        assert_close(breakdown.net_pay, 55_000.0);
    }

    #[test]
    fn full_attendance_restores_full_basic() {
        let breakdown = calculator()
            .calculate(Some(42_000.0), &aggregate(31, 31, 31.0, 0.0))
            .unwrap();

        assert_close(breakdown.basic_salary, 42_000.0);
    }

    #[test]
    fn zero_attendance_means_zero_basic_and_bonus() {
        let breakdown = calculator()
            .calculate(Some(30_000.0), &aggregate(30, 0, 0.0, 0.0))
            .unwrap();

        assert_close(breakdown.basic_salary, 0.0);
        assert_close(breakdown.bonus, 0.0);
        assert_close(breakdown.allowances, 0.0);
    }

    #[test]
    fn effective_days_clamped_to_month_length() {
        // 32 effective days in a 30-day month cannot exceed a full month's basic.
        let breakdown = calculator()
            .calculate(Some(30_000.0), &aggregate(30, 30, 32.0, 0.0))
            .unwrap();

        assert_close(breakdown.basic_salary, 30_000.0);
    }

    #[test]
    fn bonus_threshold_is_binary() {
        let calc = calculator();

        // 30 * 0.95 = 28.5, so 29 present days earn the bonus...
        let with_bonus = calc
            .calculate(Some(30_000.0), &aggregate(30, 29, 29.0, 0.0))
            .unwrap();
        assert_close(with_bonus.bonus, 1_500.0);

        // ...and 28 do not.
        let without = calc
            .calculate(Some(30_000.0), &aggregate(30, 28, 28.0, 0.0))
            .unwrap();
        assert_close(without.bonus, 0.0);
    }

    #[test]
    fn tax_bracket_boundary_is_strict() {
        let calc = calculator();

        // Gross of exactly 50000: 40000 basic + 8000 allowances + 2000 bonus.
        let at_boundary = calc
            .calculate(Some(40_000.0), &aggregate(30, 30, 30.0, 0.0))
            .unwrap();
        assert_close(at_boundary.gross_salary, 50_000.0);
        assert_close(at_boundary.tax_deduction, 2_500.0);

        // Nudge gross past the boundary and the upper rate applies.
        let past_boundary = calc
            .calculate(Some(40_000.008), &aggregate(30, 30, 30.0, 0.0))
            .unwrap();
        assert!(past_boundary.gross_salary > 50_000.0);
        assert_close(
            past_boundary.tax_deduction,
            past_boundary.gross_salary * 0.10,
        );
    }

    #[test]
    fn missing_or_zero_salary_uses_fallback() {
        let calc = calculator();
        let full_month = aggregate(30, 30, 30.0, 0.0);

        let from_none = calc.calculate(None, &full_month).unwrap();
        let from_zero = calc.calculate(Some(0.0), &full_month).unwrap();

        assert_close(from_none.basic_salary, 30_000.0);
        assert_eq!(from_none, from_zero);
    }

    #[test]
    fn negative_salary_fails_loudly() {
        let err = calculator()
            .calculate(Some(-1.0), &aggregate(30, 0, 0.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, PayrollError::Computation(_)));
    }

    #[test]
    fn zero_working_days_fails_loudly() {
        let err = calculator()
            .calculate(Some(30_000.0), &aggregate(0, 0, 0.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, PayrollError::Computation(_)));
    }

    #[test]
    fn net_pay_balances_against_deductions() {
        let breakdown = calculator()
            .calculate(Some(37_500.0), &aggregate(31, 22, 23.5, 7.25))
            .unwrap();

        assert_close(
            breakdown.net_pay,
            breakdown.gross_salary - breakdown.tax_deduction - breakdown.other_deductions,
        );
    }
}
