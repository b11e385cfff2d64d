use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::PayrollError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, sqlx::Type)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    HalfDay,
    Holiday,
}

impl AttendanceStatus {
    /// Weight of one day towards salary proration.
    pub fn effective_day_weight(self) -> f64 {
        match self {
            AttendanceStatus::Present => 1.0,
            AttendanceStatus::HalfDay => 0.5,
            AttendanceStatus::Absent | AttendanceStatus::Late | AttendanceStatus::Holiday => 0.0,
        }
    }
}

/// One attendance row. At most one exists per (employee, date); the
/// attendance store enforces the key, this type only carries the fields
/// the payroll engine reads.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AttendanceRecord {
    pub employee_id: u64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub overtime_hours: f64,
}

impl AttendanceRecord {
    pub fn new(
        employee_id: u64,
        date: NaiveDate,
        status: AttendanceStatus,
        overtime_hours: f64,
    ) -> Result<Self, PayrollError> {
        if overtime_hours < 0.0 || !overtime_hours.is_finite() {
            return Err(PayrollError::Input(format!(
                "overtime_hours must be a non-negative number, got {overtime_hours}"
            )));
        }

        Ok(Self {
            employee_id,
            date,
            status,
            overtime_hours,
        })
    }
}

/// One employee's attendance reduced over a pay period. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AttendanceAggregate {
    /// Calendar days in the target month, the proration denominator.
    /// Independent of how many attendance rows exist.
    pub working_days_in_month: u32,
    /// Count of `present` rows.
    pub present_days: u32,
    /// Σ weight(status): present 1.0, half-day 0.5, everything else 0.
    pub effective_days: f64,
    /// Σ overtime_hours over every row regardless of status.
    pub total_overtime_hours: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_overtime() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let err = AttendanceRecord::new(1, date, AttendanceStatus::Present, -1.0).unwrap_err();
        assert!(matches!(err, PayrollError::Input(_)));
    }

    #[test]
    fn status_weights() {
        assert_eq!(AttendanceStatus::Present.effective_day_weight(), 1.0);
        assert_eq!(AttendanceStatus::HalfDay.effective_day_weight(), 0.5);
        assert_eq!(AttendanceStatus::Absent.effective_day_weight(), 0.0);
        assert_eq!(AttendanceStatus::Late.effective_day_weight(), 0.0);
        assert_eq!(AttendanceStatus::Holiday.effective_day_weight(), 0.0);
    }

    #[test]
    fn status_wire_names() {
        assert_eq!(AttendanceStatus::HalfDay.to_string(), "half_day");
        assert_eq!("half_day".parse::<AttendanceStatus>().unwrap(), AttendanceStatus::HalfDay);
    }
}
