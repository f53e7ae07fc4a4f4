//! Persisted week record for one worker.
//!
//! There is at most one [`WeekRecord`] per `(worker_id, week_start)` pair;
//! saving the same week again replaces the stored figures.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::worker::short_id;
use super::{AttendanceDraft, AttendanceRecord, SalaryBreakdown};

/// Whether a week's wages have been paid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Not yet paid. New records start here.
    #[default]
    Unpaid,
    /// Paid out.
    Paid,
}

impl PaymentStatus {
    /// Returns the stored form of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unpaid => "UNPAID",
            Self::Paid => "PAID",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored payment status is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPaymentStatus(pub String);

impl fmt::Display for UnknownPaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown payment status: {}", self.0)
    }
}

impl std::error::Error for UnknownPaymentStatus {}

impl FromStr for PaymentStatus {
    type Err = UnknownPaymentStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UNPAID" => Ok(Self::Unpaid),
            "PAID" => Ok(Self::Paid),
            other => Err(UnknownPaymentStatus(other.to_string())),
        }
    }
}

/// A saved week of attendance and pay for one worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekRecord {
    /// Row identifier (`wk_` followed by 12 hex characters).
    pub id: String,
    /// The worker this week belongs to.
    pub worker_id: String,
    /// First day of the week.
    #[serde(rename = "weekStartDate")]
    pub week_start: NaiveDate,
    /// Normalized attendance.
    pub days: AttendanceRecord,
    /// Overtime hours entered.
    #[serde(rename = "otHours")]
    pub overtime_hours: Decimal,
    /// Effective overtime rate used in the calculation.
    #[serde(rename = "otRate")]
    pub overtime_rate: Decimal,
    /// Bonus entered.
    pub bonus: Decimal,
    /// Deduction entered.
    pub deduction: Decimal,
    /// Amount payable for the week.
    pub total_salary: Decimal,
    /// The full calculation result.
    pub breakdown: SalaryBreakdown,
    /// Payment status.
    pub status: PaymentStatus,
    /// When the record was last written.
    pub updated_at: DateTime<Utc>,
}

impl WeekRecord {
    /// Builds an unpaid record from a draft and the breakdown computed from it.
    ///
    /// Overtime hours, bonus and deduction come from the draft as entered; the
    /// overtime rate and total come from the breakdown, so a defaulted rate is
    /// stored as the concrete value that was applied.
    pub fn new(
        worker_id: impl Into<String>,
        week_start: NaiveDate,
        draft: &AttendanceDraft,
        breakdown: SalaryBreakdown,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: short_id("wk"),
            worker_id: worker_id.into(),
            week_start,
            days: breakdown.days,
            overtime_hours: draft.overtime_hours,
            overtime_rate: breakdown.overtime_rate,
            bonus: draft.bonus,
            deduction: draft.deduction,
            total_salary: breakdown.total,
            breakdown,
            status: PaymentStatus::Unpaid,
            updated_at,
        }
    }
}
