//! The typed result of parsing a free-form attendance message.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AttendanceRecord;

/// Attendance and adjustments extracted from a free-form message.
///
/// Both parsing strategies produce this shape. `otRate` is always present on
/// the wire and is `null` when the message did not name a rate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedAttendance {
    /// Attendance for each day of the week.
    pub days: AttendanceRecord,
    /// Overtime hours worked.
    #[serde(rename = "otHours")]
    pub overtime_hours: Decimal,
    /// Explicit overtime rate, if one was given.
    #[serde(rename = "otRate")]
    pub overtime_rate: Option<Decimal>,
    /// Bonus amount.
    pub bonus: Decimal,
    /// Deduction or advance amount.
    pub deduction: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_rate_serializes_as_null() {
        let value = serde_json::to_value(ParsedAttendance::default()).unwrap();
        assert!(value["otRate"].is_null());
        assert_eq!(value["otHours"], "0");
        assert_eq!(value["days"]["mon"], "A");
    }
}
