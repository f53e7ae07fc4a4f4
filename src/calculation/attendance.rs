//! Attendance normalization.
//!
//! Turns a loosely-typed map of day key to status string into a complete
//! [`AttendanceRecord`].

use std::collections::HashMap;

use crate::models::{AttendanceRecord, AttendanceStatus, WEEK_DAYS, day_key};

/// Normalizes raw attendance input into a seven-day record.
///
/// For each of the keys `mon` .. `sun`, the value is trimmed and compared
/// case-insensitively against `P`, `H` and `A`. Missing keys and any other
/// value become [`AttendanceStatus::Absent`]; keys outside the week are
/// ignored. The function never fails.
///
/// Normalizing an already normalized record (via
/// [`AttendanceRecord::to_codes`]) returns the same record.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use chrono::Weekday;
/// use weekly_wage::calculation::normalize_attendance;
/// use weekly_wage::models::AttendanceStatus;
///
/// let input = HashMap::from([
///     ("mon".to_string(), " p ".to_string()),
///     ("tue".to_string(), "H".to_string()),
///     ("wed".to_string(), "late".to_string()),
/// ]);
///
/// let record = normalize_attendance(&input);
/// assert_eq!(record.get(Weekday::Mon), AttendanceStatus::Present);
/// assert_eq!(record.get(Weekday::Tue), AttendanceStatus::HalfDay);
/// assert_eq!(record.get(Weekday::Wed), AttendanceStatus::Absent);
/// assert_eq!(record.get(Weekday::Sun), AttendanceStatus::Absent);
/// ```
pub fn normalize_attendance<S: AsRef<str>>(input: &HashMap<String, S>) -> AttendanceRecord {
    let mut record = AttendanceRecord::default();
    for day in WEEK_DAYS {
        let status = input
            .get(day_key(day))
            .map(|value| AttendanceStatus::from_code(value.as_ref()))
            .unwrap_or_default();
        record.set(day, status);
    }
    record
}
