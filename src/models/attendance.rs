//! Attendance status and the seven-day attendance record.
//!
//! An [`AttendanceRecord`] always holds exactly one status for each day of the
//! week, Monday through Sunday. The fixed-size representation makes the
//! "all seven keys, no others" invariant a property of the type.

use std::collections::HashMap;
use std::fmt;

use chrono::Weekday;
use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// The days of the week in record order.
pub const WEEK_DAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// The wire key used for each day, in record order.
pub const DAY_KEYS: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

/// Returns the wire key (`"mon"` .. `"sun"`) for a day.
///
/// # Example
///
/// ```
/// use chrono::Weekday;
/// use weekly_wage::models::day_key;
///
/// assert_eq!(day_key(Weekday::Wed), "wed");
/// ```
pub fn day_key(day: Weekday) -> &'static str {
    DAY_KEYS[day.num_days_from_monday() as usize]
}

/// Looks up the day for a wire key. Keys are matched exactly.
pub fn day_from_key(key: &str) -> Option<Weekday> {
    DAY_KEYS
        .iter()
        .position(|k| *k == key)
        .map(|index| WEEK_DAYS[index])
}

/// Attendance for a single day.
///
/// Serializes as the single-letter code `"P"`, `"H"` or `"A"`. Deserializing
/// never fails for string input: anything that is not one of the three codes
/// becomes [`AttendanceStatus::Absent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum AttendanceStatus {
    /// Worked the full day; paid the daily rate.
    #[serde(rename = "P")]
    Present,
    /// Worked half the day; paid half the daily rate.
    #[serde(rename = "H")]
    HalfDay,
    /// Did not work; unpaid.
    #[serde(rename = "A")]
    #[default]
    Absent,
}

impl AttendanceStatus {
    /// Reads a free-form status code.
    ///
    /// Surrounding whitespace is ignored and the comparison is
    /// case-insensitive. Unrecognized codes map to `Absent`.
    ///
    /// # Example
    ///
    /// ```
    /// use weekly_wage::models::AttendanceStatus;
    ///
    /// assert_eq!(AttendanceStatus::from_code(" p "), AttendanceStatus::Present);
    /// assert_eq!(AttendanceStatus::from_code("h"), AttendanceStatus::HalfDay);
    /// assert_eq!(AttendanceStatus::from_code("present"), AttendanceStatus::Absent);
    /// ```
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_uppercase().as_str() {
            "P" => Self::Present,
            "H" => Self::HalfDay,
            _ => Self::Absent,
        }
    }

    /// Returns the single-letter code for this status.
    pub fn code(self) -> &'static str {
        match self {
            Self::Present => "P",
            Self::HalfDay => "H",
            Self::Absent => "A",
        }
    }
}

impl From<String> for AttendanceStatus {
    fn from(code: String) -> Self {
        Self::from_code(&code)
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Attendance for a full week, one status per day.
///
/// Serializes as a JSON object keyed `mon` .. `sun` in week order.
/// Deserialization is permissive: unknown keys are ignored, and missing,
/// non-string or unrecognized values become `Absent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AttendanceRecord {
    days: [AttendanceStatus; 7],
}

impl AttendanceRecord {
    /// Creates a record with the same status on every day.
    pub fn all(status: AttendanceStatus) -> Self {
        Self { days: [status; 7] }
    }

    /// Returns the status recorded for `day`.
    pub fn get(&self, day: Weekday) -> AttendanceStatus {
        self.days[day.num_days_from_monday() as usize]
    }

    /// Records `status` for `day`.
    pub fn set(&mut self, day: Weekday, status: AttendanceStatus) {
        self.days[day.num_days_from_monday() as usize] = status;
    }

    /// Iterates the week in order, Monday first.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, AttendanceStatus)> + '_ {
        WEEK_DAYS.iter().copied().zip(self.days.iter().copied())
    }

    /// Counts the days carrying `status`.
    pub fn count(&self, status: AttendanceStatus) -> usize {
        self.days.iter().filter(|s| **s == status).count()
    }

    /// Converts the record back into a key-to-code map.
    ///
    /// # Example
    ///
    /// ```
    /// use weekly_wage::models::{AttendanceRecord, AttendanceStatus};
    ///
    /// let codes = AttendanceRecord::all(AttendanceStatus::Present).to_codes();
    /// assert_eq!(codes.len(), 7);
    /// assert_eq!(codes["sun"], "P");
    /// ```
    pub fn to_codes(&self) -> HashMap<String, String> {
        self.iter()
            .map(|(day, status)| (day_key(day).to_string(), status.code().to_string()))
            .collect()
    }
}

impl Serialize for AttendanceRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(DAY_KEYS.len()))?;
        for (day, status) in self.iter() {
            map.serialize_entry(day_key(day), &status)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AttendanceRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = HashMap::<String, serde_json::Value>::deserialize(deserializer)?;
        let mut record = Self::default();
        for (key, value) in &raw {
            if let (Some(day), Some(code)) = (day_from_key(key), value.as_str()) {
                record.set(day, AttendanceStatus::from_code(code));
            }
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_accepts_case_and_whitespace() {
        assert_eq!(AttendanceStatus::from_code("P"), AttendanceStatus::Present);
        assert_eq!(AttendanceStatus::from_code("  h\t"), AttendanceStatus::HalfDay);
        assert_eq!(AttendanceStatus::from_code("a"), AttendanceStatus::Absent);
    }

    #[test]
    fn test_from_code_unknown_is_absent() {
        for code in ["", "X", "present", "half", "PP", "1"] {
            assert_eq!(AttendanceStatus::from_code(code), AttendanceStatus::Absent);
        }
    }

    #[test]
    fn test_status_serializes_as_code() {
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::HalfDay).unwrap(),
            "\"H\""
        );
        let status: AttendanceStatus = serde_json::from_str("\"p\"").unwrap();
        assert_eq!(status, AttendanceStatus::Present);
        let status: AttendanceStatus = serde_json::from_str("\"late\"").unwrap();
        assert_eq!(status, AttendanceStatus::Absent);
    }

    #[test]
    fn test_default_record_is_all_absent() {
        let record = AttendanceRecord::default();
        assert_eq!(record.count(AttendanceStatus::Absent), 7);
    }

    #[test]
    fn test_set_and_get_by_weekday() {
        let mut record = AttendanceRecord::default();
        record.set(Weekday::Wed, AttendanceStatus::HalfDay);
        assert_eq!(record.get(Weekday::Wed), AttendanceStatus::HalfDay);
        assert_eq!(record.get(Weekday::Thu), AttendanceStatus::Absent);
    }

    #[test]
    fn test_record_serializes_in_week_order() {
        let mut record = AttendanceRecord::all(AttendanceStatus::Present);
        record.set(Weekday::Sun, AttendanceStatus::Absent);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"mon":"P","tue":"P","wed":"P","thu":"P","fri":"P","sat":"P","sun":"A"}"#
        );
    }

    #[test]
    fn test_record_deserializes_permissively() {
        let json = r#"{"mon":"p","tue":" H ","wed":1,"fri":null,"holiday":"P","sun":"x"}"#;
        let record: AttendanceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.get(Weekday::Mon), AttendanceStatus::Present);
        assert_eq!(record.get(Weekday::Tue), AttendanceStatus::HalfDay);
        assert_eq!(record.get(Weekday::Wed), AttendanceStatus::Absent);
        assert_eq!(record.get(Weekday::Thu), AttendanceStatus::Absent);
        assert_eq!(record.get(Weekday::Fri), AttendanceStatus::Absent);
        assert_eq!(record.get(Weekday::Sun), AttendanceStatus::Absent);
    }

    #[test]
    fn test_day_keys_round_trip_through_lookup() {
        for day in WEEK_DAYS {
            assert_eq!(day_from_key(day_key(day)), Some(day));
        }
        assert_eq!(day_from_key("Mon"), None);
        assert_eq!(day_from_key("monday"), None);
    }
}
