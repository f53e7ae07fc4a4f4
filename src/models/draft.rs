//! Caller-owned attendance draft.
//!
//! An [`AttendanceDraft`] holds the unsaved attendance entry for one
//! worker-week. It is an ordinary value: the caller keeps it, mutates it, and
//! passes it to the calculator whenever a preview is needed.

use chrono::Weekday;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{AdjustmentInputs, compute_for_record};
use crate::error::{EngineError, EngineResult};

use super::lenient::{amount_or_zero, optional_rate, record_or_default};
use super::{AttendanceRecord, AttendanceStatus, ParsedAttendance, SalaryBreakdown};

/// The editable fields of a week entry.
///
/// Deserialization is forgiving: `null` amounts read as zero, a `null` or
/// blank `otRate` means the default rate, and `null` days mean all absent.
///
/// # Example
///
/// ```
/// use chrono::Weekday;
/// use rust_decimal::Decimal;
/// use weekly_wage::models::{AttendanceDraft, AttendanceStatus};
///
/// let mut draft = AttendanceDraft::default();
/// draft.set_day(Weekday::Mon, AttendanceStatus::Present);
/// draft.set_day(Weekday::Tue, AttendanceStatus::HalfDay);
///
/// let breakdown = draft.compute(Decimal::new(600, 0));
/// assert_eq!(breakdown.total, Decimal::new(900, 0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttendanceDraft {
    /// Attendance for the week.
    #[serde(deserialize_with = "record_or_default")]
    pub days: AttendanceRecord,
    /// Overtime hours.
    #[serde(rename = "otHours", deserialize_with = "amount_or_zero")]
    pub overtime_hours: Decimal,
    /// Overtime rate override; `None` uses the default rate.
    #[serde(rename = "otRate", deserialize_with = "optional_rate")]
    pub overtime_rate: Option<Decimal>,
    /// Bonus amount.
    #[serde(deserialize_with = "amount_or_zero")]
    pub bonus: Decimal,
    /// Deduction or advance amount.
    #[serde(deserialize_with = "amount_or_zero")]
    pub deduction: Decimal,
}

impl AttendanceDraft {
    /// Sets the attendance for one day.
    pub fn set_day(&mut self, day: Weekday, status: AttendanceStatus) {
        self.days.set(day, status);
    }

    /// Replaces the draft contents with a parsed message.
    ///
    /// A parsed result always covers all seven days, so every day and every
    /// adjustment field is overwritten.
    pub fn apply_parsed(&mut self, parsed: ParsedAttendance) {
        self.days = parsed.days;
        self.overtime_hours = parsed.overtime_hours;
        self.overtime_rate = parsed.overtime_rate;
        self.bonus = parsed.bonus;
        self.deduction = parsed.deduction;
    }

    /// Returns the adjustment fields in calculator form.
    pub fn adjustments(&self) -> AdjustmentInputs {
        AdjustmentInputs {
            overtime_hours: self.overtime_hours,
            overtime_rate: self.overtime_rate,
            bonus: self.bonus,
            deduction: self.deduction,
        }
    }

    /// Checks that overtime hours, overtime rate, bonus and deduction are not
    /// negative.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRequest`] naming the first negative field.
    pub fn validate(&self) -> EngineResult<()> {
        let fields = [
            ("otHours", Some(self.overtime_hours)),
            ("otRate", self.overtime_rate),
            ("bonus", Some(self.bonus)),
            ("deduction", Some(self.deduction)),
        ];
        for (field, value) in fields {
            if let Some(value) = value.filter(|v| *v < Decimal::ZERO) {
                return Err(EngineError::InvalidRequest {
                    message: format!("{} must not be negative, got {}", field, value),
                });
            }
        }
        Ok(())
    }

    /// Computes the salary breakdown for this draft at `daily_rate`.
    pub fn compute(&self, daily_rate: Decimal) -> SalaryBreakdown {
        compute_for_record(daily_rate, self.days, &self.adjustments())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed_week() -> ParsedAttendance {
        let mut days = AttendanceRecord::all(AttendanceStatus::Present);
        days.set(Weekday::Sun, AttendanceStatus::Absent);
        ParsedAttendance {
            days,
            overtime_hours: Decimal::new(3, 0),
            overtime_rate: Some(Decimal::new(90, 0)),
            bonus: Decimal::new(200, 0),
            deduction: Decimal::new(500, 0),
        }
    }

    #[test]
    fn test_apply_parsed_overwrites_every_field() {
        let mut draft = AttendanceDraft {
            days: AttendanceRecord::all(AttendanceStatus::HalfDay),
            overtime_hours: Decimal::new(9, 0),
            overtime_rate: None,
            bonus: Decimal::new(1, 0),
            deduction: Decimal::new(1, 0),
        };

        draft.apply_parsed(parsed_week());

        assert_eq!(draft.days.get(Weekday::Mon), AttendanceStatus::Present);
        assert_eq!(draft.days.get(Weekday::Sun), AttendanceStatus::Absent);
        assert_eq!(draft.overtime_hours, Decimal::new(3, 0));
        assert_eq!(draft.overtime_rate, Some(Decimal::new(90, 0)));
        assert_eq!(draft.bonus, Decimal::new(200, 0));
        assert_eq!(draft.deduction, Decimal::new(500, 0));
    }

    #[test]
    fn test_compute_uses_draft_rate_override() {
        let mut draft = AttendanceDraft::default();
        draft.apply_parsed(parsed_week());

        let breakdown = draft.compute(Decimal::new(700, 0));

        // 6 * 700 + 3 * 90 + 200 - 500
        assert_eq!(breakdown.overtime_rate, Decimal::new(90, 0));
        assert_eq!(breakdown.total, Decimal::new(4170, 0));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let draft: AttendanceDraft =
            serde_json::from_str(r#"{"days": {"mon": "P"}, "otHours": 2}"#).unwrap();
        assert_eq!(draft.days.get(Weekday::Mon), AttendanceStatus::Present);
        assert_eq!(draft.days.get(Weekday::Tue), AttendanceStatus::Absent);
        assert_eq!(draft.overtime_hours, Decimal::new(2, 0));
        assert_eq!(draft.overtime_rate, None);
        assert_eq!(draft.bonus, Decimal::ZERO);
    }

    #[test]
    fn test_null_fields_read_as_defaults() {
        let draft: AttendanceDraft = serde_json::from_str(
            r#"{"days": null, "otHours": null, "otRate": null, "bonus": null, "deduction": null}"#,
        )
        .unwrap();
        assert_eq!(draft, AttendanceDraft::default());
    }

    #[test]
    fn test_blank_rate_means_default_rate() {
        for rate in [r#""""#, r#""   ""#, r#""null""#] {
            let json = format!(r#"{{"otRate": {rate}, "otHours": "2"}}"#);
            let draft: AttendanceDraft = serde_json::from_str(&json).unwrap();
            assert_eq!(draft.overtime_rate, None, "rate: {rate}");
            assert_eq!(draft.compute(Decimal::new(800, 0)).overtime_rate, Decimal::new(100, 0));
        }
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let draft: AttendanceDraft =
            serde_json::from_str(r#"{"otRate": " 90.5 ", "bonus": "", "deduction": "250"}"#)
                .unwrap();
        assert_eq!(draft.overtime_rate, Some(Decimal::new(905, 1)));
        assert_eq!(draft.bonus, Decimal::ZERO);
        assert_eq!(draft.deduction, Decimal::new(250, 0));
    }

    #[test]
    fn test_non_numeric_amount_is_rejected() {
        let result = serde_json::from_str::<AttendanceDraft>(r#"{"bonus": "lots"}"#);
        assert!(result.is_err());
        let result = serde_json::from_str::<AttendanceDraft>(r#"{"otRate": [90]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_negative_adjustments() {
        let negative = Decimal::new(-5, 0);
        let cases: [(&str, AttendanceDraft); 4] = [
            ("otHours", AttendanceDraft { overtime_hours: negative, ..Default::default() }),
            ("otRate", AttendanceDraft { overtime_rate: Some(negative), ..Default::default() }),
            ("bonus", AttendanceDraft { bonus: negative, ..Default::default() }),
            ("deduction", AttendanceDraft { deduction: negative, ..Default::default() }),
        ];

        for (field, draft) in cases {
            match draft.validate() {
                Err(EngineError::InvalidRequest { message }) => {
                    assert!(message.starts_with(field), "{message}");
                }
                other => panic!("Expected InvalidRequest for {field}, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_validate_accepts_zero_and_positive_values() {
        let mut draft = AttendanceDraft::default();
        assert!(draft.validate().is_ok());
        draft.apply_parsed(parsed_week());
        assert!(draft.validate().is_ok());
    }
}
