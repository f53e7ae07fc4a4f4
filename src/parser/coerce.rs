//! Schema coercion for model output.
//!
//! The model returns loosely-typed JSON. [`coerce_parsed_schema`] is the one
//! place that inspects it; everything downstream works with the typed
//! [`ParsedAttendance`].

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::error::{EngineError, EngineResult};
use crate::models::lenient::{decimal_from_value, is_blank_rate};
use crate::models::{AttendanceRecord, AttendanceStatus, ParsedAttendance, WEEK_DAYS, day_key};

/// Forces a model-produced JSON object into a [`ParsedAttendance`].
///
/// - `days`: each of the seven keys must hold `"P"`, `"A"` or `"H"` (trimmed,
///   any case); anything else or a missing key gives `Absent`. A missing or
///   empty-valued `days` (`null`, `false`, `0`, `""`, `[]`) means all absent
/// - `otHours`, `bonus`, `deduction`: numbers, numeric strings and booleans
///   are accepted; anything else gives zero
/// - `otRate`: `null`, missing, `""` and `"null"` give `None`; a number or a
///   numeric string gives `Some`; anything else gives `None`
///
/// # Errors
///
/// Returns [`EngineError::ParseUnavailable`] when `days` holds some other
/// non-object value, such as `"PPPPPPA"` or `["P"]`.
///
/// # Example
///
/// ```
/// use chrono::Weekday;
/// use rust_decimal::Decimal;
/// use serde_json::json;
/// use weekly_wage::models::AttendanceStatus;
/// use weekly_wage::parser::coerce_parsed_schema;
///
/// let value = json!({
///     "days": {"mon": "p", "tue": "X"},
///     "otHours": "2.5",
///     "otRate": "null",
///     "bonus": 100,
/// });
///
/// let parsed = coerce_parsed_schema(value.as_object().unwrap())?;
/// assert_eq!(parsed.days.get(Weekday::Mon), AttendanceStatus::Present);
/// assert_eq!(parsed.days.get(Weekday::Tue), AttendanceStatus::Absent);
/// assert_eq!(parsed.overtime_hours, Decimal::new(25, 1));
/// assert_eq!(parsed.overtime_rate, None);
/// assert_eq!(parsed.bonus, Decimal::new(100, 0));
/// assert_eq!(parsed.deduction, Decimal::ZERO);
/// # Ok::<(), weekly_wage::error::EngineError>(())
/// ```
pub fn coerce_parsed_schema(object: &Map<String, Value>) -> EngineResult<ParsedAttendance> {
    Ok(ParsedAttendance {
        days: coerce_days(object.get("days"))?,
        overtime_hours: coerce_amount(object.get("otHours")),
        overtime_rate: coerce_rate(object.get("otRate")),
        bonus: coerce_amount(object.get("bonus")),
        deduction: coerce_amount(object.get("deduction")),
    })
}

/// True for the JSON values that stand for "nothing given".
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn coerce_days(value: Option<&Value>) -> EngineResult<AttendanceRecord> {
    let mut record = AttendanceRecord::default();
    let days = match value {
        Some(Value::Object(days)) => days,
        None => return Ok(record),
        Some(other) if is_empty_value(other) => return Ok(record),
        Some(other) => {
            return Err(EngineError::parse_unavailable(format!(
                "model days is not an object: {other}"
            )));
        }
    };

    for day in WEEK_DAYS {
        let status = match days.get(day_key(day)) {
            Some(Value::String(code)) => AttendanceStatus::from_code(code),
            _ => AttendanceStatus::Absent,
        };
        record.set(day, status);
    }
    Ok(record)
}

fn coerce_amount(value: Option<&Value>) -> Decimal {
    value.and_then(decimal_from_value).unwrap_or_default()
}

fn coerce_rate(value: Option<&Value>) -> Option<Decimal> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if is_blank_rate(s) => None,
        Some(other) => decimal_from_value(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use serde_json::json;
    use std::str::FromStr;

    fn coerce(value: Value) -> ParsedAttendance {
        coerce_parsed_schema(value.as_object().unwrap()).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_well_formed_object_passes_through() {
        let parsed = coerce(json!({
            "days": {"mon": "P", "tue": "P", "wed": "H", "thu": "P", "fri": "P", "sat": "P", "sun": "A"},
            "otHours": 3,
            "otRate": null,
            "bonus": 200,
            "deduction": 500
        }));

        assert_eq!(parsed.days.count(AttendanceStatus::Present), 5);
        assert_eq!(parsed.days.get(Weekday::Wed), AttendanceStatus::HalfDay);
        assert_eq!(parsed.overtime_hours, dec("3"));
        assert_eq!(parsed.overtime_rate, None);
        assert_eq!(parsed.bonus, dec("200"));
        assert_eq!(parsed.deduction, dec("500"));
    }

    #[test]
    fn test_empty_object_gives_defaults() {
        assert_eq!(coerce(json!({})), ParsedAttendance::default());
    }

    #[test]
    fn test_invalid_day_values_become_absent() {
        let parsed = coerce(json!({
            "days": {"mon": "present", "tue": 1, "wed": null, "thu": true, "fri": " h ", "extra": "P"}
        }));

        assert_eq!(parsed.days.get(Weekday::Mon), AttendanceStatus::Absent);
        assert_eq!(parsed.days.get(Weekday::Tue), AttendanceStatus::Absent);
        assert_eq!(parsed.days.get(Weekday::Wed), AttendanceStatus::Absent);
        assert_eq!(parsed.days.get(Weekday::Thu), AttendanceStatus::Absent);
        assert_eq!(parsed.days.get(Weekday::Fri), AttendanceStatus::HalfDay);
    }

    #[test]
    fn test_empty_valued_days_means_all_absent() {
        for days in [json!(null), json!(false), json!(0), json!(""), json!([])] {
            let parsed = coerce(json!({ "days": days, "bonus": 10 }));
            assert_eq!(parsed.days, AttendanceRecord::default(), "days: {days}");
            assert_eq!(parsed.bonus, dec("10"));
        }
    }

    #[test]
    fn test_non_object_days_is_unavailable() {
        for days in [json!("PPPPPPA"), json!(["P", "P"]), json!(true), json!(7)] {
            let value = json!({ "days": days, "bonus": 200 });
            let err = coerce_parsed_schema(value.as_object().unwrap()).unwrap_err();
            assert!(err.is_parse_unavailable(), "days: {days}");
        }
    }

    #[test]
    fn test_numeric_strings_and_floats_are_accepted() {
        let parsed = coerce(json!({"otHours": " 1.5 ", "bonus": 99.25, "deduction": "1e2"}));
        assert_eq!(parsed.overtime_hours, dec("1.5"));
        assert_eq!(parsed.bonus, dec("99.25"));
        assert_eq!(parsed.deduction, dec("100"));
    }

    #[test]
    fn test_unparseable_amounts_default_to_zero() {
        let parsed = coerce(json!({"otHours": "three", "bonus": null, "deduction": {"x": 1}}));
        assert_eq!(parsed.overtime_hours, Decimal::ZERO);
        assert_eq!(parsed.bonus, Decimal::ZERO);
        assert_eq!(parsed.deduction, Decimal::ZERO);
    }

    #[test]
    fn test_boolean_amounts_count_as_one_or_zero() {
        let parsed = coerce(json!({"otHours": true, "bonus": false}));
        assert_eq!(parsed.overtime_hours, Decimal::ONE);
        assert_eq!(parsed.bonus, Decimal::ZERO);
    }

    #[test]
    fn test_rate_null_forms_give_none() {
        for rate in [json!(null), json!(""), json!("null"), json!("abc"), json!([1])] {
            let parsed = coerce(json!({ "otRate": rate }));
            assert_eq!(parsed.overtime_rate, None, "rate: {rate}");
        }
    }

    #[test]
    fn test_rate_numbers_give_some() {
        assert_eq!(coerce(json!({"otRate": 90})).overtime_rate, Some(dec("90")));
        assert_eq!(coerce(json!({"otRate": "87.5"})).overtime_rate, Some(dec("87.5")));
        assert_eq!(coerce(json!({"otRate": 0})).overtime_rate, Some(Decimal::ZERO));
    }
}
