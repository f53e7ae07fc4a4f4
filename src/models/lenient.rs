//! Permissive readers for amounts and rates arriving as loose JSON.
//!
//! Both model output and API drafts use these, so a blank or null field
//! means the same thing wherever it comes from.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::de::{self, Deserialize, Deserializer};
use serde_json::Value;

use super::AttendanceRecord;

/// Reads a decimal from a JSON number, a numeric string or a boolean.
pub(crate) fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Decimal::from(i))
            } else if let Some(u) = n.as_u64() {
                Some(Decimal::from(u))
            } else {
                n.as_f64().and_then(Decimal::from_f64)
            }
        }
        Value::String(s) => parse_decimal(s),
        Value::Bool(b) => Some(if *b { Decimal::ONE } else { Decimal::ZERO }),
        _ => None,
    }
}

/// Parses trimmed plain or scientific decimal text.
pub(crate) fn parse_decimal(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// True for the text forms that mean "no rate given".
pub(crate) fn is_blank_rate(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || trimmed == "null"
}

/// Deserializes an amount where `null` and blank text mean zero.
///
/// Numbers and numeric strings are accepted; anything else is an error.
pub(crate) fn amount_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Decimal::ZERO),
        Value::String(s) if s.trim().is_empty() => Ok(Decimal::ZERO),
        value @ (Value::Number(_) | Value::String(_)) => decimal_from_value(&value)
            .ok_or_else(|| de::Error::custom(format!("expected an amount, got {value}"))),
        other => Err(de::Error::custom(format!("expected an amount, got {other}"))),
    }
}

/// Deserializes an optional rate where `null`, `""`, blank text and
/// `"null"` all mean "use the default rate".
pub(crate) fn optional_rate<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) if is_blank_rate(&s) => Ok(None),
        value @ (Value::Number(_) | Value::String(_)) => decimal_from_value(&value)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("expected a rate, got {value}"))),
        other => Err(de::Error::custom(format!("expected a rate, got {other}"))),
    }
}

/// Deserializes attendance where `null` means every day absent.
pub(crate) fn record_or_default<'de, D>(deserializer: D) -> Result<AttendanceRecord, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<AttendanceRecord>::deserialize(deserializer).map(Option::unwrap_or_default)
}
