//! Deterministic attendance parser.
//!
//! Pattern rules over the lowercased message. The rules run in a fixed order
//! and each match overwrites what earlier rules set:
//!
//! 1. every day starts `Absent`
//! 2. range rules: "mon ... to ... sat ... present" marks Monday to Saturday
//!    present, then "mon ... to ... sun ... present" marks the whole week
//! 3. per-day rules, for each day and each of its tokens (`mon`, `monday`):
//!    `half`, then `absent`, then `present`
//! 4. amounts, first match per pattern: `ot N`, `advance|deduction|fine N`,
//!    `bonus N`, `ot rate N`
//!
//! The rule order is significant and must not be collapsed into a single
//! combined pattern.

use std::str::FromStr;
use std::sync::LazyLock;

use chrono::Weekday;
use regex::Regex;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::models::{AttendanceRecord, AttendanceStatus, ParsedAttendance, WEEK_DAYS};

/// A pattern and the attendance it assigns when the pattern matches.
struct AttendanceRule {
    pattern: Regex,
    days: Vec<Weekday>,
    status: AttendanceStatus,
}

impl AttendanceRule {
    fn new(pattern: &str, days: &[Weekday], status: AttendanceStatus) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("invalid attendance rule pattern"),
            days: days.to_vec(),
            status,
        }
    }

    fn apply(&self, text: &str, record: &mut AttendanceRecord) {
        if self.pattern.is_match(text) {
            for day in &self.days {
                record.set(*day, self.status);
            }
        }
    }
}

/// Short and full tokens for each day, in week order.
const DAY_TOKENS: [(Weekday, [&str; 2]); 7] = [
    (Weekday::Mon, ["mon", "monday"]),
    (Weekday::Tue, ["tue", "tuesday"]),
    (Weekday::Wed, ["wed", "wednesday"]),
    (Weekday::Thu, ["thu", "thursday"]),
    (Weekday::Fri, ["fri", "friday"]),
    (Weekday::Sat, ["sat", "saturday"]),
    (Weekday::Sun, ["sun", "sunday"]),
];

/// Per-day keywords in the order they are checked. Later matches win.
const DAY_KEYWORDS: [(&str, AttendanceStatus); 3] = [
    ("half", AttendanceStatus::HalfDay),
    ("absent", AttendanceStatus::Absent),
    ("present", AttendanceStatus::Present),
];

static ATTENDANCE_RULES: LazyLock<Vec<AttendanceRule>> = LazyLock::new(|| {
    let mut rules = vec![
        AttendanceRule::new(
            r"(mon|monday).*(to|-).*(sat|saturday).*(present|p)",
            &WEEK_DAYS[..6],
            AttendanceStatus::Present,
        ),
        AttendanceRule::new(
            r"(mon|monday).*(to|-).*(sun|sunday).*(present|p)",
            &WEEK_DAYS,
            AttendanceStatus::Present,
        ),
    ];

    for (day, tokens) in DAY_TOKENS {
        for token in tokens {
            for (keyword, status) in DAY_KEYWORDS {
                rules.push(AttendanceRule::new(
                    &format!("{token}.*{keyword}"),
                    &[day],
                    status,
                ));
            }
        }
    }

    rules
});

const AMOUNT: &str = r"([0-9]+(\.[0-9]+)?)";

static OVERTIME_HOURS: LazyLock<Regex> = LazyLock::new(|| amount_pattern(r"ot\s*"));
static DEDUCTION: LazyLock<Regex> =
    LazyLock::new(|| amount_pattern(r"(?:advance|deduction|fine)\s*"));
static BONUS: LazyLock<Regex> = LazyLock::new(|| amount_pattern(r"bonus\s*"));
static OVERTIME_RATE: LazyLock<Regex> = LazyLock::new(|| amount_pattern(r"ot\s*rate\s*"));

fn amount_pattern(prefix: &str) -> Regex {
    Regex::new(&format!("{prefix}{AMOUNT}")).expect("invalid amount pattern")
}

/// Returns the amount captured by the first match of `pattern`, if any.
///
/// A captured number too large for a decimal is logged and treated as no
/// match.
fn first_amount(pattern: &Regex, text: &str) -> Option<Decimal> {
    let captured = pattern.captures(text)?.get(1)?.as_str();
    match Decimal::from_str(captured) {
        Ok(amount) => Some(amount),
        Err(e) => {
            warn!(amount = captured, error = %e, "Dropped amount that does not fit a decimal");
            None
        }
    }
}

/// Parses a free-form attendance message without any external help.
///
/// This never fails: a message with nothing recognizable yields all days
/// `Absent`, zero amounts and no overtime rate.
///
/// The `ot N` and `ot rate N` searches are independent, so a message such as
/// "ot rate 50" matches only the rate search (the hours search needs a digit
/// straight after `ot`), while "ot 2 ot rate 50" sets both. Neither search is
/// suppressed when the other matches.
///
/// # Example
///
/// ```
/// use chrono::Weekday;
/// use rust_decimal::Decimal;
/// use weekly_wage::models::AttendanceStatus;
/// use weekly_wage::parser::parse_attendance_deterministic;
///
/// let parsed = parse_attendance_deterministic(
///     "Mon to Sat present, Wed half day, OT 3 hours, advance 500, bonus 200",
/// );
///
/// assert_eq!(parsed.days.get(Weekday::Mon), AttendanceStatus::Present);
/// assert_eq!(parsed.days.get(Weekday::Wed), AttendanceStatus::HalfDay);
/// assert_eq!(parsed.days.get(Weekday::Sun), AttendanceStatus::Absent);
/// assert_eq!(parsed.overtime_hours, Decimal::new(3, 0));
/// assert_eq!(parsed.deduction, Decimal::new(500, 0));
/// assert_eq!(parsed.bonus, Decimal::new(200, 0));
/// assert_eq!(parsed.overtime_rate, None);
/// ```
pub fn parse_attendance_deterministic(message: &str) -> ParsedAttendance {
    let text = message.to_lowercase();

    let mut days = AttendanceRecord::all(AttendanceStatus::Absent);
    for rule in ATTENDANCE_RULES.iter() {
        rule.apply(&text, &mut days);
    }

    let parsed = ParsedAttendance {
        days,
        overtime_hours: first_amount(&OVERTIME_HOURS, &text).unwrap_or_default(),
        overtime_rate: first_amount(&OVERTIME_RATE, &text),
        bonus: first_amount(&BONUS, &text).unwrap_or_default(),
        deduction: first_amount(&DEDUCTION, &text).unwrap_or_default(),
    };

    debug!(
        present = parsed.days.count(AttendanceStatus::Present),
        half = parsed.days.count(AttendanceStatus::HalfDay),
        "Parsed attendance with deterministic rules"
    );

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn codes(record: &AttendanceRecord) -> String {
        record.iter().map(|(_, s)| s.code()).collect()
    }

    #[test]
    fn test_documented_example_message() {
        let parsed = parse_attendance_deterministic(
            "Mon to Sat present, Wed half day, OT 3 hours, advance 500, bonus 200",
        );

        assert_eq!(codes(&parsed.days), "PPHPPPA");
        assert_eq!(parsed.overtime_hours, dec("3.0"));
        assert_eq!(parsed.deduction, dec("500.0"));
        assert_eq!(parsed.bonus, dec("200.0"));
        assert_eq!(parsed.overtime_rate, None);
    }

    #[test]
    fn test_empty_message_defaults_everything() {
        let parsed = parse_attendance_deterministic("");
        assert_eq!(parsed, ParsedAttendance::default());
    }

    #[test]
    fn test_unrecognized_message_defaults_everything() {
        let parsed = parse_attendance_deterministic("nothing useful here!");
        assert_eq!(codes(&parsed.days), "AAAAAAA");
        assert_eq!(parsed.overtime_hours, Decimal::ZERO);
        assert_eq!(parsed.overtime_rate, None);
    }

    #[test]
    fn test_monday_to_sunday_range_marks_whole_week() {
        let parsed = parse_attendance_deterministic("Monday to Sunday present");
        assert_eq!(codes(&parsed.days), "PPPPPPP");
    }

    #[test]
    fn test_hyphen_range_is_recognized() {
        let parsed = parse_attendance_deterministic("mon-sat p");
        assert_eq!(codes(&parsed.days), "PPPPPPA");
    }

    #[test]
    fn test_per_day_absent_overrides_range() {
        let parsed = parse_attendance_deterministic("mon to sat present. thu absent");
        // "thu.*present" does not match (present appears before thu), so absent stands.
        assert_eq!(codes(&parsed.days), "PPPAPPA");
    }

    #[test]
    fn test_present_check_runs_after_half_and_absent() {
        // "fri" is followed by half, absent and present: present is checked last.
        let parsed = parse_attendance_deterministic("fri half? no, absent... actually present");
        assert_eq!(parsed.days.get(Weekday::Fri), AttendanceStatus::Present);
    }

    #[test]
    fn test_absent_check_runs_after_half() {
        let parsed =
            parse_attendance_deterministic("mon to sat present, tuesday half, no wait absent");
        assert_eq!(parsed.days.get(Weekday::Tue), AttendanceStatus::Absent);
        assert_eq!(parsed.days.get(Weekday::Mon), AttendanceStatus::Present);
    }

    #[test]
    fn test_keyword_must_follow_day_token() {
        let parsed = parse_attendance_deterministic("half day on wed");
        assert_eq!(parsed.days.get(Weekday::Wed), AttendanceStatus::Absent);
    }

    #[test]
    fn test_decimal_amounts_are_captured() {
        let parsed = parse_attendance_deterministic("ot 2.5 bonus 150.75 fine 20");
        assert_eq!(parsed.overtime_hours, dec("2.5"));
        assert_eq!(parsed.bonus, dec("150.75"));
        assert_eq!(parsed.deduction, dec("20"));
    }

    #[test]
    fn test_first_match_wins_for_amounts() {
        let parsed = parse_attendance_deterministic("bonus 100 and later bonus 300");
        assert_eq!(parsed.bonus, dec("100"));
    }

    #[test]
    fn test_deduction_keywords() {
        for message in ["advance 400", "deduction 400", "Fine 400"] {
            let parsed = parse_attendance_deterministic(message);
            assert_eq!(parsed.deduction, dec("400"), "message: {message}");
        }
    }

    #[test]
    fn test_ot_rate_alone_sets_only_rate() {
        let parsed = parse_attendance_deterministic("ot rate 50");
        assert_eq!(parsed.overtime_rate, Some(dec("50")));
        assert_eq!(parsed.overtime_hours, Decimal::ZERO);
    }

    #[test]
    fn test_ot_hours_and_rate_are_independent_searches() {
        let parsed = parse_attendance_deterministic("OT 4 hrs, OT rate 95");
        assert_eq!(parsed.overtime_hours, dec("4"));
        assert_eq!(parsed.overtime_rate, Some(dec("95")));
    }

    #[test]
    fn test_ot_without_space_is_captured() {
        let parsed = parse_attendance_deterministic("ot3");
        assert_eq!(parsed.overtime_hours, dec("3"));
    }

    #[test]
    fn test_oversized_amount_is_dropped_and_others_kept() {
        let parsed = parse_attendance_deterministic(
            "mon present, bonus 99999999999999999999999999999999999, advance 300, ot 2",
        );
        assert_eq!(parsed.bonus, Decimal::ZERO);
        assert_eq!(parsed.deduction, dec("300"));
        assert_eq!(parsed.overtime_hours, dec("2"));
        assert_eq!(parsed.days.get(Weekday::Mon), AttendanceStatus::Present);
    }

    #[test]
    fn test_rules_are_built_in_fixed_order() {
        // two range rules, then 7 days * 2 tokens * 3 keywords
        assert_eq!(ATTENDANCE_RULES.len(), 2 + 7 * 2 * 3);
        assert_eq!(ATTENDANCE_RULES[2].pattern.as_str(), "mon.*half");
        assert_eq!(ATTENDANCE_RULES[4].pattern.as_str(), "mon.*present");
        assert_eq!(ATTENDANCE_RULES[5].pattern.as_str(), "monday.*half");
    }

    proptest! {
        #[test]
        fn prop_never_panics_on_any_input(message in ".*") {
            let parsed = parse_attendance_deterministic(&message);
            prop_assert!(parsed.overtime_hours >= Decimal::ZERO);
            prop_assert!(parsed.bonus >= Decimal::ZERO);
            prop_assert!(parsed.deduction >= Decimal::ZERO);
        }
    }
}
