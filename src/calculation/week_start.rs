//! Week boundary helpers.

use chrono::{Datelike, Duration, NaiveDate};

/// Returns the Monday on or before `date`.
///
/// Week records are keyed by their start date; this gives the default start
/// for the week containing a given day.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use weekly_wage::calculation::monday_of_week;
///
/// // 2026-01-15 is a Thursday
/// let thursday = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// assert_eq!(monday_of_week(thursday), NaiveDate::from_ymd_opt(2026, 1, 12).unwrap());
/// ```
pub fn monday_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_monday_maps_to_itself() {
        assert_eq!(monday_of_week(date(2026, 1, 12)), date(2026, 1, 12));
    }

    #[test]
    fn test_sunday_maps_to_previous_monday() {
        assert_eq!(monday_of_week(date(2026, 1, 18)), date(2026, 1, 12));
    }

    #[test]
    fn test_week_crossing_year_boundary() {
        // 2026-01-01 is a Thursday
        assert_eq!(monday_of_week(date(2026, 1, 1)), date(2025, 12, 29));
    }
}
