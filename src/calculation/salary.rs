//! Weekly salary calculation.
//!
//! This module turns a daily rate, a week of attendance and a set of
//! adjustments (overtime, bonus, deduction) into a [`SalaryBreakdown`].
//! The calculation is a total function: malformed attendance degrades to
//! `Absent` and missing adjustments degrade to zero, so it never fails.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{AttendanceRecord, AttendanceStatus, SalaryBreakdown};

use super::normalize_attendance;

/// Working hours in one paid day.
///
/// The default overtime rate is the daily rate spread over this many hours.
pub const HOURS_PER_DAY: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Share of the daily rate paid for a half day.
pub const HALF_DAY_FRACTION: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Adjustments applied on top of attendance pay.
///
/// All amounts default to zero and the overtime rate defaults to "not
/// supplied", which selects [`default_overtime_rate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentInputs {
    /// Overtime hours worked.
    #[serde(rename = "otHours")]
    pub overtime_hours: Decimal,
    /// Explicit overtime rate per hour.
    #[serde(rename = "otRate")]
    pub overtime_rate: Option<Decimal>,
    /// Bonus added to the week.
    pub bonus: Decimal,
    /// Deduction subtracted from the week.
    pub deduction: Decimal,
}

/// Returns the overtime rate used when none is supplied.
///
/// A day is taken to be [`HOURS_PER_DAY`] hours, so the hourly overtime rate
/// is `daily_rate / 8`. A zero daily rate gives a zero overtime rate.
///
/// # Example
///
/// ```
/// use rust_decimal::Decimal;
/// use weekly_wage::calculation::default_overtime_rate;
///
/// assert_eq!(default_overtime_rate(Decimal::new(700, 0)), Decimal::new(875, 1));
/// assert_eq!(default_overtime_rate(Decimal::ZERO), Decimal::ZERO);
/// ```
pub fn default_overtime_rate(daily_rate: Decimal) -> Decimal {
    if daily_rate.is_zero() {
        Decimal::ZERO
    } else {
        daily_rate / HOURS_PER_DAY
    }
}

/// Computes the weekly salary from raw attendance input.
///
/// # Arguments
///
/// * `daily_rate` - Wage for a full present day; pass zero when unknown
/// * `attendance` - Map of day key (`mon` .. `sun`) to a status string;
///   normalized with [`normalize_attendance`]
/// * `adjustments` - Overtime hours and rate, bonus and deduction
///
/// # Calculation
///
/// - `base = present * rate + half * 0.5 * rate`
/// - `overtime = overtime_hours * effective_rate`, where the effective rate is
///   the supplied rate or [`default_overtime_rate`]
/// - `total = max(0, base + overtime + bonus - deduction)`
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use rust_decimal::Decimal;
/// use weekly_wage::calculation::{compute_weekly_salary, AdjustmentInputs};
///
/// let days: HashMap<String, String> = [
///     ("mon", "P"), ("tue", "P"), ("wed", "H"), ("thu", "P"),
///     ("fri", "P"), ("sat", "P"), ("sun", "A"),
/// ]
/// .into_iter()
/// .map(|(k, v)| (k.to_string(), v.to_string()))
/// .collect();
///
/// let adjustments = AdjustmentInputs {
///     overtime_hours: Decimal::new(3, 0),
///     bonus: Decimal::new(200, 0),
///     ..Default::default()
/// };
///
/// let breakdown = compute_weekly_salary(Decimal::new(700, 0), &days, &adjustments);
/// assert_eq!(breakdown.present_days, 5);
/// assert_eq!(breakdown.half_days, 1);
/// assert_eq!(breakdown.base_pay, Decimal::new(3850, 0));
/// assert_eq!(breakdown.overtime_pay, Decimal::new(2625, 1));
/// assert_eq!(breakdown.total, Decimal::new(43125, 1));
/// ```
pub fn compute_weekly_salary<S: AsRef<str>>(
    daily_rate: Decimal,
    attendance: &HashMap<String, S>,
    adjustments: &AdjustmentInputs,
) -> SalaryBreakdown {
    compute_for_record(daily_rate, normalize_attendance(attendance), adjustments)
}

/// Computes the weekly salary from an already normalized record.
///
/// Arithmetic saturates instead of overflowing, so extreme inputs still
/// produce a breakdown.
pub fn compute_for_record(
    daily_rate: Decimal,
    days: AttendanceRecord,
    adjustments: &AdjustmentInputs,
) -> SalaryBreakdown {
    let present_days = days.count(AttendanceStatus::Present) as u32;
    let half_days = days.count(AttendanceStatus::HalfDay) as u32;

    let overtime_rate = adjustments
        .overtime_rate
        .unwrap_or_else(|| default_overtime_rate(daily_rate));

    let full_day_pay = Decimal::from(present_days).saturating_mul(daily_rate);
    let half_day_pay = Decimal::from(half_days)
        .saturating_mul(HALF_DAY_FRACTION)
        .saturating_mul(daily_rate);
    let base_pay = full_day_pay.saturating_add(half_day_pay);
    let overtime_pay = adjustments.overtime_hours.saturating_mul(overtime_rate);

    let total = base_pay
        .saturating_add(overtime_pay)
        .saturating_add(adjustments.bonus)
        .saturating_sub(adjustments.deduction)
        .max(Decimal::ZERO);

    debug!(
        daily_rate = %daily_rate,
        present_days,
        half_days,
        overtime_rate = %overtime_rate,
        total = %total,
        "Computed weekly salary"
    );

    SalaryBreakdown {
        days,
        present_days,
        half_days,
        base_pay,
        overtime_pay,
        overtime_rate,
        bonus: adjustments.bonus,
        deduction: adjustments.deduction,
        total,
    }
}
