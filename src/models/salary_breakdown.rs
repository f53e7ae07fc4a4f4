//! Salary breakdown produced by the weekly salary calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AttendanceRecord;

/// The itemized result of a weekly salary calculation.
///
/// A breakdown is derived entirely from the calculation inputs; computing it
/// twice from the same inputs yields equal values. Field names on the wire
/// follow the stored breakdown format (`base`, `overtime`, `otRate`, ...).
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use rust_decimal::Decimal;
/// use weekly_wage::calculation::{compute_weekly_salary, AdjustmentInputs};
///
/// let days: HashMap<String, String> = HashMap::new();
/// let breakdown = compute_weekly_salary(Decimal::new(700, 0), &days, &AdjustmentInputs::default());
/// assert_eq!(breakdown.total, Decimal::ZERO);
/// assert_eq!(breakdown.overtime_rate, Decimal::new(875, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryBreakdown {
    /// The normalized attendance the pay was computed from.
    pub days: AttendanceRecord,
    /// Number of full days present.
    pub present_days: u32,
    /// Number of half days.
    pub half_days: u32,
    /// Pay for present and half days.
    #[serde(rename = "base")]
    pub base_pay: Decimal,
    /// Pay for overtime hours.
    #[serde(rename = "overtime")]
    pub overtime_pay: Decimal,
    /// The overtime rate actually applied (supplied or defaulted).
    #[serde(rename = "otRate")]
    pub overtime_rate: Decimal,
    /// Bonus added to the week.
    pub bonus: Decimal,
    /// Deduction (advance, fine) subtracted from the week.
    pub deduction: Decimal,
    /// Amount payable, never negative.
    pub total: Decimal,
}
