//! Calculation logic for the weekly wage engine.
//!
//! This module contains attendance normalization, the weekly salary
//! calculation with its default overtime rate policy, and week boundary
//! helpers.

mod attendance;
mod salary;
mod week_start;

pub use attendance::normalize_attendance;
pub use salary::{
    AdjustmentInputs, HALF_DAY_FRACTION, HOURS_PER_DAY, compute_for_record,
    compute_weekly_salary, default_overtime_rate,
};
pub use week_start::monday_of_week;
