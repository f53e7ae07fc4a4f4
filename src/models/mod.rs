//! Core data models for the weekly wage engine.
//!
//! This module contains the domain models used throughout the engine:
//! attendance, workers, drafts, salary breakdowns and saved week records.

mod attendance;
mod draft;
pub(crate) mod lenient;
mod parsed_attendance;
mod salary_breakdown;
mod week_record;
mod worker;

pub use attendance::{
    AttendanceRecord, AttendanceStatus, DAY_KEYS, WEEK_DAYS, day_from_key, day_key,
};
pub use draft::AttendanceDraft;
pub use parsed_attendance::ParsedAttendance;
pub use salary_breakdown::SalaryBreakdown;
pub use week_record::{PaymentStatus, UnknownPaymentStatus, WeekRecord};
pub use worker::Worker;
