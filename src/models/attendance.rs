//! Attendance output models.
//!
//! This module contains the [`Attendance`] row produced per employee per day,
//! the derived [`AttendanceStatus`], and the [`HourMinute`] hours:minutes
//! encoding used for working-hour, late, and overtime quantities.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The derived status of one employee-day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Present and no other rule fired.
    Present,
    /// No attendance recorded (or leave window violated).
    NotPresent,
    /// Arrived past tolerance with an approved late permit.
    Late,
    /// Left early with an approved early-out permit.
    EarlyOut,
    /// Left early with an approved out permit.
    Out,
    /// On approved leave.
    Leave,
    /// Company holiday.
    Holiday,
    /// Scheduled day off.
    OffSchedule,
}

/// An hours:minutes quantity, hours taken modulo 24.
///
/// This is the compact encoding attendance rows use for normal/working
/// hours, lateness, and overtime durations.
///
/// # Example
///
/// ```
/// use attendance_engine::models::HourMinute;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let encoded = HourMinute::from_hours(Decimal::from_str("8.5").unwrap());
/// assert_eq!(encoded, HourMinute::new(8, 30));
/// assert_eq!(encoded.to_string(), "08:30");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourMinute {
    /// Hours component, 0..24.
    pub hour: u32,
    /// Minutes component, 0..60.
    pub minute: u32,
}

impl HourMinute {
    /// A zero duration.
    pub const ZERO: HourMinute = HourMinute { hour: 0, minute: 0 };

    /// Builds an encoding, normalizing carry and wrapping hours modulo 24.
    pub fn new(hour: u32, minute: u32) -> Self {
        let carried = hour + minute / 60;
        HourMinute {
            hour: carried % 24,
            minute: minute % 60,
        }
    }

    /// Encodes a fractional-hour quantity.
    ///
    /// Whole hours are floored, the fraction rounds to minutes, minute
    /// sixty carries into the hour, and hours wrap modulo 24. Negative
    /// inputs clamp to zero.
    pub fn from_hours(hours: Decimal) -> Self {
        if hours <= Decimal::ZERO {
            return HourMinute::ZERO;
        }
        let whole = hours.floor();
        let minutes = ((hours - whole) * Decimal::new(60, 0)).round();
        let hour = whole.to_u32().unwrap_or(0);
        let minute = minutes.to_u32().unwrap_or(0);
        HourMinute::new(hour, minute)
    }

    /// Encodes a minute count.
    pub fn from_minutes(minutes: i64) -> Self {
        if minutes <= 0 {
            return HourMinute::ZERO;
        }
        let minutes = minutes as u32;
        HourMinute::new(minutes / 60, minutes % 60)
    }

    /// The encoded quantity as total minutes.
    pub fn total_minutes(&self) -> u32 {
        self.hour * 60 + self.minute
    }
}

impl std::fmt::Display for HourMinute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// One calculated attendance row for an (employee, date) pair.
///
/// Rows carry a denormalized identity/org snapshot so downstream reporting
/// needs no joins. Lifecycle is full-replace: recalculating a day deletes
/// any prior row for the pair before inserting the new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendance {
    /// The employee the row belongs to.
    pub employee_key: String,
    /// Snapshot: employee full name.
    pub full_name: String,
    /// Snapshot: company key.
    pub company_key: String,
    /// Snapshot: organizational unit.
    pub organization_unit: String,
    /// Snapshot: position.
    pub position: String,
    /// Snapshot: title.
    pub title: String,
    /// The calendar day the row covers.
    pub date: NaiveDate,
    /// The resolved shift label for the day.
    pub shift_name: String,
    /// The authoritative check-in time, if any was recorded.
    pub time_in: Option<NaiveTime>,
    /// The authoritative check-out time, if any was recorded.
    pub time_out: Option<NaiveTime>,
    /// Scheduled in-time plus late tolerance, for late-detail reporting.
    pub shift_in_time: Option<NaiveTime>,
    /// Scheduled hours for the day's pattern.
    pub normal_hour: HourMinute,
    /// Scheduled hours minus lateness deduction.
    pub working_hour: HourMinute,
    /// Total lateness past the scheduled in-time, if any.
    pub total_late: Option<HourMinute>,
    /// Actual overtime duration from an approved letter, if any.
    pub overtime: Option<HourMinute>,
    /// Tier-multiplied overtime duration, if any.
    pub accumulative_overtime: Option<HourMinute>,
    /// The derived day status.
    pub status: AttendanceStatus,
    /// Compact per-day attendance code.
    pub attendance_code: String,
    /// Concatenated notes from every contributing condition.
    pub description: String,
    /// Whether the check-in or check-out came from the mobile app.
    pub is_mobile_app: bool,
    /// GPS latitude from the app event, when the app supplied a value.
    pub latitude: Option<f64>,
    /// GPS longitude from the app event, when the app supplied a value.
    pub longitude: Option<f64>,
    /// Whether the check-in or check-out came from a biometric device.
    pub is_finger_print_machine: bool,
    /// Whether an approved late permit covered the day.
    pub is_late_permit: bool,
    /// Whether an approved leave submission covered the day.
    pub is_leave: bool,
    /// Whether an approved early-out permit covered the day.
    pub is_early_out_permit: bool,
    /// Whether an approved out permit covered the day.
    pub is_out_permit: bool,
    /// Whether an approved overtime letter covered the day.
    pub is_overtime_letter: bool,
    /// Whether the day is an unexcused absence.
    pub is_alpha: bool,
    /// 1 when `is_alpha`, 0 otherwise.
    pub count_alpha: u32,
}
