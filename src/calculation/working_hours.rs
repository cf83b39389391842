//! Scheduled and working hour calculation.
//!
//! Scheduled ("normal") hours for a day sum the spans of the day's non-break
//! work patterns, handling cross-midnight shifts and break-cut deduction.
//! Working hours reduce the scheduled hours by unexcused *and* excused
//! lateness alike: an approved late permit suppresses the `Late` status but
//! never restores deducted hours.

use chrono::NaiveTime;
use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{Day, Shift, WorkType};

/// Calculates scheduled hours for one day of a shift.
///
/// Sums `(out - in)` as fractional hours over every work-type detail mapped
/// to `day`. Cross-midnight patterns (`is_next_day`) have 24 hours added to
/// the out time before subtracting. A detail with `is_cut_break` has the
/// summed duration of the day's break-type details deducted from its own
/// span.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::scheduled_hours_for_day;
/// use attendance_engine::models::{Day, Shift, ShiftDetail, WorkType};
/// use rust_decimal::Decimal;
///
/// let shift = Shift {
///     key: "shift_01".to_string(),
///     company_key: "comp_01".to_string(),
///     name: "General".to_string(),
///     details: vec![ShiftDetail {
///         key: "sd_mon".to_string(),
///         day: Day::Monday,
///         work_name: "PAGI".to_string(),
///         work_type: WorkType::Work,
///         time_in: "08:00".to_string(),
///         time_out: "17:00".to_string(),
///         late_tolerance_minutes: 10,
///         is_next_day: false,
///         is_cut_break: false,
///     }],
/// };
///
/// let hours = scheduled_hours_for_day(&shift, Day::Monday).unwrap();
/// assert_eq!(hours, Decimal::new(90, 1)); // 9.0
/// ```
pub fn scheduled_hours_for_day(shift: &Shift, day: Day) -> EngineResult<Decimal> {
    let break_hours: Decimal = shift
        .details
        .iter()
        .filter(|d| d.day == day && d.work_type == WorkType::Break)
        .map(|d| d.span_hours())
        .sum::<EngineResult<Decimal>>()?;

    let mut total = Decimal::ZERO;
    for detail in shift
        .details
        .iter()
        .filter(|d| d.day == day && d.work_type == WorkType::Work)
    {
        let mut hours = detail.span_hours()?;
        if detail.is_cut_break {
            hours -= break_hours;
        }
        total += hours;
    }
    Ok(total)
}

/// Minutes of lateness past the scheduled in-time, zero when on time.
pub fn late_minutes(check_in: NaiveTime, scheduled_in: NaiveTime) -> i64 {
    (check_in - scheduled_in).num_minutes().max(0)
}

/// Working hours after deducting lateness from scheduled hours.
///
/// The deduction applies regardless of whether a late permit exists, and
/// the result is clamped to a minimum of zero.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::working_hours;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// // 8h scheduled, 30 minutes late
/// let hours = working_hours(Decimal::new(8, 0), 30);
/// assert_eq!(hours, Decimal::from_str("7.5").unwrap());
/// ```
pub fn working_hours(normal_hours: Decimal, late_mins: i64) -> Decimal {
    let deducted = normal_hours - Decimal::new(late_mins.max(0), 0) / Decimal::new(60, 0);
    deducted.max(Decimal::ZERO)
}
