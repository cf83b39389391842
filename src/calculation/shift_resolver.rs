//! Shift detail resolution.
//!
//! Determines which shift detail (work pattern) applies to an employee on a
//! calendar date: a schedule override when one names a detail, otherwise the
//! day-of-week default from the employee's shift. A separate weekly-hour
//! rollover turns a scheduled off day into the Saturday catch-up pattern
//! when the preceding days' scheduled hours fall short of the threshold.

use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;

use crate::config::EngineSettings;
use crate::error::EngineResult;
use crate::models::{Day, EmployeeAttendance, ShiftDetail};

use super::working_hours::scheduled_hours_for_day;

/// The outcome of resolving a day's shift.
#[derive(Debug, Clone)]
pub struct ResolvedShift<'a> {
    /// The work pattern for the day, when one could be resolved.
    pub detail: Option<&'a ShiftDetail>,
    /// The label recorded on the attendance row.
    pub shift_name: String,
    /// Whether a schedule override row existed for the date.
    pub from_override: bool,
}

/// Resolves the shift detail that applies to `date` for an employee.
///
/// Resolution order:
/// 1. A schedule override naming a detail key wins outright.
/// 2. An override row with an empty key, or no row at all, falls back to
///    the shift detail mapped to the date's day of week.
/// 3. If the resolved detail is the off pattern and the scheduled hours of
///    the preceding look-back window fall below the weekly threshold, the
///    Saturday-mapped detail is assigned instead as a catch-up day.
///
/// Naming: a rollover day takes the catch-up detail's work name; otherwise
/// an override row (even an empty one) labels the day `SHIFT {day-of-month}`
/// and a plain day-of-week resolution uses the detail's work name.
///
/// Returns `detail: None` when nothing matches; callers must treat that as
/// "no scheduled shift" rather than assuming a pattern exists.
pub fn resolve_shift_detail<'a>(
    assignment: &'a EmployeeAttendance,
    date: NaiveDate,
    settings: &EngineSettings,
) -> EngineResult<ResolvedShift<'a>> {
    let override_row = assignment
        .schedule
        .as_ref()
        .and_then(|s| s.detail_for_date(date));

    let detail = match override_row.and_then(|row| row.override_key()) {
        Some(key) => assignment.shift.detail_by_key(key),
        None => assignment.shift.detail_for_day(Day::from_date(date)),
    };

    if let Some(resolved) = detail {
        if is_off_name(&resolved.work_name, settings) {
            let accumulated = weekly_scheduled_hours(assignment, date, settings)?;
            if accumulated < settings.schedule.weekly_hours_threshold {
                if let Some(saturday) = assignment.shift.detail_for_day(Day::Saturday) {
                    return Ok(ResolvedShift {
                        detail: Some(saturday),
                        shift_name: saturday.work_name.clone(),
                        from_override: override_row.is_some(),
                    });
                }
            }
        }
    }

    let shift_name = if override_row.is_some() {
        format!("SHIFT {}", date.day())
    } else {
        detail.map(|d| d.work_name.clone()).unwrap_or_default()
    };

    Ok(ResolvedShift {
        detail,
        shift_name,
        from_override: override_row.is_some(),
    })
}

/// Sums scheduled hours over the fixed look-back window preceding `date`.
///
/// Each preceding day resolves through the same override-then-weekday steps
/// as the target day; off-named details contribute nothing. The window is a
/// fixed number of days back, not aligned to a calendar week boundary.
pub fn weekly_scheduled_hours(
    assignment: &EmployeeAttendance,
    date: NaiveDate,
    settings: &EngineSettings,
) -> EngineResult<Decimal> {
    let mut total = Decimal::ZERO;

    for offset in 1..=u64::from(settings.schedule.rollover_lookback_days) {
        let Some(previous) = date.checked_sub_days(Days::new(offset)) else {
            continue;
        };

        let override_key = assignment
            .schedule
            .as_ref()
            .and_then(|s| s.detail_for_date(previous))
            .and_then(|row| row.override_key());

        let detail = match override_key {
            Some(key) => assignment.shift.detail_by_key(key),
            None => assignment.shift.detail_for_day(Day::from_date(previous)),
        };

        if let Some(detail) = detail {
            if !is_off_name(&detail.work_name, settings) {
                total += scheduled_hours_for_day(&assignment.shift, detail.day)?;
            }
        }
    }

    Ok(total)
}

fn is_off_name(work_name: &str, settings: &EngineSettings) -> bool {
    work_name.eq_ignore_ascii_case(&settings.schedule.off_work_name)
}
