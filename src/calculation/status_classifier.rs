//! Day status classification.
//!
//! Maps one employee-day's inputs — resolved shift, holiday, approved leave
//! and permits, reconciled check events — to a single
//! [`AttendanceStatus`], evaluated in strict precedence order with the first
//! matching rule winning. Also assembles the row's description, compact
//! attendance code, and unexcused-absence flag.
//!
//! A late arrival *without* an approved permit does not produce `Late` here;
//! it falls through to `Present` while the lateness still deducts working
//! hours. Confirmed upstream behavior, kept as-is.

use chrono::{Days, Duration, NaiveDate};

use crate::config::EngineSettings;
use crate::error::EngineResult;
use crate::models::{
    AttendanceStatus, EarlyOutPermit, Employee, HolidayInstance, LatePermit, Leave, LeaveCategory,
    LeaveSubmission, OutPermit, OvertimeLetter, ShiftDetail, WorkType,
};

use super::event_reconciler::ResolvedEvent;

/// An approved leave submission paired with its master record.
#[derive(Debug, Clone)]
pub struct LeaveContext<'a> {
    /// The approved submission covering the day.
    pub submission: &'a LeaveSubmission,
    /// The referenced leave master record, when the code is known.
    pub master: Option<&'a Leave>,
}

/// Everything known about one employee-day, assembled by the orchestrator
/// and passed through the pipeline explicitly.
#[derive(Debug, Clone)]
pub struct DayContext<'a> {
    /// The calendar day under calculation.
    pub date: NaiveDate,
    /// The employee the day belongs to.
    pub employee: &'a Employee,
    /// The resolved work pattern, when one exists.
    pub shift_detail: Option<&'a ShiftDetail>,
    /// The holiday instance covering this date and company, if any.
    pub holiday: Option<&'a HolidayInstance>,
    /// The approved leave covering this date, if any.
    pub leave: Option<LeaveContext<'a>>,
    /// An approved late permit for this date, if any.
    pub late_permit: Option<&'a LatePermit>,
    /// An approved early-out permit for this date, if any.
    pub early_out_permit: Option<&'a EarlyOutPermit>,
    /// An approved out permit for this date, if any.
    pub out_permit: Option<&'a OutPermit>,
    /// An approved overtime letter for this date, if any.
    pub overtime_letter: Option<&'a OvertimeLetter>,
    /// The reconciled check-in, if any source recorded one.
    pub check_in: Option<ResolvedEvent>,
    /// The reconciled check-out, if any source recorded one.
    pub check_out: Option<ResolvedEvent>,
}

/// The classifier's verdict for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// The derived status.
    pub status: AttendanceStatus,
    /// The quota balance to charge one day against, when quota leave fired.
    pub quota_charge: Option<LeaveCategory>,
    /// The leave code behind a `Leave` status, for the attendance code.
    pub leave_code: Option<String>,
}

impl Classification {
    fn plain(status: AttendanceStatus) -> Self {
        Classification {
            status,
            quota_charge: None,
            leave_code: None,
        }
    }
}

/// Classifies one employee-day. First matching rule wins:
///
/// 1. Off-type work pattern → `OffSchedule`.
/// 2. Approved leave covering the date → `Leave`, or `NotPresent` when the
///    bereavement filing grace or the submission window is violated. Quota
///    leave reports the balance to charge.
/// 3. Company holiday → `Holiday`.
/// 4. No check event from either source → `NotPresent`.
/// 5. No resolved work pattern → `NotPresent` (no scheduled shift).
/// 6. Check-in past tolerance *and* an approved late permit → `Late`.
/// 7. Check-out before scheduled end → `EarlyOut` with an early-out permit,
///    else `Out` with an out permit.
/// 8. Default → `Present`.
pub fn classify(ctx: &DayContext<'_>, settings: &EngineSettings) -> EngineResult<Classification> {
    // Rule 1: scheduled day off dominates everything
    if let Some(detail) = ctx.shift_detail {
        if detail.work_type == WorkType::Off {
            return Ok(Classification::plain(AttendanceStatus::OffSchedule));
        }
    }

    // Rule 2: approved leave
    if let Some(leave) = &ctx.leave {
        return Ok(classify_leave(ctx.date, leave, settings));
    }

    // Rule 3: holiday
    if ctx.holiday.is_some() {
        return Ok(Classification::plain(AttendanceStatus::Holiday));
    }

    // Rule 4: nothing recorded in either direction
    if ctx.check_in.is_none() && ctx.check_out.is_none() {
        return Ok(Classification::plain(AttendanceStatus::NotPresent));
    }

    // No scheduled shift: events exist but there is nothing to measure
    // against, so the day cannot be classified further
    let Some(detail) = ctx.shift_detail else {
        return Ok(Classification::plain(AttendanceStatus::NotPresent));
    };

    // Rule 5: late past tolerance, only with an approved permit
    if let Some(check_in) = &ctx.check_in {
        let deadline = detail.in_time()? + Duration::minutes(detail.late_tolerance_minutes);
        if check_in.time > deadline && ctx.late_permit.is_some() {
            return Ok(Classification::plain(AttendanceStatus::Late));
        }
    }

    // Rule 6: early departure, permit kind decides the status
    if let Some(check_out) = &ctx.check_out {
        if check_out.time < detail.out_time()? {
            if ctx.early_out_permit.is_some() {
                return Ok(Classification::plain(AttendanceStatus::EarlyOut));
            }
            if ctx.out_permit.is_some() {
                return Ok(Classification::plain(AttendanceStatus::Out));
            }
        }
    }

    Ok(Classification::plain(AttendanceStatus::Present))
}

fn classify_leave(
    date: NaiveDate,
    leave: &LeaveContext<'_>,
    settings: &EngineSettings,
) -> Classification {
    let submission = leave.submission;
    let code = submission.leave_code.clone();

    if settings.is_bereavement(&code) {
        // Bereavement may be filed after the fact, within a short grace
        let deadline = submission
            .date_end
            .checked_add_days(Days::new(settings.leave.bereavement_grace_days.max(0) as u64))
            .unwrap_or(submission.date_end);
        if submission.submitted_on <= deadline {
            return Classification {
                status: AttendanceStatus::Leave,
                quota_charge: None,
                leave_code: Some(code),
            };
        }
        return Classification::plain(AttendanceStatus::NotPresent);
    }

    if let Some(master) = leave.master {
        let window_start = submission.date_start + Duration::days(master.min_submission_days);
        let window_end = submission.date_start + Duration::days(master.max_submission_days);
        if date < window_start || date > window_end {
            return Classification::plain(AttendanceStatus::NotPresent);
        }
    }

    Classification {
        status: AttendanceStatus::Leave,
        quota_charge: settings.quota_category(&code),
        leave_code: Some(code),
    }
}

/// Assembles the day's description by concatenating, in fixed order, any
/// applicable note: off-day, holiday, leave, late permit, out permit,
/// early-out permit. Notes join with `"; "`.
pub fn build_description(ctx: &DayContext<'_>) -> String {
    let mut notes: Vec<String> = Vec::new();

    if let Some(detail) = ctx.shift_detail {
        if detail.work_type == WorkType::Off {
            notes.push(format!("Off day ({})", detail.work_name));
        }
    }
    if let Some(holiday) = ctx.holiday {
        notes.push(note("Holiday", &holiday.name));
    }
    if let Some(leave) = &ctx.leave {
        notes.push(note(
            &format!("Leave {}", leave.submission.leave_code),
            &leave.submission.description,
        ));
    }
    if let Some(permit) = ctx.late_permit {
        notes.push(note("Late permit", &permit.description));
    }
    if let Some(permit) = ctx.out_permit {
        notes.push(note("Out permit", &permit.description));
    }
    if let Some(permit) = ctx.early_out_permit {
        notes.push(note("Early-out permit", &permit.description));
    }

    notes.join("; ")
}

fn note(label: &str, text: &str) -> String {
    if text.is_empty() {
        label.to_string()
    } else {
        format!("{}: {}", label, text)
    }
}

/// The compact per-day attendance code for a classified day.
///
/// Holiday and off days encode as `":::"`, leave days as the leave code
/// (with a configured fallback), absences as `"A"`, everything else as
/// `"."`.
pub fn attendance_code(classification: &Classification, settings: &EngineSettings) -> String {
    match classification.status {
        AttendanceStatus::Holiday | AttendanceStatus::OffSchedule => ":::".to_string(),
        AttendanceStatus::Leave => classification
            .leave_code
            .clone()
            .unwrap_or_else(|| settings.leave.fallback_leave_code.clone()),
        AttendanceStatus::NotPresent => "A".to_string(),
        _ => ".".to_string(),
    }
}

/// Whether the day counts as an unexcused absence: not present, with no
/// leave submission and no holiday excusing it.
pub fn is_unexcused_absence(ctx: &DayContext<'_>, status: AttendanceStatus) -> bool {
    status == AttendanceStatus::NotPresent && ctx.leave.is_none() && ctx.holiday.is_none()
}
