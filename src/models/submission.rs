//! Approval-workflow transaction models.
//!
//! Leave submissions, late/early-out/out permits, and overtime letters are
//! workflow transactions keyed by employee and date (or date range). Only
//! records with [`ApprovalStatus::Approve`] affect calculation; the
//! repository contract filters on that status when loading.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Sign-off state of a workflow transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    /// Awaiting sign-off.
    Waiting,
    /// Fully approved; affects calculation.
    Approve,
    /// Rejected; informational only.
    Reject,
}

/// Quota-tracked leave categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveCategory {
    /// Annual leave quota.
    Annual,
    /// Pass leave quota.
    Pass,
    /// Bonus leave quota.
    Bonus,
}

/// A leave master record.
///
/// Defines the submission window (in days relative to the leave start) and
/// whether the leave draws from a tracked quota.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leave {
    /// The leave code, e.g. "CTT".
    pub code: String,
    /// The leave name.
    pub name: String,
    /// Earliest day offset (from leave start) a covered date may fall on.
    #[serde(default)]
    pub min_submission_days: i64,
    /// Latest day offset (from leave start) a covered date may fall on.
    #[serde(default)]
    pub max_submission_days: i64,
    /// Whether taking this leave charges a quota counter.
    #[serde(default)]
    pub quota_tracked: bool,
}

/// An employee's leave submission covering a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveSubmission {
    /// The employee the submission belongs to.
    pub employee_key: String,
    /// Code of the leave master record this submission references.
    pub leave_code: String,
    /// First day of leave (inclusive).
    pub date_start: NaiveDate,
    /// Last day of leave (inclusive).
    pub date_end: NaiveDate,
    /// The day the submission was filed.
    pub submitted_on: NaiveDate,
    /// Free-text reason.
    #[serde(default)]
    pub description: String,
    /// Sign-off state.
    pub status: ApprovalStatus,
}

impl LeaveSubmission {
    /// Whether the submission covers a calendar date.
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.date_start && date <= self.date_end
    }
}

/// An approved-lateness permit for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatePermit {
    /// The employee the permit belongs to.
    pub employee_key: String,
    /// The day the permit applies to.
    pub date: NaiveDate,
    /// The declared arrival time, recorded on the attendance row when the
    /// permit fires.
    pub time_in: String,
    /// Free-text reason.
    #[serde(default)]
    pub description: String,
    /// Sign-off state.
    pub status: ApprovalStatus,
}

impl LatePermit {
    /// Parses the declared arrival time.
    pub fn declared_in_time(&self) -> EngineResult<NaiveTime> {
        parse_time(&self.time_in).ok_or_else(|| EngineError::InvalidSubmissionTime {
            kind: "late permit".to_string(),
            employee_key: self.employee_key.clone(),
            value: self.time_in.clone(),
        })
    }
}

/// A permit to leave before the scheduled end of shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarlyOutPermit {
    /// The employee the permit belongs to.
    pub employee_key: String,
    /// The day the permit applies to.
    pub date: NaiveDate,
    /// The declared departure time.
    pub time_out: String,
    /// Free-text reason.
    #[serde(default)]
    pub description: String,
    /// Sign-off state.
    pub status: ApprovalStatus,
}

/// A permit to be away from the workplace during the shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutPermit {
    /// The employee the permit belongs to.
    pub employee_key: String,
    /// The day the permit applies to.
    pub date: NaiveDate,
    /// Free-text reason.
    #[serde(default)]
    pub description: String,
    /// Sign-off state.
    pub status: ApprovalStatus,
}

/// An approved overtime assignment for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeLetter {
    /// The employee the letter belongs to.
    pub employee_key: String,
    /// The day the overtime applies to.
    pub date: NaiveDate,
    /// Overtime start time of day, e.g. "18:00".
    pub overtime_in: String,
    /// Overtime end time of day, e.g. "20:30".
    pub overtime_out: String,
    /// Free-text reason.
    #[serde(default)]
    pub description: String,
    /// Sign-off state.
    pub status: ApprovalStatus,
}

impl OvertimeLetter {
    /// Parses the overtime start time.
    pub fn in_time(&self) -> EngineResult<NaiveTime> {
        parse_time(&self.overtime_in).ok_or_else(|| EngineError::InvalidSubmissionTime {
            kind: "overtime letter".to_string(),
            employee_key: self.employee_key.clone(),
            value: self.overtime_in.clone(),
        })
    }

    /// Parses the overtime end time.
    pub fn out_time(&self) -> EngineResult<NaiveTime> {
        parse_time(&self.overtime_out).ok_or_else(|| EngineError::InvalidSubmissionTime {
            kind: "overtime letter".to_string(),
            employee_key: self.employee_key.clone(),
            value: self.overtime_out.clone(),
        })
    }
}

fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_leave_submission_covers_range_inclusive() {
        let submission = LeaveSubmission {
            employee_key: "emp_001".to_string(),
            leave_code: "CTT".to_string(),
            date_start: make_date("2026-02-03"),
            date_end: make_date("2026-02-05"),
            submitted_on: make_date("2026-02-01"),
            description: "Family matter".to_string(),
            status: ApprovalStatus::Approve,
        };
        assert!(submission.covers(make_date("2026-02-03")));
        assert!(submission.covers(make_date("2026-02-05")));
        assert!(!submission.covers(make_date("2026-02-06")));
    }

    #[test]
    fn test_approval_status_serialization() {
        assert_eq!(
            serde_json::to_string(&ApprovalStatus::Waiting).unwrap(),
            "\"waiting\""
        );
        assert_eq!(
            serde_json::to_string(&ApprovalStatus::Approve).unwrap(),
            "\"approve\""
        );
        assert_eq!(
            serde_json::to_string(&ApprovalStatus::Reject).unwrap(),
            "\"reject\""
        );
    }

    #[test]
    fn test_late_permit_declared_time_parses() {
        let permit = LatePermit {
            employee_key: "emp_001".to_string(),
            date: make_date("2026-02-03"),
            time_in: "09:30".to_string(),
            description: String::new(),
            status: ApprovalStatus::Approve,
        };
        assert_eq!(
            permit.declared_in_time().unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_late_permit_bad_time_errors() {
        let permit = LatePermit {
            employee_key: "emp_001".to_string(),
            date: make_date("2026-02-03"),
            time_in: "soon".to_string(),
            description: String::new(),
            status: ApprovalStatus::Approve,
        };
        assert!(matches!(
            permit.declared_in_time(),
            Err(EngineError::InvalidSubmissionTime { .. })
        ));
    }

    #[test]
    fn test_overtime_letter_times_parse() {
        let letter = OvertimeLetter {
            employee_key: "emp_001".to_string(),
            date: make_date("2026-02-03"),
            overtime_in: "18:00".to_string(),
            overtime_out: "20:30".to_string(),
            description: String::new(),
            status: ApprovalStatus::Approve,
        };
        assert_eq!(
            letter.in_time().unwrap(),
            NaiveTime::from_hms_opt(18, 0, 0).unwrap()
        );
        assert_eq!(
            letter.out_time().unwrap(),
            NaiveTime::from_hms_opt(20, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_leave_category_round_trip() {
        for category in [LeaveCategory::Annual, LeaveCategory::Pass, LeaveCategory::Bonus] {
            let json = serde_json::to_string(&category).unwrap();
            let back: LeaveCategory = serde_json::from_str(&json).unwrap();
            assert_eq!(category, back);
        }
    }
}
