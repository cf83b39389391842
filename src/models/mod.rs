//! Core data models for the attendance calculation engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod date_range;
mod employee;
mod employee_attendance;
mod event;
mod holiday;
mod overtime_rate;
mod shift;
mod submission;

pub use attendance::{Attendance, AttendanceStatus, HourMinute};
pub use date_range::DateRange;
pub use employee::Employee;
pub use employee_attendance::{EmployeeAttendance, LeaveQuotaDetail};
pub use event::{AttendanceLogMachine, AttendancePointApp, InOutMode};
pub use holiday::{Holiday, HolidayInstance};
pub use overtime_rate::{OvertimeRate, OvertimeRateDetail};
pub use shift::{Day, Shift, ShiftDetail, ShiftSchedule, ShiftScheduleDetail, WorkType};
pub use submission::{
    ApprovalStatus, EarlyOutPermit, LatePermit, Leave, LeaveCategory, LeaveSubmission, OutPermit,
    OvertimeLetter,
};
