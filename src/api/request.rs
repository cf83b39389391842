//! Request types for the attendance engine API.
//!
//! This module defines the JSON request structure for the `/calculate`
//! endpoint. The request carries the employee filter, the date range, and
//! the pre-fetched master and transactional collections the engine consumes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::engine::InMemoryRepository;
use crate::models::{
    AttendanceLogMachine, AttendancePointApp, DateRange, EarlyOutPermit, Employee,
    EmployeeAttendance, Holiday, LatePermit, Leave, LeaveSubmission, OutPermit, OvertimeLetter,
    OvertimeRate,
};

/// Request body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Keys of the employees to calculate; empty selects every employee in
    /// the data set.
    #[serde(default)]
    pub employee_keys: Vec<String>,
    /// The calculation window.
    pub date_range: DateRangeRequest,
    /// The master and transactional data the calculation runs over.
    pub data: DataSetRequest,
}

/// The calculation window in a request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DateRangeRequest {
    /// The start date (inclusive).
    pub start_date: NaiveDate,
    /// The end date (inclusive).
    pub end_date: NaiveDate,
}

impl From<DateRangeRequest> for DateRange {
    fn from(req: DateRangeRequest) -> Self {
        DateRange {
            start: req.start_date,
            end: req.end_date,
        }
    }
}

/// The collections the engine consumes, as carried by a request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataSetRequest {
    /// Employee master records.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Shift assignments with details and quotas.
    #[serde(default)]
    pub employee_attendances: Vec<EmployeeAttendance>,
    /// Leave master records.
    #[serde(default)]
    pub leaves: Vec<Leave>,
    /// Holiday definitions.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    /// Overtime rate tables.
    #[serde(default)]
    pub overtime_rates: Vec<OvertimeRate>,
    /// Leave submissions.
    #[serde(default)]
    pub leave_submissions: Vec<LeaveSubmission>,
    /// Late permits.
    #[serde(default)]
    pub late_permits: Vec<LatePermit>,
    /// Early-out permits.
    #[serde(default)]
    pub early_out_permits: Vec<EarlyOutPermit>,
    /// Out permits.
    #[serde(default)]
    pub out_permits: Vec<OutPermit>,
    /// Overtime letters.
    #[serde(default)]
    pub overtime_letters: Vec<OvertimeLetter>,
    /// Raw mobile-app events.
    #[serde(default)]
    pub point_app_events: Vec<AttendancePointApp>,
    /// Raw biometric-device events.
    #[serde(default)]
    pub machine_events: Vec<AttendanceLogMachine>,
}

impl From<DataSetRequest> for InMemoryRepository {
    fn from(req: DataSetRequest) -> Self {
        let mut repository = InMemoryRepository::new();
        repository.leaves = req.leaves;
        repository.holidays = req.holidays;
        repository.employees = req.employees;
        repository.employee_attendances = req.employee_attendances;
        repository.overtime_rates = req.overtime_rates;
        repository.leave_submissions = req.leave_submissions;
        repository.late_permits = req.late_permits;
        repository.early_out_permits = req.early_out_permits;
        repository.out_permits = req.out_permits;
        repository.overtime_letters = req.overtime_letters;
        repository.point_app_events = req.point_app_events;
        repository.machine_events = req.machine_events;
        repository
    }
}
