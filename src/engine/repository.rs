//! The data access contract consumed by the calculation orchestrator.
//!
//! The engine never issues per-day lookups: every query is a bulk load for
//! the whole invocation, returning an in-memory collection, and persistence
//! is a single atomic commit with full-replace semantics per (employee,
//! date) pair. [`InMemoryRepository`] is the reference implementation,
//! backing both the test suite and the HTTP surface.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{
    ApprovalStatus, Attendance, AttendanceLogMachine, AttendancePointApp, DateRange,
    EarlyOutPermit, Employee, EmployeeAttendance, Holiday, LatePermit, Leave, LeaveSubmission,
    OutPermit, OvertimeLetter, OvertimeRate,
};

/// Bulk query and persistence contract for attendance calculation.
///
/// Transactional queries return only records whose approval status is
/// `Approve` and whose date falls inside the requested range. An empty
/// `employee_keys` filter selects every employee.
pub trait AttendanceRepository {
    /// All leave master records.
    fn leaves(&self) -> EngineResult<Vec<Leave>>;

    /// Holidays starting on or after `from`.
    fn holidays(&self, from: NaiveDate) -> EngineResult<Vec<Holiday>>;

    /// Employees selected by the filter.
    fn employees(&self, employee_keys: &[String]) -> EngineResult<Vec<Employee>>;

    /// Shift assignments (with details and quotas) for the filtered employees.
    fn employee_attendances(&self, employee_keys: &[String])
        -> EngineResult<Vec<EmployeeAttendance>>;

    /// All overtime rate tables.
    fn overtime_rates(&self) -> EngineResult<Vec<OvertimeRate>>;

    /// Approved leave submissions overlapping the range.
    fn leave_submissions(&self, range: DateRange) -> EngineResult<Vec<LeaveSubmission>>;

    /// Approved late permits inside the range.
    fn late_permits(&self, range: DateRange) -> EngineResult<Vec<LatePermit>>;

    /// Approved early-out permits inside the range.
    fn early_out_permits(&self, range: DateRange) -> EngineResult<Vec<EarlyOutPermit>>;

    /// Approved out permits inside the range.
    fn out_permits(&self, range: DateRange) -> EngineResult<Vec<OutPermit>>;

    /// Approved overtime letters inside the range.
    fn overtime_letters(&self, range: DateRange) -> EngineResult<Vec<OvertimeLetter>>;

    /// Raw mobile-app events inside the range.
    fn point_app_events(&self, range: DateRange) -> EngineResult<Vec<AttendancePointApp>>;

    /// Raw biometric-device events inside the range.
    fn machine_events(&self, range: DateRange) -> EngineResult<Vec<AttendanceLogMachine>>;

    /// Atomically persists a calculation run.
    ///
    /// Every row replaces any prior row for its (employee, date) pair, and
    /// the charged quota balances replace the stored assignments; the whole
    /// batch lands or nothing does.
    fn commit(
        &mut self,
        rows: Vec<Attendance>,
        quotas: Vec<EmployeeAttendance>,
    ) -> EngineResult<()>;
}

/// An in-memory repository over pre-fetched collections.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    /// Leave master records.
    pub leaves: Vec<Leave>,
    /// Holiday definitions (possibly multi-day).
    pub holidays: Vec<Holiday>,
    /// Employee master records.
    pub employees: Vec<Employee>,
    /// Shift assignments keyed by employee.
    pub employee_attendances: Vec<EmployeeAttendance>,
    /// Overtime rate tables.
    pub overtime_rates: Vec<OvertimeRate>,
    /// Leave submissions in any approval state.
    pub leave_submissions: Vec<LeaveSubmission>,
    /// Late permits in any approval state.
    pub late_permits: Vec<LatePermit>,
    /// Early-out permits in any approval state.
    pub early_out_permits: Vec<EarlyOutPermit>,
    /// Out permits in any approval state.
    pub out_permits: Vec<OutPermit>,
    /// Overtime letters in any approval state.
    pub overtime_letters: Vec<OvertimeLetter>,
    /// Raw mobile-app events.
    pub point_app_events: Vec<AttendancePointApp>,
    /// Raw biometric-device events.
    pub machine_events: Vec<AttendanceLogMachine>,
    attendance: BTreeMap<(String, NaiveDate), Attendance>,
}

impl InMemoryRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// The persisted attendance rows, ordered by (employee, date).
    pub fn attendance_rows(&self) -> Vec<&Attendance> {
        self.attendance.values().collect()
    }

    /// The persisted row for one (employee, date) pair, if any.
    pub fn attendance_for(&self, employee_key: &str, date: NaiveDate) -> Option<&Attendance> {
        self.attendance.get(&(employee_key.to_string(), date))
    }

    /// The stored assignment for an employee, reflecting committed quota
    /// charges.
    pub fn assignment_for(&self, employee_key: &str) -> Option<&EmployeeAttendance> {
        self.employee_attendances
            .iter()
            .find(|a| a.employee_key == employee_key)
    }

    fn matches_filter(employee_key: &str, employee_keys: &[String]) -> bool {
        employee_keys.is_empty() || employee_keys.iter().any(|k| k == employee_key)
    }
}

impl AttendanceRepository for InMemoryRepository {
    fn leaves(&self) -> EngineResult<Vec<Leave>> {
        Ok(self.leaves.clone())
    }

    fn holidays(&self, from: NaiveDate) -> EngineResult<Vec<Holiday>> {
        Ok(self
            .holidays
            .iter()
            .filter(|h| h.date_start >= from)
            .cloned()
            .collect())
    }

    fn employees(&self, employee_keys: &[String]) -> EngineResult<Vec<Employee>> {
        Ok(self
            .employees
            .iter()
            .filter(|e| Self::matches_filter(&e.key, employee_keys))
            .cloned()
            .collect())
    }

    fn employee_attendances(
        &self,
        employee_keys: &[String],
    ) -> EngineResult<Vec<EmployeeAttendance>> {
        Ok(self
            .employee_attendances
            .iter()
            .filter(|a| Self::matches_filter(&a.employee_key, employee_keys))
            .cloned()
            .collect())
    }

    fn overtime_rates(&self) -> EngineResult<Vec<OvertimeRate>> {
        Ok(self.overtime_rates.clone())
    }

    fn leave_submissions(&self, range: DateRange) -> EngineResult<Vec<LeaveSubmission>> {
        Ok(self
            .leave_submissions
            .iter()
            .filter(|s| {
                s.status == ApprovalStatus::Approve
                    && s.date_start <= range.end
                    && s.date_end >= range.start
            })
            .cloned()
            .collect())
    }

    fn late_permits(&self, range: DateRange) -> EngineResult<Vec<LatePermit>> {
        Ok(self
            .late_permits
            .iter()
            .filter(|p| p.status == ApprovalStatus::Approve && range.contains(p.date))
            .cloned()
            .collect())
    }

    fn early_out_permits(&self, range: DateRange) -> EngineResult<Vec<EarlyOutPermit>> {
        Ok(self
            .early_out_permits
            .iter()
            .filter(|p| p.status == ApprovalStatus::Approve && range.contains(p.date))
            .cloned()
            .collect())
    }

    fn out_permits(&self, range: DateRange) -> EngineResult<Vec<OutPermit>> {
        Ok(self
            .out_permits
            .iter()
            .filter(|p| p.status == ApprovalStatus::Approve && range.contains(p.date))
            .cloned()
            .collect())
    }

    fn overtime_letters(&self, range: DateRange) -> EngineResult<Vec<OvertimeLetter>> {
        Ok(self
            .overtime_letters
            .iter()
            .filter(|l| l.status == ApprovalStatus::Approve && range.contains(l.date))
            .cloned()
            .collect())
    }

    fn point_app_events(&self, range: DateRange) -> EngineResult<Vec<AttendancePointApp>> {
        Ok(self
            .point_app_events
            .iter()
            .filter(|e| range.contains(e.date()))
            .cloned()
            .collect())
    }

    fn machine_events(&self, range: DateRange) -> EngineResult<Vec<AttendanceLogMachine>> {
        Ok(self
            .machine_events
            .iter()
            .filter(|e| range.contains(e.date()))
            .cloned()
            .collect())
    }

    fn commit(
        &mut self,
        rows: Vec<Attendance>,
        quotas: Vec<EmployeeAttendance>,
    ) -> EngineResult<()> {
        for row in rows {
            // Full-replace: drop any prior row for the pair before insert
            self.attendance
                .insert((row.employee_key.clone(), row.date), row);
        }
        for updated in quotas {
            if let Some(existing) = self
                .employee_attendances
                .iter_mut()
                .find(|a| a.employee_key == updated.employee_key)
            {
                *existing = updated;
            }
        }
        Ok(())
    }
}
