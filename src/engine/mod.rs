//! The calculation orchestrator.
//!
//! [`AttendanceEngine`] runs the top-level loop: bulk-load all master and
//! transactional data once per invocation, then for every employee and every
//! calendar date in the range run the per-day pipeline — shift resolution,
//! event reconciliation, status classification, hour and overtime
//! calculation — assemble one [`Attendance`] row, and commit the whole run
//! atomically at the end. One bad employee or day fails the invocation and
//! nothing is persisted.

mod repository;

pub use repository::{AttendanceRepository, InMemoryRepository};

use std::collections::HashMap;
use std::time::Instant;

use chrono::{Duration, NaiveDate, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::calculation::{
    attendance_code, build_description, calculate_overtime, classify, is_unexcused_absence,
    late_minutes, resolve_check_in, resolve_check_out, resolve_shift_detail,
    scheduled_hours_for_day, working_hours, DayContext, EventSource, LeaveContext,
};
use crate::config::EngineSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Attendance, AttendanceLogMachine, AttendancePointApp, AttendanceStatus, DateRange,
    EarlyOutPermit, Employee, EmployeeAttendance, HolidayInstance, HourMinute, LatePermit, Leave,
    LeaveCategory, LeaveSubmission, OutPermit, OvertimeLetter, OvertimeRateDetail,
};

/// Run-level reporting for one calculation invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationSummary {
    /// Number of employees the run covered.
    pub employees_processed: usize,
    /// Number of calendar days per employee.
    pub days_processed: i64,
    /// Number of attendance rows written.
    pub rows_written: usize,
    /// The produced rows, ordered by employee then date.
    pub rows: Vec<Attendance>,
}

/// Everything loaded once per run that the per-day pipeline draws from,
/// narrowed to a single employee.
struct EmployeeRunData<'a> {
    employee: &'a Employee,
    assignment: &'a EmployeeAttendance,
    leaves: &'a [Leave],
    holiday_instances: &'a [HolidayInstance],
    submissions: &'a [LeaveSubmission],
    late_permits: &'a [LatePermit],
    early_out_permits: &'a [EarlyOutPermit],
    out_permits: &'a [OutPermit],
    overtime_letters: &'a [OvertimeLetter],
    app_events: Vec<AttendancePointApp>,
    machine_events: Vec<AttendanceLogMachine>,
    overtime_tiers: Vec<OvertimeRateDetail>,
}

/// The attendance calculation orchestrator.
///
/// Holds no cross-day mutable state: quota charges accumulate in explicit
/// per-run structures, so one engine value may be reused across invocations
/// but a single invocation is strictly sequential.
pub struct AttendanceEngine<R: AttendanceRepository> {
    repository: R,
    settings: EngineSettings,
}

impl<R: AttendanceRepository> AttendanceEngine<R> {
    /// Creates an engine over a repository with explicit settings.
    pub fn new(repository: R, settings: EngineSettings) -> Self {
        Self {
            repository,
            settings,
        }
    }

    /// Creates an engine over a repository with compiled-in default settings.
    pub fn with_defaults(repository: R) -> Self {
        Self::new(repository, EngineSettings::default())
    }

    /// Read access to the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Consumes the engine and returns the repository.
    pub fn into_repository(self) -> R {
        self.repository
    }

    /// Calculates attendance for the filtered employees over a date range.
    ///
    /// Bulk-loads all inputs once, builds one row per (employee, date) pair
    /// inclusive of both range ends, and commits rows plus charged leave
    /// quotas as a single atomic batch. Recalculating a range replaces any
    /// previously persisted rows for its pairs.
    ///
    /// # Errors
    ///
    /// Fails without persisting anything when the range runs backwards, an
    /// employee in the set has no shift assignment, master data carries
    /// unparseable times, or the repository rejects a query or the commit.
    pub fn calculate(
        &mut self,
        employee_keys: &[String],
        range: DateRange,
    ) -> EngineResult<CalculationSummary> {
        range.validate()?;
        let started = Instant::now();

        let leaves = self.repository.leaves()?;
        let holiday_instances: Vec<HolidayInstance> = self
            .repository
            .holidays(range.start)?
            .iter()
            .flat_map(|h| h.expand())
            .collect();
        let employees = self.repository.employees(employee_keys)?;
        let assignments: HashMap<String, EmployeeAttendance> = self
            .repository
            .employee_attendances(employee_keys)?
            .into_iter()
            .map(|a| (a.employee_key.clone(), a))
            .collect();
        let overtime_rates = self.repository.overtime_rates()?;
        let submissions = self.repository.leave_submissions(range)?;
        let late_permits = self.repository.late_permits(range)?;
        let early_out_permits = self.repository.early_out_permits(range)?;
        let out_permits = self.repository.out_permits(range)?;
        let overtime_letters = self.repository.overtime_letters(range)?;
        let app_events = self.repository.point_app_events(range)?;
        let machine_events = self.repository.machine_events(range)?;

        info!(
            employees = employees.len(),
            days = range.day_count(),
            "Starting attendance calculation"
        );

        let mut rows: Vec<Attendance> = Vec::new();
        let mut quota_charges: HashMap<String, Vec<LeaveCategory>> = HashMap::new();

        for employee in &employees {
            let assignment = assignments.get(&employee.key).ok_or_else(|| {
                EngineError::MissingShiftAssignment {
                    employee_key: employee.key.clone(),
                }
            })?;

            let data = EmployeeRunData {
                employee,
                assignment,
                leaves: &leaves,
                holiday_instances: &holiday_instances,
                submissions: &submissions,
                late_permits: &late_permits,
                early_out_permits: &early_out_permits,
                out_permits: &out_permits,
                overtime_letters: &overtime_letters,
                app_events: app_events
                    .iter()
                    .filter(|e| e.employee_key == employee.key)
                    .cloned()
                    .collect(),
                machine_events: machine_events
                    .iter()
                    .filter(|e| e.employee_key == employee.key)
                    .cloned()
                    .collect(),
                overtime_tiers: overtime_rates
                    .iter()
                    .find(|r| r.company_key == employee.company_key)
                    .map(|r| r.sorted_details())
                    .unwrap_or_default(),
            };

            for date in range.iter_days() {
                let (row, quota_charge) = self.build_day(&data, date)?;
                rows.push(row);
                if let Some(category) = quota_charge {
                    quota_charges
                        .entry(employee.key.clone())
                        .or_default()
                        .push(category);
                }
            }
        }

        let mut charged_assignments: Vec<EmployeeAttendance> = Vec::new();
        for (employee_key, categories) in quota_charges {
            if let Some(assignment) = assignments.get(&employee_key) {
                let mut updated = assignment.clone();
                for category in categories {
                    updated.charge_quota(category);
                }
                charged_assignments.push(updated);
            }
        }

        let rows_written = rows.len();
        self.repository.commit(rows.clone(), charged_assignments)?;

        info!(
            employees = employees.len(),
            rows = rows_written,
            duration_ms = started.elapsed().as_millis() as u64,
            "Attendance calculation committed"
        );

        Ok(CalculationSummary {
            employees_processed: employees.len(),
            days_processed: range.day_count(),
            rows_written,
            rows,
        })
    }

    /// Runs the per-day pipeline for one (employee, date) pair.
    fn build_day(
        &self,
        data: &EmployeeRunData<'_>,
        date: NaiveDate,
    ) -> EngineResult<(Attendance, Option<LeaveCategory>)> {
        let employee = data.employee;
        let resolved = resolve_shift_detail(data.assignment, date, &self.settings)?;

        let check_in = resolve_check_in(date, &data.app_events, &data.machine_events);
        let check_out = resolve_check_out(date, &data.app_events, &data.machine_events);

        let holiday = data
            .holiday_instances
            .iter()
            .find(|h| h.date == date && h.applies_to_company(&employee.company_key));
        let leave = data
            .submissions
            .iter()
            .find(|s| s.employee_key == employee.key && s.covers(date))
            .map(|submission| LeaveContext {
                submission,
                master: data.leaves.iter().find(|l| l.code == submission.leave_code),
            });
        let late_permit = data
            .late_permits
            .iter()
            .find(|p| p.employee_key == employee.key && p.date == date);
        let early_out_permit = data
            .early_out_permits
            .iter()
            .find(|p| p.employee_key == employee.key && p.date == date);
        let out_permit = data
            .out_permits
            .iter()
            .find(|p| p.employee_key == employee.key && p.date == date);
        let overtime_letter = data
            .overtime_letters
            .iter()
            .find(|l| l.employee_key == employee.key && l.date == date);

        let ctx = DayContext {
            date,
            employee,
            shift_detail: resolved.detail,
            holiday,
            leave,
            late_permit,
            early_out_permit,
            out_permit,
            overtime_letter,
            check_in,
            check_out,
        };

        let classification = classify(&ctx, &self.settings)?;
        let description = build_description(&ctx);
        let code = attendance_code(&classification, &self.settings);
        let is_alpha = is_unexcused_absence(&ctx, classification.status);

        // Scheduled and working hours against the resolved pattern
        let (normal_hours, scheduled_in, tolerance) = match resolved.detail {
            Some(detail) => (
                scheduled_hours_for_day(&data.assignment.shift, detail.day)?,
                Some(detail.in_time()?),
                detail.late_tolerance_minutes,
            ),
            None => (Decimal::ZERO, None, 0),
        };

        let late_mins = match (&check_in, scheduled_in) {
            (Some(event), Some(scheduled)) => late_minutes(event.time, scheduled),
            _ => 0,
        };
        let working = working_hours(normal_hours, late_mins);

        // Recorded in-time: a fired late permit pins the declared time
        let time_in = if classification.status == AttendanceStatus::Late {
            match late_permit {
                Some(permit) => Some(permit.declared_in_time()?),
                None => check_in.as_ref().map(|e| e.time),
            }
        } else {
            check_in.as_ref().map(|e| e.time)
        };
        let time_out = check_out.as_ref().map(|e| e.time);

        let (overtime, accumulative_overtime) = match overtime_letter {
            Some(letter) => {
                let minutes_in = i64::from(letter.in_time()?.num_seconds_from_midnight()) / 60;
                let minutes_out = i64::from(letter.out_time()?.num_seconds_from_midnight()) / 60;
                let outcome = calculate_overtime(minutes_in, minutes_out, &data.overtime_tiers);
                (
                    Some(HourMinute::from_minutes(outcome.actual_minutes)),
                    Some(HourMinute::from_minutes(outcome.accumulative_minutes)),
                )
            }
            None => (None, None),
        };

        let mut is_mobile_app = false;
        let mut is_finger_print_machine = false;
        let mut latitude = None;
        let mut longitude = None;
        for event in check_in.iter().chain(check_out.iter()) {
            match event.source {
                EventSource::MobileApp {
                    latitude: lat,
                    longitude: lon,
                } => {
                    is_mobile_app = true;
                    if latitude.is_none() {
                        latitude = Some(lat);
                        longitude = Some(lon);
                    }
                }
                EventSource::Machine => is_finger_print_machine = true,
            }
        }

        let row = Attendance {
            employee_key: employee.key.clone(),
            full_name: employee.full_name.clone(),
            company_key: employee.company_key.clone(),
            organization_unit: employee.organization_unit.clone(),
            position: employee.position.clone(),
            title: employee.title.clone(),
            date,
            shift_name: resolved.shift_name.clone(),
            time_in,
            time_out,
            shift_in_time: scheduled_in
                .map(|t| t + Duration::minutes(tolerance)),
            normal_hour: HourMinute::from_hours(normal_hours),
            working_hour: HourMinute::from_hours(working),
            total_late: (late_mins > 0).then(|| HourMinute::from_minutes(late_mins)),
            overtime,
            accumulative_overtime,
            status: classification.status,
            attendance_code: code,
            description,
            is_mobile_app,
            latitude,
            longitude,
            is_finger_print_machine,
            is_late_permit: late_permit.is_some(),
            is_leave: ctx.leave.is_some(),
            is_early_out_permit: early_out_permit.is_some(),
            is_out_permit: out_permit.is_some(),
            is_overtime_letter: overtime_letter.is_some(),
            is_alpha,
            count_alpha: u32::from(is_alpha),
        };

        Ok((row, classification.quota_charge))
    }
}
