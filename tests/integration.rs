//! Integration tests for the attendance calculation engine.
//!
//! This suite covers the end-to-end scenarios through the HTTP surface:
//! - Off-schedule days and the weekly-hour rollover
//! - Quota-tracked leave with submission windows
//! - Lateness with and without an approved permit
//! - Tiered overtime multiplication
//! - Unexcused absences
//! - Idempotence and coverage of the full-replace persistence

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{NaiveDate, NaiveTime};
use serde_json::{json, Value};
use tower::ServiceExt;

use attendance_engine::api::{create_router, AppState};
use attendance_engine::engine::{AttendanceEngine, CalculationSummary, InMemoryRepository};
use attendance_engine::models::{
    ApprovalStatus, AttendanceStatus, DateRange, Day, Employee, EmployeeAttendance, HourMinute,
    Leave, LeaveCategory, LeaveQuotaDetail, LeaveSubmission, Shift, ShiftDetail, WorkType,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_router() -> Router {
    create_router(AppState::default())
}

async fn post_calculate(router: Router, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/calculate")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

fn employee_json(key: &str) -> Value {
    json!({
        "key": key,
        "full_name": "Ayu Lestari",
        "company_key": "comp_01",
        "organization_unit": "Finance",
        "position": "Analyst",
        "title": "Staff"
    })
}

fn work_detail_json(key: &str, day: &str, time_in: &str, time_out: &str) -> Value {
    json!({
        "key": key,
        "day": day,
        "work_name": "PAGI",
        "work_type": "work",
        "time_in": time_in,
        "time_out": time_out,
        "late_tolerance_minutes": 10
    })
}

fn off_detail_json(key: &str, day: &str) -> Value {
    json!({
        "key": key,
        "day": day,
        "work_name": "OFF",
        "work_type": "off",
        "time_in": "00:00",
        "time_out": "00:00",
        "late_tolerance_minutes": 0
    })
}

/// Mon-Fri 08:00-17:00 (9h), Saturday 09:00-13:00 (4h), Sunday off.
/// Weekly look-back before a Sunday sums to 40h, so the off day holds.
fn full_week_shift_json() -> Value {
    json!({
        "key": "shift_01",
        "company_key": "comp_01",
        "name": "General",
        "details": [
            work_detail_json("sd_mon", "monday", "08:00", "17:00"),
            work_detail_json("sd_tue", "tuesday", "08:00", "17:00"),
            work_detail_json("sd_wed", "wednesday", "08:00", "17:00"),
            work_detail_json("sd_thu", "thursday", "08:00", "17:00"),
            work_detail_json("sd_fri", "friday", "08:00", "17:00"),
            work_detail_json("sd_sat", "saturday", "09:00", "13:00"),
            off_detail_json("sd_sun", "sunday")
        ]
    })
}

/// Single weekday pattern at 09:00-17:00 for the lateness scenarios.
fn nine_to_five_shift_json() -> Value {
    json!({
        "key": "shift_01",
        "company_key": "comp_01",
        "name": "General",
        "details": [
            work_detail_json("sd_tue", "tuesday", "09:00", "17:00")
        ]
    })
}

fn assignment_json(employee_key: &str, shift: Value) -> Value {
    json!({
        "employee_key": employee_key,
        "shift": shift
    })
}

fn machine_event_json(employee_key: &str, timestamp: &str, mode: &str) -> Value {
    json!({
        "employee_key": employee_key,
        "timestamp": timestamp,
        "mode": mode
    })
}

fn request_json(start: &str, end: &str, data: Value) -> Value {
    json!({
        "date_range": { "start_date": start, "end_date": end },
        "data": data
    })
}

fn single_row(response: &Value) -> &Value {
    let rows = response["rows"].as_array().expect("rows array");
    assert_eq!(rows.len(), 1, "expected exactly one row");
    &rows[0]
}

// =============================================================================
// Scenario A: off-schedule Sunday
// =============================================================================

#[tokio::test]
async fn test_scenario_a_off_sunday_is_off_schedule() {
    let body = request_json(
        "2026-02-08", // Sunday
        "2026-02-08",
        json!({
            "employees": [employee_json("emp_001")],
            "employee_attendances": [assignment_json("emp_001", full_week_shift_json())]
        }),
    );

    let (status, response) = post_calculate(create_test_router(), body).await;
    assert_eq!(status, StatusCode::OK);

    let row = single_row(&response);
    assert_eq!(row["status"], "off_schedule");
    assert_eq!(row["attendance_code"], ":::");
    assert_eq!(row["is_alpha"], false);
}

#[tokio::test]
async fn test_off_day_rolls_over_when_weekly_hours_short() {
    // Friday blanked by a schedule override: 40h - 9h = 31h < 40
    let body = request_json(
        "2026-02-08", // Sunday
        "2026-02-08",
        json!({
            "employees": [employee_json("emp_001")],
            "employee_attendances": [{
                "employee_key": "emp_001",
                "shift": full_week_shift_json(),
                "schedule": {
                    "key": "sched_01",
                    "name": "February",
                    "details": [
                        { "date": "2026-02-06", "shift_detail_key": "sd_sun" }
                    ]
                }
            }]
        }),
    );

    let (status, response) = post_calculate(create_test_router(), body).await;
    assert_eq!(status, StatusCode::OK);

    let row = single_row(&response);
    // Re-resolved to the Saturday catch-up pattern: a working day now
    assert_eq!(row["shift_name"], "PAGI");
    assert_eq!(row["status"], "not_present");
}

// =============================================================================
// Scenario B: quota-tracked leave
// =============================================================================

#[test]
fn test_scenario_b_quota_leave_charges_balance() {
    let mut repo = InMemoryRepository::new();
    repo.employees.push(Employee {
        key: "emp_001".to_string(),
        full_name: "Ayu Lestari".to_string(),
        company_key: "comp_01".to_string(),
        organization_unit: "Finance".to_string(),
        position: "Analyst".to_string(),
        title: "Staff".to_string(),
    });
    repo.employee_attendances.push(EmployeeAttendance {
        employee_key: "emp_001".to_string(),
        shift: Shift {
            key: "shift_01".to_string(),
            company_key: "comp_01".to_string(),
            name: "General".to_string(),
            details: vec![ShiftDetail {
                key: "sd_tue".to_string(),
                day: Day::Tuesday,
                work_name: "PAGI".to_string(),
                work_type: WorkType::Work,
                time_in: "09:00".to_string(),
                time_out: "17:00".to_string(),
                late_tolerance_minutes: 10,
                is_next_day: false,
                is_cut_break: false,
            }],
        },
        schedule: None,
        quotas: vec![LeaveQuotaDetail {
            category: LeaveCategory::Annual,
            used: 2,
            credit: 12,
            expired_on: None,
        }],
    });
    repo.leaves.push(Leave {
        code: "CTT".to_string(),
        name: "Annual leave".to_string(),
        min_submission_days: 0,
        max_submission_days: 30,
        quota_tracked: true,
    });
    repo.leave_submissions.push(LeaveSubmission {
        employee_key: "emp_001".to_string(),
        leave_code: "CTT".to_string(),
        date_start: NaiveDate::from_ymd_opt(2026, 2, 3).unwrap(),
        date_end: NaiveDate::from_ymd_opt(2026, 2, 3).unwrap(),
        submitted_on: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
        description: String::new(),
        status: ApprovalStatus::Approve,
    });

    let mut engine = AttendanceEngine::with_defaults(repo);
    let summary = engine
        .calculate(
            &[],
            DateRange {
                start: NaiveDate::from_ymd_opt(2026, 2, 3).unwrap(),
                end: NaiveDate::from_ymd_opt(2026, 2, 3).unwrap(),
            },
        )
        .unwrap();

    assert_eq!(summary.rows[0].status, AttendanceStatus::Leave);
    assert_eq!(summary.rows[0].attendance_code, "CTT");
    assert!(summary.rows[0].is_leave);

    let assignment = engine.repository().assignment_for("emp_001").unwrap();
    assert_eq!(assignment.quota(LeaveCategory::Annual).unwrap().used, 3);
}

// =============================================================================
// Scenarios C & D: lateness with and without a permit
// =============================================================================

#[tokio::test]
async fn test_scenario_c_late_without_permit_stays_present() {
    let body = request_json(
        "2026-02-03", // Tuesday
        "2026-02-03",
        json!({
            "employees": [employee_json("emp_001")],
            "employee_attendances": [assignment_json("emp_001", nine_to_five_shift_json())],
            "machine_events": [
                machine_event_json("emp_001", "2026-02-03T09:25:00", "check_in"),
                machine_event_json("emp_001", "2026-02-03T17:05:00", "check_out")
            ]
        }),
    );

    let (status, response) = post_calculate(create_test_router(), body).await;
    assert_eq!(status, StatusCode::OK);

    let row = single_row(&response);
    // No permit: rule 5 does not fire, lateness still deducts hours
    assert_eq!(row["status"], "present");
    assert_eq!(row["attendance_code"], ".");
    assert_eq!(row["total_late"], json!({ "hour": 0, "minute": 25 }));
    assert_eq!(row["normal_hour"], json!({ "hour": 8, "minute": 0 }));
    assert_eq!(row["working_hour"], json!({ "hour": 7, "minute": 35 }));
    assert_eq!(row["is_finger_print_machine"], true);
    assert_eq!(row["is_late_permit"], false);
}

#[tokio::test]
async fn test_scenario_d_late_with_permit_is_late_with_declared_time() {
    let body = request_json(
        "2026-02-03",
        "2026-02-03",
        json!({
            "employees": [employee_json("emp_001")],
            "employee_attendances": [assignment_json("emp_001", nine_to_five_shift_json())],
            "machine_events": [
                machine_event_json("emp_001", "2026-02-03T09:25:00", "check_in"),
                machine_event_json("emp_001", "2026-02-03T17:05:00", "check_out")
            ],
            "late_permits": [{
                "employee_key": "emp_001",
                "date": "2026-02-03",
                "time_in": "09:30",
                "description": "Traffic",
                "status": "approve"
            }]
        }),
    );

    let (status, response) = post_calculate(create_test_router(), body).await;
    assert_eq!(status, StatusCode::OK);

    let row = single_row(&response);
    assert_eq!(row["status"], "late");
    assert_eq!(row["is_late_permit"], true);
    // The permit's declared time is recorded, not the raw check-in
    assert_eq!(row["time_in"], "09:30:00");
    // Same working-hour deduction as the no-permit case
    assert_eq!(row["total_late"], json!({ "hour": 0, "minute": 25 }));
    assert_eq!(row["working_hour"], json!({ "hour": 7, "minute": 35 }));
    assert!(row["description"]
        .as_str()
        .unwrap()
        .contains("Late permit: Traffic"));
}

// =============================================================================
// Scenario E: tiered overtime
// =============================================================================

#[tokio::test]
async fn test_scenario_e_overtime_tiers_multiply_minutes() {
    let body = request_json(
        "2026-02-03",
        "2026-02-03",
        json!({
            "employees": [employee_json("emp_001")],
            "employee_attendances": [assignment_json("emp_001", nine_to_five_shift_json())],
            "machine_events": [
                machine_event_json("emp_001", "2026-02-03T08:55:00", "check_in"),
                machine_event_json("emp_001", "2026-02-03T17:00:00", "check_out")
            ],
            "overtime_rates": [{
                "company_key": "comp_01",
                "details": [
                    { "level": 1, "max_hours": "2", "multiplier": "1.5" },
                    { "level": 2, "multiplier": "2.0" }
                ]
            }],
            "overtime_letters": [{
                "employee_key": "emp_001",
                "date": "2026-02-03",
                "overtime_in": "18:00",
                "overtime_out": "20:30",
                "description": "Quarter close",
                "status": "approve"
            }]
        }),
    );

    let (status, response) = post_calculate(create_test_router(), body).await;
    assert_eq!(status, StatusCode::OK);

    let row = single_row(&response);
    assert_eq!(row["is_overtime_letter"], true);
    // 2.5h actual; 2h x 1.5 + 0.5h x 2.0 = 240 minutes
    assert_eq!(row["overtime"], json!({ "hour": 2, "minute": 30 }));
    assert_eq!(row["accumulative_overtime"], json!({ "hour": 4, "minute": 0 }));
}

// =============================================================================
// Scenario F: unexcused absence
// =============================================================================

#[tokio::test]
async fn test_scenario_f_absence_is_alpha() {
    let body = request_json(
        "2026-02-03",
        "2026-02-03",
        json!({
            "employees": [employee_json("emp_001")],
            "employee_attendances": [assignment_json("emp_001", nine_to_five_shift_json())]
        }),
    );

    let (status, response) = post_calculate(create_test_router(), body).await;
    assert_eq!(status, StatusCode::OK);

    let row = single_row(&response);
    assert_eq!(row["status"], "not_present");
    assert_eq!(row["attendance_code"], "A");
    assert_eq!(row["is_alpha"], true);
    assert_eq!(row["count_alpha"], 1);
}

// =============================================================================
// Holidays and precedence
// =============================================================================

#[tokio::test]
async fn test_holiday_excuses_absence() {
    let body = request_json(
        "2026-02-03",
        "2026-02-03",
        json!({
            "employees": [employee_json("emp_001")],
            "employee_attendances": [assignment_json("emp_001", nine_to_five_shift_json())],
            "holidays": [{
                "name": "Founding day",
                "date_start": "2026-02-03",
                "company_keys": ["comp_01"]
            }]
        }),
    );

    let (status, response) = post_calculate(create_test_router(), body).await;
    assert_eq!(status, StatusCode::OK);

    let row = single_row(&response);
    assert_eq!(row["status"], "holiday");
    assert_eq!(row["attendance_code"], ":::");
    assert_eq!(row["is_alpha"], false);
    assert!(row["description"]
        .as_str()
        .unwrap()
        .contains("Holiday: Founding day"));
}

#[tokio::test]
async fn test_off_schedule_dominates_leave_and_holiday() {
    let body = request_json(
        "2026-02-08", // Sunday, scheduled off
        "2026-02-08",
        json!({
            "employees": [employee_json("emp_001")],
            "employee_attendances": [assignment_json("emp_001", full_week_shift_json())],
            "holidays": [{
                "name": "Founding day",
                "date_start": "2026-02-08",
                "company_keys": ["comp_01"]
            }],
            "leaves": [{
                "code": "CTT",
                "name": "Annual leave",
                "min_submission_days": 0,
                "max_submission_days": 30,
                "quota_tracked": true
            }],
            "leave_submissions": [{
                "employee_key": "emp_001",
                "leave_code": "CTT",
                "date_start": "2026-02-08",
                "date_end": "2026-02-08",
                "submitted_on": "2026-02-01",
                "status": "approve"
            }]
        }),
    );

    let (status, response) = post_calculate(create_test_router(), body).await;
    assert_eq!(status, StatusCode::OK);

    let row = single_row(&response);
    assert_eq!(row["status"], "off_schedule");
    assert_eq!(row["attendance_code"], ":::");
}

#[tokio::test]
async fn test_early_out_permit_classifies_early_departure() {
    let body = request_json(
        "2026-02-03",
        "2026-02-03",
        json!({
            "employees": [employee_json("emp_001")],
            "employee_attendances": [assignment_json("emp_001", nine_to_five_shift_json())],
            "machine_events": [
                machine_event_json("emp_001", "2026-02-03T08:55:00", "check_in"),
                machine_event_json("emp_001", "2026-02-03T15:00:00", "check_out")
            ],
            "early_out_permits": [{
                "employee_key": "emp_001",
                "date": "2026-02-03",
                "time_out": "15:00",
                "description": "Medical appointment",
                "status": "approve"
            }]
        }),
    );

    let (status, response) = post_calculate(create_test_router(), body).await;
    assert_eq!(status, StatusCode::OK);

    let row = single_row(&response);
    assert_eq!(row["status"], "early_out");
    assert_eq!(row["is_early_out_permit"], true);
    assert_eq!(row["time_out"], "15:00:00");
}

// =============================================================================
// Coverage and idempotence
// =============================================================================

#[tokio::test]
async fn test_coverage_rows_for_every_employee_day_pair() {
    let body = request_json(
        "2026-02-02",
        "2026-02-06",
        json!({
            "employees": [employee_json("emp_001"), employee_json("emp_002")],
            "employee_attendances": [
                assignment_json("emp_001", full_week_shift_json()),
                assignment_json("emp_002", full_week_shift_json())
            ]
        }),
    );

    let (status, response) = post_calculate(create_test_router(), body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["employees_processed"], 2);
    assert_eq!(response["days_processed"], 5);
    assert_eq!(response["rows_written"], 10);
    assert_eq!(response["rows"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_identical_requests_produce_identical_rows() {
    let body = request_json(
        "2026-02-02",
        "2026-02-06",
        json!({
            "employees": [employee_json("emp_001")],
            "employee_attendances": [assignment_json("emp_001", full_week_shift_json())],
            "machine_events": [
                machine_event_json("emp_001", "2026-02-03T08:25:00", "check_in"),
                machine_event_json("emp_001", "2026-02-03T17:05:00", "check_out")
            ]
        }),
    );

    let (_, first) = post_calculate(create_test_router(), body.clone()).await;
    let (_, second) = post_calculate(create_test_router(), body).await;
    assert_eq!(first["rows"], second["rows"]);
}

#[tokio::test]
async fn test_working_hour_never_exceeds_normal_hour() {
    let body = request_json(
        "2026-02-02",
        "2026-02-08",
        json!({
            "employees": [employee_json("emp_001")],
            "employee_attendances": [assignment_json("emp_001", full_week_shift_json())],
            "machine_events": [
                machine_event_json("emp_001", "2026-02-02T08:40:00", "check_in"),
                machine_event_json("emp_001", "2026-02-03T07:55:00", "check_in"),
                machine_event_json("emp_001", "2026-02-04T09:10:00", "check_in")
            ]
        }),
    );

    let (status, response) = post_calculate(create_test_router(), body).await;
    assert_eq!(status, StatusCode::OK);

    for row in response["rows"].as_array().unwrap() {
        let normal: HourMinute = serde_json::from_value(row["normal_hour"].clone()).unwrap();
        let working: HourMinute = serde_json::from_value(row["working_hour"].clone()).unwrap();
        assert!(
            working.total_minutes() <= normal.total_minutes(),
            "working exceeded normal on {}",
            row["date"]
        );
    }

    // On-time day keeps equality
    let rows = response["rows"].as_array().unwrap();
    let on_time = rows
        .iter()
        .find(|r| r["date"] == "2026-02-03")
        .unwrap();
    assert_eq!(on_time["normal_hour"], on_time["working_hour"]);
}

#[test]
fn test_summary_round_trips_through_json() {
    let mut repo = InMemoryRepository::new();
    repo.employees.push(Employee {
        key: "emp_001".to_string(),
        full_name: "Ayu Lestari".to_string(),
        company_key: "comp_01".to_string(),
        organization_unit: "Finance".to_string(),
        position: "Analyst".to_string(),
        title: "Staff".to_string(),
    });
    repo.employee_attendances.push(EmployeeAttendance {
        employee_key: "emp_001".to_string(),
        shift: Shift {
            key: "shift_01".to_string(),
            company_key: "comp_01".to_string(),
            name: "General".to_string(),
            details: vec![],
        },
        schedule: None,
        quotas: vec![],
    });

    let mut engine = AttendanceEngine::with_defaults(repo);
    let summary = engine
        .calculate(
            &[],
            DateRange {
                start: NaiveDate::from_ymd_opt(2026, 2, 3).unwrap(),
                end: NaiveDate::from_ymd_opt(2026, 2, 4).unwrap(),
            },
        )
        .unwrap();

    let json = serde_json::to_string(&summary).unwrap();
    let back: CalculationSummary = serde_json::from_str(&json).unwrap();
    assert_eq!(summary, back);
}

#[test]
fn test_time_fields_serialize_as_times() {
    let time = NaiveTime::from_hms_opt(9, 30, 0).unwrap();
    assert_eq!(serde_json::to_value(time).unwrap(), json!("09:30:00"));
}

// =============================================================================
// Property tests
// =============================================================================

mod properties {
    use attendance_engine::calculation::calculate_overtime;
    use attendance_engine::models::{HourMinute, OvertimeRateDetail};
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn standard_tiers() -> Vec<OvertimeRateDetail> {
        vec![
            OvertimeRateDetail {
                level: 1,
                max_hours: Some(Decimal::new(2, 0)),
                multiplier: Decimal::new(15, 1),
            },
            OvertimeRateDetail {
                level: 2,
                max_hours: None,
                multiplier: Decimal::new(20, 1),
            },
        ]
    }

    proptest! {
        /// More actual overtime never yields less accumulative overtime.
        #[test]
        fn overtime_tiering_is_monotonic(a in 0i64..720, b in 0i64..720) {
            let tiers = standard_tiers();
            let (short, long) = if a <= b { (a, b) } else { (b, a) };
            let start = 18 * 60;
            let short_outcome = calculate_overtime(start, start + short, &tiers);
            let long_outcome = calculate_overtime(start, start + long, &tiers);
            prop_assert!(short_outcome.accumulative_minutes <= long_outcome.accumulative_minutes);
        }

        /// Accumulative overtime is never below the unmultiplied duration
        /// when every tier multiplier is at least one.
        #[test]
        fn accumulative_at_least_actual(duration in 0i64..720) {
            let outcome = calculate_overtime(18 * 60, 18 * 60 + duration, &standard_tiers());
            prop_assert!(outcome.accumulative_minutes >= outcome.actual_minutes);
        }

        /// The hours:minutes encoding round-trips minute counts under a day.
        #[test]
        fn hour_minute_round_trips_minutes(minutes in 0i64..(24 * 60)) {
            let encoded = HourMinute::from_minutes(minutes);
            prop_assert_eq!(i64::from(encoded.total_minutes()), minutes);
        }
    }
}
