//! Calculation logic for the attendance engine.
//!
//! This module contains the per-day pipeline stages: shift resolution with
//! schedule overrides and weekly rollover, check event reconciliation,
//! status classification with its precedence rules, scheduled/working hour
//! calculation, and tiered overtime multiplication.

mod event_reconciler;
mod overtime;
mod shift_resolver;
mod status_classifier;
mod working_hours;

pub use event_reconciler::{resolve_check_in, resolve_check_out, EventSource, ResolvedEvent};
pub use overtime::{calculate_overtime, OvertimeOutcome};
pub use shift_resolver::{resolve_shift_detail, weekly_scheduled_hours, ResolvedShift};
pub use status_classifier::{
    attendance_code, build_description, classify, is_unexcused_absence, Classification,
    DayContext, LeaveContext,
};
pub use working_hours::{late_minutes, scheduled_hours_for_day, working_hours};
