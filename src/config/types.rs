//! Configuration types for the attendance calculation engine.
//!
//! This module contains the strongly-typed settings structures that are
//! deserialized from the engine's YAML configuration file. Every field has
//! a compiled-in default equal to the production value, so the engine also
//! runs without a configuration file.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use crate::models::LeaveCategory;

/// Rules driving shift resolution and the weekly-hour rollover.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScheduleRules {
    /// Weekly scheduled-hour threshold below which an off day rolls over to
    /// a catch-up working day.
    pub weekly_hours_threshold: Decimal,
    /// Fixed look-back window, in days, used when summing weekly hours.
    pub rollover_lookback_days: u32,
    /// Work name that marks a detail as a day off for rollover purposes.
    pub off_work_name: String,
}

impl Default for ScheduleRules {
    fn default() -> Self {
        ScheduleRules {
            weekly_hours_threshold: Decimal::new(40, 0),
            rollover_lookback_days: 5,
            off_work_name: "OFF".to_string(),
        }
    }
}

/// Rules binding leave codes to engine behavior.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LeaveRules {
    /// Code of the bereavement leave, which uses the filing-date grace rule
    /// instead of the submission window.
    pub bereavement_code: String,
    /// Days after the leave end within which a bereavement leave may still
    /// be filed.
    pub bereavement_grace_days: i64,
    /// Leave codes whose usage charges a quota balance, and which balance.
    pub quota_codes: HashMap<String, LeaveCategory>,
    /// Attendance code used for a leave day whose code is unknown.
    pub fallback_leave_code: String,
}

impl Default for LeaveRules {
    fn default() -> Self {
        let mut quota_codes = HashMap::new();
        quota_codes.insert("CTT".to_string(), LeaveCategory::Annual);
        quota_codes.insert("CTP".to_string(), LeaveCategory::Pass);
        quota_codes.insert("CTB".to_string(), LeaveCategory::Bonus);
        LeaveRules {
            bereavement_code: "CTD".to_string(),
            bereavement_grace_days: 2,
            quota_codes,
            fallback_leave_code: "L".to_string(),
        }
    }
}

/// The complete engine settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Shift-resolution and rollover rules.
    pub schedule: ScheduleRules,
    /// Leave-code bindings.
    pub leave: LeaveRules,
}

impl EngineSettings {
    /// The quota category charged by a leave code, if the code is tracked.
    pub fn quota_category(&self, leave_code: &str) -> Option<LeaveCategory> {
        self.leave.quota_codes.get(leave_code).copied()
    }

    /// Whether a leave code is the bereavement leave.
    pub fn is_bereavement(&self, leave_code: &str) -> bool {
        leave_code == self.leave.bereavement_code
    }
}
