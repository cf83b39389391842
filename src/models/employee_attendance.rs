//! Per-employee shift assignment and leave quota models.
//!
//! An [`EmployeeAttendance`] assigns an employee their default [`Shift`] and
//! optional [`ShiftSchedule`], and carries the quota-tracked leave balances
//! that the calculation charges when quota leave is taken.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::shift::{Shift, ShiftSchedule};
use super::submission::LeaveCategory;

/// A quota-tracked leave balance for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveQuotaDetail {
    /// The leave category the balance tracks.
    pub category: LeaveCategory,
    /// Days already consumed.
    pub used: u32,
    /// Days credited.
    pub credit: u32,
    /// When the credit expires, if it does.
    #[serde(default)]
    pub expired_on: Option<NaiveDate>,
}

impl LeaveQuotaDetail {
    /// Days still available in this balance.
    pub fn remaining(&self) -> u32 {
        self.credit.saturating_sub(self.used)
    }
}

/// An employee's shift assignment plus quota balances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeAttendance {
    /// The employee this assignment belongs to.
    pub employee_key: String,
    /// The default shift (day-of-week work patterns).
    pub shift: Shift,
    /// Optional per-date schedule overriding the default shift.
    #[serde(default)]
    pub schedule: Option<ShiftSchedule>,
    /// Quota-tracked leave balances.
    #[serde(default)]
    pub quotas: Vec<LeaveQuotaDetail>,
}

impl EmployeeAttendance {
    /// Finds the quota balance for a leave category.
    pub fn quota(&self, category: LeaveCategory) -> Option<&LeaveQuotaDetail> {
        self.quotas.iter().find(|q| q.category == category)
    }

    /// Charges one day against the quota balance for a leave category.
    ///
    /// Missing balances are left untouched; the day still counts as leave.
    pub fn charge_quota(&mut self, category: LeaveCategory) {
        if let Some(quota) = self.quotas.iter_mut().find(|q| q.category == category) {
            quota.used += 1;
        }
    }
}
