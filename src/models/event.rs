//! Raw check event models.
//!
//! Two competing sources produce check events: the mobile app (GPS-stamped
//! [`AttendancePointApp`]) and biometric devices ([`AttendanceLogMachine`]).
//! The event reconciler selects the authoritative check-in/check-out pair
//! per employee-day from these streams.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// The direction/kind of a raw check event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InOutMode {
    /// Start-of-day check-in.
    CheckIn,
    /// End-of-day check-out.
    CheckOut,
    /// Break start.
    BreakIn,
    /// Break end.
    BreakOut,
    /// Overtime start.
    OvertimeIn,
    /// Overtime end.
    OvertimeOut,
}

/// A raw mobile-app check event with GPS coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendancePointApp {
    /// The employee who produced the event.
    pub employee_key: String,
    /// When the event was recorded.
    pub timestamp: NaiveDateTime,
    /// GPS latitude at the time of the event.
    pub latitude: f64,
    /// GPS longitude at the time of the event.
    pub longitude: f64,
    /// The event direction.
    pub mode: InOutMode,
}

impl AttendancePointApp {
    /// The calendar date the event falls on.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// The time of day the event was recorded.
    pub fn time(&self) -> NaiveTime {
        self.timestamp.time()
    }
}

/// A raw biometric-device check event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceLogMachine {
    /// The employee who produced the event.
    pub employee_key: String,
    /// When the event was recorded.
    pub timestamp: NaiveDateTime,
    /// The event direction.
    pub mode: InOutMode,
}

impl AttendanceLogMachine {
    /// The calendar date the event falls on.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// The time of day the event was recorded.
    pub fn time(&self) -> NaiveTime {
        self.timestamp.time()
    }
}
