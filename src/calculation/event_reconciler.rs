//! Check event reconciliation.
//!
//! For a single employee-day, selects the authoritative check-in and
//! check-out from two competing raw sources: mobile-app GPS pings and
//! biometric machine logs. App events win whenever one exists for the day.
//! Device tie-breaks are asymmetric on purpose: the *latest* device check-in
//! but the *earliest* device check-out — confirmed upstream behavior, do not
//! normalize.

use chrono::{NaiveDate, NaiveTime};

use crate::models::{AttendanceLogMachine, AttendancePointApp, InOutMode};

/// The source that supplied a reconciled event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventSource {
    /// The mobile app, with the GPS fix attached to the event.
    MobileApp {
        /// GPS latitude of the event.
        latitude: f64,
        /// GPS longitude of the event.
        longitude: f64,
    },
    /// A biometric device.
    Machine,
}

/// An authoritative check event for one employee-day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedEvent {
    /// Time of day the event was recorded.
    pub time: NaiveTime,
    /// Which source supplied the event.
    pub source: EventSource,
}

/// Selects the authoritative check-in for a day.
///
/// Prefers the app event dated to `date` with check-in mode; otherwise the
/// latest device check-in on `date`; otherwise none.
pub fn resolve_check_in(
    date: NaiveDate,
    app_events: &[AttendancePointApp],
    machine_events: &[AttendanceLogMachine],
) -> Option<ResolvedEvent> {
    if let Some(event) = app_events
        .iter()
        .find(|e| e.date() == date && e.mode == InOutMode::CheckIn)
    {
        return Some(ResolvedEvent {
            time: event.time(),
            source: EventSource::MobileApp {
                latitude: event.latitude,
                longitude: event.longitude,
            },
        });
    }

    machine_events
        .iter()
        .filter(|e| e.date() == date && e.mode == InOutMode::CheckIn)
        .max_by_key(|e| e.timestamp)
        .map(|event| ResolvedEvent {
            time: event.time(),
            source: EventSource::Machine,
        })
}

/// Selects the authoritative check-out for a day.
///
/// Prefers the app event dated to `date` with check-out mode; otherwise the
/// *earliest* device check-out on `date`; otherwise none.
pub fn resolve_check_out(
    date: NaiveDate,
    app_events: &[AttendancePointApp],
    machine_events: &[AttendanceLogMachine],
) -> Option<ResolvedEvent> {
    if let Some(event) = app_events
        .iter()
        .find(|e| e.date() == date && e.mode == InOutMode::CheckOut)
    {
        return Some(ResolvedEvent {
            time: event.time(),
            source: EventSource::MobileApp {
                latitude: event.latitude,
                longitude: event.longitude,
            },
        });
    }

    machine_events
        .iter()
        .filter(|e| e.date() == date && e.mode == InOutMode::CheckOut)
        .min_by_key(|e| e.timestamp)
        .map(|event| ResolvedEvent {
            time: event.time(),
            source: EventSource::Machine,
        })
}
