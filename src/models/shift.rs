//! Shift, shift detail, and shift schedule models.
//!
//! A [`Shift`] is a named collection of per-day work patterns for a company;
//! each [`ShiftDetail`] is one day-of-week's pattern (in/out times, late
//! tolerance, break/off flags). A [`ShiftSchedule`] optionally overrides the
//! day-of-week default with a specific detail for a specific calendar date.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The kind of work a shift detail describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkType {
    /// A regular working pattern.
    Work,
    /// A break window inside a working day.
    Break,
    /// A scheduled day off.
    Off,
}

/// Day of week as used by shift details.
///
/// Carries an explicit `Unknown` arm for unmapped values rather than a
/// silent catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Day {
    /// Monday.
    Monday,
    /// Tuesday.
    Tuesday,
    /// Wednesday.
    Wednesday,
    /// Thursday.
    Thursday,
    /// Friday.
    Friday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
    /// Unmapped day value.
    Unknown,
}

impl Day {
    /// Maps a 1-based day number (1 = Monday .. 7 = Sunday) to a [`Day`].
    ///
    /// Any other value maps to [`Day::Unknown`].
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::Day;
    ///
    /// assert_eq!(Day::from_number(1), Day::Monday);
    /// assert_eq!(Day::from_number(7), Day::Sunday);
    /// assert_eq!(Day::from_number(0), Day::Unknown);
    /// assert_eq!(Day::from_number(8), Day::Unknown);
    /// ```
    pub fn from_number(number: u32) -> Self {
        match number {
            1 => Day::Monday,
            2 => Day::Tuesday,
            3 => Day::Wednesday,
            4 => Day::Thursday,
            5 => Day::Friday,
            6 => Day::Saturday,
            7 => Day::Sunday,
            _ => Day::Unknown,
        }
    }

    /// The [`Day`] for a calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        Day::from_weekday(date.weekday())
    }

    /// Maps a chrono weekday to the domain [`Day`].
    pub fn from_weekday(weekday: Weekday) -> Self {
        Day::from_number(weekday.number_from_monday())
    }
}

/// One day-of-week's work pattern inside a shift.
///
/// Scheduled in/out times are stored as strings (as the upstream master data
/// carries them) and parsed to time-of-day values on use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftDetail {
    /// Unique identifier for the detail.
    pub key: String,
    /// The day of week this pattern applies to.
    pub day: Day,
    /// The name of the work pattern (e.g. "PAGI", "OFF").
    pub work_name: String,
    /// The kind of pattern: work, break, or day off.
    pub work_type: WorkType,
    /// Scheduled start time of day, e.g. "08:00".
    pub time_in: String,
    /// Scheduled end time of day, e.g. "17:00".
    pub time_out: String,
    /// Minutes of lateness tolerated before the check-in counts as late.
    #[serde(default)]
    pub late_tolerance_minutes: i64,
    /// Whether the scheduled end falls on the next calendar day.
    #[serde(default)]
    pub is_next_day: bool,
    /// Whether this detail's duration has the day's break windows deducted.
    #[serde(default)]
    pub is_cut_break: bool,
}

impl ShiftDetail {
    /// Parses the scheduled start time of day.
    pub fn in_time(&self) -> EngineResult<NaiveTime> {
        parse_time(&self.time_in).ok_or_else(|| EngineError::InvalidShiftTime {
            detail_key: self.key.clone(),
            value: self.time_in.clone(),
        })
    }

    /// Parses the scheduled end time of day.
    pub fn out_time(&self) -> EngineResult<NaiveTime> {
        parse_time(&self.time_out).ok_or_else(|| EngineError::InvalidShiftTime {
            detail_key: self.key.clone(),
            value: self.time_out.clone(),
        })
    }

    /// The raw scheduled span of this detail in fractional hours.
    ///
    /// Cross-midnight patterns (`is_next_day`) have 24 hours added to the end
    /// time before subtracting. Break-cut deduction is applied by the
    /// working-hours calculator, not here.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::{Day, ShiftDetail, WorkType};
    /// use rust_decimal::Decimal;
    ///
    /// let detail = ShiftDetail {
    ///     key: "sd_mon".to_string(),
    ///     day: Day::Monday,
    ///     work_name: "PAGI".to_string(),
    ///     work_type: WorkType::Work,
    ///     time_in: "08:00".to_string(),
    ///     time_out: "17:00".to_string(),
    ///     late_tolerance_minutes: 10,
    ///     is_next_day: false,
    ///     is_cut_break: false,
    /// };
    /// assert_eq!(detail.span_hours().unwrap(), Decimal::new(90, 1)); // 9.0
    /// ```
    pub fn span_hours(&self) -> EngineResult<Decimal> {
        let time_in = self.in_time()?;
        let time_out = self.out_time()?;
        let mut minutes = (time_out - time_in).num_minutes();
        if self.is_next_day {
            minutes += 24 * 60;
        }
        Ok(Decimal::new(minutes, 0) / Decimal::new(60, 0))
    }
}

/// A named collection of per-day work patterns for a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier for the shift.
    pub key: String,
    /// Key of the company the shift belongs to.
    pub company_key: String,
    /// The shift name.
    pub name: String,
    /// The per-day work patterns.
    #[serde(default)]
    pub details: Vec<ShiftDetail>,
}

impl Shift {
    /// Finds the detail assigned to a day of week, preferring non-break
    /// patterns.
    pub fn detail_for_day(&self, day: Day) -> Option<&ShiftDetail> {
        self.details
            .iter()
            .find(|d| d.day == day && d.work_type != WorkType::Break)
            .or_else(|| self.details.iter().find(|d| d.day == day))
    }

    /// Finds a detail by its key.
    pub fn detail_by_key(&self, key: &str) -> Option<&ShiftDetail> {
        self.details.iter().find(|d| d.key == key)
    }
}

/// One per-date override row inside a shift schedule.
///
/// A missing or empty `shift_detail_key` means "no override, use the
/// day-of-week default".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftScheduleDetail {
    /// The calendar date the override applies to.
    pub date: NaiveDate,
    /// The key of the shift detail to use on that date, if overridden.
    #[serde(default)]
    pub shift_detail_key: Option<String>,
}

impl ShiftScheduleDetail {
    /// The override key, treating an empty string the same as absent.
    pub fn override_key(&self) -> Option<&str> {
        self.shift_detail_key.as_deref().filter(|k| !k.is_empty())
    }
}

/// A per-employee set of per-date shift overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftSchedule {
    /// Unique identifier for the schedule.
    pub key: String,
    /// The schedule name.
    pub name: String,
    /// The per-date override rows.
    #[serde(default)]
    pub details: Vec<ShiftScheduleDetail>,
}

impl ShiftSchedule {
    /// Finds the override row for a calendar date.
    pub fn detail_for_date(&self, date: NaiveDate) -> Option<&ShiftScheduleDetail> {
        self.details.iter().find(|d| d.date == date)
    }
}

fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok()
}
