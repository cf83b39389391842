//! Date range model.
//!
//! This module contains the [`DateRange`] type that defines the calculation
//! window for an engine run.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// An inclusive calendar date range.
///
/// # Example
///
/// ```
/// use attendance_engine::models::DateRange;
/// use chrono::NaiveDate;
///
/// let range = DateRange {
///     start: NaiveDate::from_ymd_opt(2026, 2, 2).unwrap(),
///     end: NaiveDate::from_ymd_opt(2026, 2, 8).unwrap(),
/// };
/// assert!(range.contains(NaiveDate::from_ymd_opt(2026, 2, 5).unwrap()));
/// assert_eq!(range.iter_days().count(), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// The start date (inclusive).
    pub start: NaiveDate,
    /// The end date (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Validates that the range runs forwards.
    pub fn validate(&self) -> EngineResult<()> {
        if self.start > self.end {
            return Err(EngineError::InvalidDateRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Checks if a given date falls within this range, inclusive of both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Iterates every calendar day in the range, start to end inclusive.
    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let mut current = Some(self.start);
        let end = self.end;
        std::iter::from_fn(move || {
            let date = current?;
            if date > end {
                return None;
            }
            current = date.checked_add_days(Days::new(1));
            Some(date)
        })
    }

    /// The number of calendar days in the range.
    pub fn day_count(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}
