//! Holiday models.
//!
//! A [`Holiday`] is a named date (or date range) scoped to a set of company
//! keys. Before calculation, ranges are expanded to one [`HolidayInstance`]
//! per day, each inheriting name, description, and company set.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// A named holiday covering one or more consecutive days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// The holiday name.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// The first day of the holiday.
    pub date_start: NaiveDate,
    /// Number of consecutive days the holiday covers (at least 1).
    #[serde(default = "default_duration")]
    pub duration_days: u32,
    /// Keys of the companies the holiday applies to.
    #[serde(default)]
    pub company_keys: Vec<String>,
}

fn default_duration() -> u32 {
    1
}

impl Holiday {
    /// Expands the holiday to one instance per covered day.
    ///
    /// A multi-day holiday of duration N produces N instances, one per
    /// offset day, each inheriting name, description, and company set.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::Holiday;
    /// use chrono::NaiveDate;
    ///
    /// let holiday = Holiday {
    ///     name: "Idul Fitri".to_string(),
    ///     description: "Joint holiday".to_string(),
    ///     date_start: NaiveDate::from_ymd_opt(2026, 3, 20).unwrap(),
    ///     duration_days: 3,
    ///     company_keys: vec!["comp_01".to_string()],
    /// };
    ///
    /// let instances = holiday.expand();
    /// assert_eq!(instances.len(), 3);
    /// assert_eq!(instances[2].date, NaiveDate::from_ymd_opt(2026, 3, 22).unwrap());
    /// assert_eq!(instances[2].name, "Idul Fitri");
    /// ```
    pub fn expand(&self) -> Vec<HolidayInstance> {
        (0..self.duration_days.max(1))
            .filter_map(|offset| {
                self.date_start
                    .checked_add_days(Days::new(u64::from(offset)))
                    .map(|date| HolidayInstance {
                        name: self.name.clone(),
                        description: self.description.clone(),
                        date,
                        company_keys: self.company_keys.clone(),
                    })
            })
            .collect()
    }
}

/// A single-day holiday instance produced by [`Holiday::expand`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayInstance {
    /// The holiday name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// The day this instance covers.
    pub date: NaiveDate,
    /// Keys of the companies the holiday applies to.
    pub company_keys: Vec<String>,
}

impl HolidayInstance {
    /// Whether this holiday applies to an employee of the given company.
    pub fn applies_to_company(&self, company_key: &str) -> bool {
        self.company_keys.iter().any(|k| k == company_key)
    }
}
