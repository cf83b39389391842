//! Error types for the attendance calculation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during attendance calculation.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the attendance calculation engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A date range had its end before its start.
    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange {
        /// The requested start date.
        start: NaiveDate,
        /// The requested end date.
        end: NaiveDate,
    },

    /// A shift detail carried a time-of-day string that could not be parsed.
    #[error("Invalid time '{value}' on shift detail '{detail_key}'")]
    InvalidShiftTime {
        /// The key of the shift detail carrying the bad value.
        detail_key: String,
        /// The raw time string that failed to parse.
        value: String,
    },

    /// A permit or overtime letter carried an unparseable time-of-day string.
    #[error("Invalid time '{value}' on {kind} for employee '{employee_key}'")]
    InvalidSubmissionTime {
        /// The kind of transaction ("late permit", "overtime letter", ...).
        kind: String,
        /// The employee the transaction belongs to.
        employee_key: String,
        /// The raw time string that failed to parse.
        value: String,
    },

    /// No shift assignment exists for an employee in the calculation set.
    #[error("No shift assignment found for employee '{employee_key}'")]
    MissingShiftAssignment {
        /// The employee without an assignment.
        employee_key: String,
    },

    /// The backing store rejected a query or commit.
    #[error("Repository error: {message}")]
    RepositoryError {
        /// A description of the failure.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
