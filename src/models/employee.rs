//! Employee model.
//!
//! This module defines the Employee struct carrying the identity and
//! organizational snapshot that is denormalized onto every attendance row.

use serde::{Deserialize, Serialize};

/// An employee subject to attendance calculation.
///
/// Read-only input to the engine; the identity and organizational fields
/// are copied verbatim onto each produced attendance record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub key: String,
    /// The employee's full name.
    pub full_name: String,
    /// Key of the company the employee belongs to.
    pub company_key: String,
    /// The organizational unit the employee is assigned to.
    pub organization_unit: String,
    /// The employee's position.
    pub position: String,
    /// The employee's title.
    pub title: String,
}
