//! Engine configuration.
//!
//! This module provides the typed [`EngineSettings`] structure and the
//! [`SettingsLoader`] for reading settings from a YAML file.

mod loader;
mod types;

pub use loader::SettingsLoader;
pub use types::{EngineSettings, LeaveRules, ScheduleRules};
