//! Settings loading functionality.
//!
//! This module provides the [`SettingsLoader`] type for loading engine
//! settings from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::EngineSettings;

/// Loads and provides access to engine settings.
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::SettingsLoader;
///
/// let loader = SettingsLoader::load("./config/engine.yaml").unwrap();
/// let settings = loader.settings();
/// assert_eq!(settings.leave.bereavement_code, "CTD");
/// ```
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    settings: EngineSettings,
}

impl SettingsLoader {
    /// Loads settings from the specified YAML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the settings file (e.g. "./config/engine.yaml")
    ///
    /// # Returns
    ///
    /// Returns a `SettingsLoader` on success, or an error if the file is
    /// missing or contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let settings =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        Ok(Self { settings })
    }

    /// Builds a loader around compiled-in defaults, for callers without a
    /// settings file.
    pub fn with_defaults() -> Self {
        Self {
            settings: EngineSettings::default(),
        }
    }

    /// Returns the loaded settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reports_config_not_found() {
        let result = SettingsLoader::load("/definitely/not/here.yaml");
        assert!(matches!(result, Err(EngineError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_with_defaults_exposes_default_settings() {
        let loader = SettingsLoader::with_defaults();
        assert_eq!(loader.settings().schedule.rollover_lookback_days, 5);
    }

    #[test]
    fn test_load_shipped_settings_file() {
        let loader = SettingsLoader::load("./config/engine.yaml").unwrap();
        assert_eq!(loader.settings().leave.bereavement_code, "CTD");
        assert_eq!(
            loader.settings().schedule.weekly_hours_threshold,
            rust_decimal::Decimal::new(40, 0)
        );
    }
}
