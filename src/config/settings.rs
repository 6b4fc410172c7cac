//! User settings for Liftlog
//!
//! Manages preferences such as backup retention, the optional shared access
//! password and display formats.

use serde::{Deserialize, Serialize};

use super::paths::LiftlogPaths;
use crate::error::LiftlogError;
use crate::storage::file_io::write_json_atomic;

/// Settings for Liftlog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Number of full backups to keep
    #[serde(default = "default_backup_retention")]
    pub backup_retention: usize,

    /// Shared password gating the CLI (disabled when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_password: Option<String>,

    /// Date format for table column headers (strftime format)
    #[serde(default = "default_display_date_format")]
    pub display_date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_backup_retention() -> usize {
    5
}

fn default_display_date_format() -> String {
    "%d %b".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            backup_retention: default_backup_retention(),
            access_password: None,
            display_date_format: default_display_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &LiftlogPaths) -> Result<Self, LiftlogError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                LiftlogError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                LiftlogError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            if settings.backup_retention == 0 {
                return Err(LiftlogError::Config(
                    "backup_retention must be at least 1".into(),
                ));
            }

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LiftlogPaths) -> Result<(), LiftlogError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Whether the CLI requires the shared password
    pub fn is_access_gated(&self) -> bool {
        self.access_password
            .as_deref()
            .is_some_and(|p| !p.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.backup_retention, 5);
        assert!(settings.access_password.is_none());
        assert!(!settings.is_access_gated());
        assert_eq!(settings.display_date_format, "%d %b");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LiftlogPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.backup_retention = 3;
        settings.access_password = Some("hunter2".into());

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.backup_retention, 3);
        assert!(loaded.is_access_gated());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LiftlogPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "{}").unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.schema_version, 1);
        assert_eq!(loaded.backup_retention, 5);
    }

    #[test]
    fn test_zero_retention_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LiftlogPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"backup_retention": 0}"#).unwrap();

        assert!(matches!(
            Settings::load_or_create(&paths),
            Err(LiftlogError::Config(_))
        ));
    }
}
