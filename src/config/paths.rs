//! Path management for Liftlog
//!
//! Every file location is derived from a single base directory.
//!
//! ## Path Resolution Order
//!
//! 1. `LIFTLOG_DATA_DIR` environment variable (if set)
//! 2. The platform config directory (`~/.config/liftlog` on Linux,
//!    `~/Library/Application Support/liftlog` on macOS, `%APPDATA%\liftlog`
//!    on Windows)
//!
//! ## Layout
//!
//! ```text
//! <base>/config.json
//! <base>/audit.log
//! <base>/data/users.json
//! <base>/data/users/<name>/exercises.json
//! <base>/data/users/<name>/workouts.json
//! <base>/data/archived_users/<name>_<timestamp>/
//! <base>/backups/backup_<timestamp>/
//! ```

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::LiftlogError;
use crate::models::Username;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "LIFTLOG_DATA_DIR";

/// Manages all paths used by Liftlog
#[derive(Debug, Clone)]
pub struct LiftlogPaths {
    /// Base directory for all Liftlog data
    base_dir: PathBuf,
}

impl LiftlogPaths {
    /// Create a new LiftlogPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no platform config directory can be determined.
    pub fn new() -> Result<Self, LiftlogError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create LiftlogPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the directory holding one subdirectory per active user
    pub fn users_dir(&self) -> PathBuf {
        self.data_dir().join("users")
    }

    /// Get the archive directory for deleted users
    pub fn archive_dir(&self) -> PathBuf {
        self.data_dir().join("archived_users")
    }

    /// Get the backup directory (`<base>/backups/`)
    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to the user registry
    pub fn users_file(&self) -> PathBuf {
        self.data_dir().join("users.json")
    }

    /// Get a user's data directory
    pub fn user_dir(&self, user: &Username) -> PathBuf {
        self.users_dir().join(user.as_str())
    }

    /// Get the path to a user's exercises.json
    pub fn exercises_file(&self, user: &Username) -> PathBuf {
        self.user_dir(user).join(EXERCISES_FILE_NAME)
    }

    /// Get the path to a user's workouts.json
    pub fn workouts_file(&self, user: &Username) -> PathBuf {
        self.user_dir(user).join(WORKOUTS_FILE_NAME)
    }

    /// Staging directory used while restoring a user from the archive
    ///
    /// Usernames cannot start with a dot, so this never collides with a
    /// real user directory.
    pub fn restore_staging_dir(&self, user: &Username) -> PathBuf {
        self.users_dir().join(format!(".restore-{}", user.as_str()))
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), LiftlogError> {
        for dir in [
            self.base_dir.clone(),
            self.data_dir(),
            self.users_dir(),
            self.archive_dir(),
            self.backup_dir(),
        ] {
            std::fs::create_dir_all(&dir).map_err(|e| {
                LiftlogError::Io(format!(
                    "Failed to create directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
        }

        Ok(())
    }

    /// Check if Liftlog has been initialized (registry exists)
    pub fn is_initialized(&self) -> bool {
        self.users_file().exists()
    }
}

/// File name of the per-user exercise catalog
pub const EXERCISES_FILE_NAME: &str = "exercises.json";

/// File name of the per-user workout log
pub const WORKOUTS_FILE_NAME: &str = "workouts.json";

/// Resolve the default base directory from the platform conventions
fn resolve_default_path() -> Result<PathBuf, LiftlogError> {
    ProjectDirs::from("", "", "liftlog")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| LiftlogError::Config("Could not determine home directory".into()))
}
