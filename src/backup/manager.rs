//! Backup manager for Liftlog
//!
//! Handles rolling full backups with a count-based retention policy.
//! Each backup is a `backup_<timestamp>` folder holding a copy of the user
//! registry and every active user's directory.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::paths::LiftlogPaths;
use crate::error::{LiftlogError, LiftlogResult};
use crate::models::Username;
use crate::storage::file_io::{copy_dir_recursive, remove_dir_if_exists};

/// Folder name prefix of a full backup
pub const BACKUP_PREFIX: &str = "backup_";

/// Fixed-width, underscore-free timestamp used in backup and archive names
///
/// Stamps are taken in UTC so lexicographic order of formatted values equals
/// chronological order, DST changes included.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S-%3f";

/// Second-resolution stamp found in folders written by older versions
pub const LEGACY_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Format a timestamp for use in a folder name
pub fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a folder-name timestamp
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    // %3f would accept any width, so pin the shape first
    let bytes = s.as_bytes();
    if bytes.len() != 19 || bytes[8] != b'-' || bytes[15] != b'-' {
        return None;
    }
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).ok()
}

/// Parse an older `YYYYMMDD_HHMMSS` folder stamp
pub fn parse_legacy_timestamp(s: &str) -> Option<NaiveDateTime> {
    let bytes = s.as_bytes();
    if bytes.len() != 15 || bytes[8] != b'_' {
        return None;
    }
    NaiveDateTime::parse_from_str(s, LEGACY_TIMESTAMP_FORMAT).ok()
}

/// Split a `<head>_<stamp>` folder name
///
/// The current stamp is tried first, then the legacy one, which itself
/// contains an underscore.
pub(crate) fn split_timestamped(name: &str) -> Option<(&str, NaiveDateTime)> {
    if let Some((head, stamp)) = name.rsplit_once('_') {
        if let Some(ts) = parse_timestamp(stamp) {
            return Some((head, ts));
        }
    }

    let (rest, time) = name.rsplit_once('_')?;
    let (head, date) = rest.rsplit_once('_')?;
    let ts = parse_legacy_timestamp(&format!("{}_{}", date, time))?;
    Some((head, ts))
}

/// Pick a folder name `<prefix><timestamp>` that does not exist in `dir` yet
///
/// Waits for the clock to move on if the current millisecond is taken.
pub(crate) fn unique_timestamped_path(dir: &Path, prefix: &str) -> (PathBuf, NaiveDateTime) {
    loop {
        let now = Utc::now().naive_utc();
        let path = dir.join(format!("{}{}", prefix, format_timestamp(now)));
        if !path.exists() {
            return (path, now);
        }
        std::thread::sleep(std::time::Duration::from_millis(1));
    }
}

/// Metadata about a backup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupInfo {
    /// Backup folder name
    pub name: String,
    /// Full path to backup
    pub path: PathBuf,
    /// When the backup was created (UTC; local time for legacy folders)
    pub created_at: NaiveDateTime,
    /// Number of user directories in the backup
    pub user_count: usize,
}

/// Manages backup creation and retention
pub struct BackupManager {
    /// Path to backup directory
    backup_dir: PathBuf,
    /// Paths to data files
    paths: LiftlogPaths,
    /// Number of backups to keep
    retention: usize,
}

impl BackupManager {
    /// Create a new BackupManager
    pub fn new(paths: LiftlogPaths, retention: usize) -> Self {
        let backup_dir = paths.backup_dir();
        Self {
            backup_dir,
            paths,
            retention: retention.max(1),
        }
    }

    /// Create a backup of the registry and the given users' directories
    ///
    /// Returns the path to the created backup folder. Users whose directory
    /// is missing are skipped.
    pub fn create_backup(&self, users: &[Username]) -> LiftlogResult<PathBuf> {
        fs::create_dir_all(&self.backup_dir).map_err(|e| {
            LiftlogError::Io(format!("Failed to create backup directory: {}", e))
        })?;

        let (backup_path, _) = unique_timestamped_path(&self.backup_dir, BACKUP_PREFIX);

        // A partial folder would count toward retention
        if let Err(e) = self.copy_into(&backup_path, users) {
            if let Err(cleanup) = remove_dir_if_exists(&backup_path) {
                tracing::warn!(path = %backup_path.display(), error = %cleanup, "Failed to remove partial backup");
            }
            return Err(e);
        }

        tracing::debug!(path = %backup_path.display(), users = users.len(), "Created backup");
        Ok(backup_path)
    }

    fn copy_into(&self, backup_path: &Path, users: &[Username]) -> LiftlogResult<()> {
        let users_target = backup_path.join("users");
        fs::create_dir_all(&users_target)
            .map_err(|e| LiftlogError::Io(format!("Failed to create backup folder: {}", e)))?;

        let registry = self.paths.users_file();
        if registry.exists() {
            fs::copy(&registry, backup_path.join("users.json")).map_err(|e| {
                LiftlogError::Io(format!("Failed to copy user registry: {}", e))
            })?;
        }

        for user in users {
            let source = self.paths.user_dir(user);
            if source.is_dir() {
                copy_dir_recursive(&source, &users_target.join(user.as_str()))?;
            } else {
                tracing::warn!(user = %user, "No data directory to back up");
            }
        }

        Ok(())
    }

    /// List all available backups, newest first
    pub fn list_backups(&self) -> LiftlogResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();

        for entry in fs::read_dir(&self.backup_dir).map_err(|e| {
            LiftlogError::Io(format!("Failed to read backup directory: {}", e))
        })? {
            let entry = entry.map_err(|e| {
                LiftlogError::Io(format!("Failed to read directory entry: {}", e))
            })?;

            let path = entry.path();
            if path.is_dir() {
                if let Some(info) = parse_backup_info(&path) {
                    backups.push(info);
                }
            }
        }

        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.name.cmp(&a.name)));

        Ok(backups)
    }

    /// Enforce retention policy by deleting the oldest backups
    ///
    /// Every `backup_*` folder counts. Folders are ordered by their stamp,
    /// then name; ones whose stamp does not parse count as oldest.
    pub fn enforce_retention(&self) -> LiftlogResult<Vec<PathBuf>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut names: Vec<String> = fs::read_dir(&self.backup_dir)
            .map_err(|e| LiftlogError::Io(format!("Failed to read backup directory: {}", e)))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_dir())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with(BACKUP_PREFIX))
            .collect();
        names.sort_by_cached_key(|name| (split_timestamped(name).map(|(_, ts)| ts), name.clone()));

        let excess = names.len().saturating_sub(self.retention);
        let mut deleted = Vec::new();

        for name in names.into_iter().take(excess) {
            let path = self.backup_dir.join(name);
            remove_dir_if_exists(&path)?;
            tracing::debug!(path = %path.display(), "Removed old backup");
            deleted.push(path);
        }

        Ok(deleted)
    }

    /// Create a backup and then enforce retention policy
    pub fn create_backup_with_retention(
        &self,
        users: &[Username],
    ) -> LiftlogResult<(PathBuf, Vec<PathBuf>)> {
        let backup_path = self.create_backup(users)?;
        let deleted = self.enforce_retention()?;
        Ok((backup_path, deleted))
    }
}

/// Parse backup info from a backup folder
fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let name = path.file_name()?.to_string_lossy().to_string();
    let (head, created_at) = split_timestamped(&name)?;
    if head != BACKUP_PREFIX.trim_end_matches('_') {
        return None;
    }

    let user_count = fs::read_dir(path.join("users"))
        .map(|entries| entries.filter_map(|e| e.ok()).count())
        .unwrap_or(0);

    Some(BackupInfo {
        name,
        path: path.to_path_buf(),
        created_at,
        user_count,
    })
}
