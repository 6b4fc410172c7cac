//! User archive for Liftlog
//!
//! Deleted users are not removed: their directory is moved to
//! `archived_users/<name>_<timestamp>` and can be brought back later.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::config::paths::LiftlogPaths;
use crate::error::{LiftlogError, LiftlogResult};
use crate::models::Username;
use crate::storage::exercises::ExerciseData;
use crate::storage::file_io::{copy_dir_recursive, read_json_required, remove_dir_if_exists};
use crate::storage::init::init_user_storage;
use crate::storage::workouts::WorkoutData;

use super::manager::{split_timestamped, unique_timestamped_path};

/// One archived copy of a user's directory
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveInfo {
    /// Owner of the archived data
    pub user: Username,
    /// Archive folder
    pub path: PathBuf,
    /// When the user was archived (UTC; local time for legacy folders)
    pub archived_at: NaiveDateTime,
}

/// Manages the archive of deleted users
pub struct ArchiveManager {
    paths: LiftlogPaths,
}

impl ArchiveManager {
    /// Create a new ArchiveManager
    pub fn new(paths: LiftlogPaths) -> Self {
        Self { paths }
    }

    /// Move a user's directory into the archive
    ///
    /// Returns `None` when the user has no directory to move.
    pub fn archive_user(&self, user: &Username) -> LiftlogResult<Option<ArchiveInfo>> {
        let source = self.paths.user_dir(user);
        if !source.exists() {
            tracing::warn!(user = %user, "User has no data directory to archive");
            return Ok(None);
        }

        let archive_dir = self.paths.archive_dir();
        fs::create_dir_all(&archive_dir).map_err(|e| {
            LiftlogError::Io(format!("Failed to create archive directory: {}", e))
        })?;

        let prefix = format!("{}_", user.as_str());
        let (target, archived_at) = unique_timestamped_path(&archive_dir, &prefix);

        fs::rename(&source, &target).map_err(|e| {
            LiftlogError::Io(format!(
                "Failed to move {} to {}: {}",
                source.display(),
                target.display(),
                e
            ))
        })?;

        tracing::info!(user = %user, path = %target.display(), "Archived user data");

        Ok(Some(ArchiveInfo {
            user: user.clone(),
            path: target,
            archived_at,
        }))
    }

    /// All well-formed archive folders, oldest first
    pub fn list_archives(&self) -> LiftlogResult<Vec<ArchiveInfo>> {
        let archive_dir = self.paths.archive_dir();
        if !archive_dir.exists() {
            return Ok(Vec::new());
        }

        let mut archives = Vec::new();

        for entry in fs::read_dir(&archive_dir).map_err(|e| {
            LiftlogError::Io(format!("Failed to read archive directory: {}", e))
        })? {
            let entry = entry.map_err(|e| {
                LiftlogError::Io(format!("Failed to read directory entry: {}", e))
            })?;

            let path = entry.path();
            if path.is_dir() {
                if let Some(info) = parse_archive_info(&path) {
                    archives.push(info);
                }
            }
        }

        archives.sort_by(|a, b| {
            a.user
                .cmp(&b.user)
                .then_with(|| a.archived_at.cmp(&b.archived_at))
        });

        Ok(archives)
    }

    /// Sorted, de-duplicated names of users with at least one archive
    pub fn list_archived_users(&self) -> LiftlogResult<Vec<Username>> {
        let names: BTreeSet<Username> = self
            .list_archives()?
            .into_iter()
            .map(|info| info.user)
            .collect();
        Ok(names.into_iter().collect())
    }

    /// The most recent archive for a user
    ///
    /// Only folders whose name is exactly `<user>_<timestamp>` match, so
    /// `bob` never picks up `bob_smith`'s archives.
    pub fn latest_for(&self, user: &Username) -> LiftlogResult<Option<ArchiveInfo>> {
        Ok(self
            .list_archives()?
            .into_iter()
            .filter(|info| &info.user == user)
            .max_by_key(|info| info.archived_at))
    }

    /// Copy an archive back into place as the user's live directory
    ///
    /// The copy goes through a staging directory and both data files are
    /// checked before the rename, so a failure leaves no partial user
    /// directory behind. The archive itself is not touched.
    pub fn stage_restore(&self, archive: &ArchiveInfo) -> LiftlogResult<()> {
        let user = &archive.user;
        let target = self.paths.user_dir(user);
        if target.exists() {
            return Err(LiftlogError::Storage(format!(
                "Data directory for '{}' already exists: {}",
                user,
                target.display()
            )));
        }

        let staging = self.paths.restore_staging_dir(user);
        remove_dir_if_exists(&staging)?;

        let result = copy_dir_recursive(&archive.path, &staging)
            .and_then(|_| verify_user_files(&staging))
            .and_then(|_| {
                fs::rename(&staging, &target).map_err(|e| {
                    LiftlogError::Io(format!("Failed to move restored data into place: {}", e))
                })
            })
            .and_then(|_| init_user_storage(&self.paths, user));

        if let Err(e) = result {
            let _ = remove_dir_if_exists(&staging);
            let _ = remove_dir_if_exists(&target);
            return Err(e);
        }

        Ok(())
    }

    /// Delete an archive folder
    pub fn remove_archive(&self, archive: &ArchiveInfo) -> LiftlogResult<()> {
        remove_dir_if_exists(&archive.path)
    }
}

/// Parse `<name>_<timestamp>` folder names, current or legacy stamp
fn parse_archive_info(path: &Path) -> Option<ArchiveInfo> {
    let folder = path.file_name()?.to_string_lossy().to_string();
    let (name, archived_at) = split_timestamped(&folder)?;
    let user = Username::new(name).ok()?;

    // Reject names that only validate after trimming
    if user.as_str() != name {
        return None;
    }

    Some(ArchiveInfo {
        user,
        path: path.to_path_buf(),
        archived_at,
    })
}

/// Check that whichever data files are present parse
fn verify_user_files(dir: &Path) -> LiftlogResult<()> {
    let exercises = dir.join(crate::config::paths::EXERCISES_FILE_NAME);
    if exercises.exists() {
        read_json_required::<ExerciseData, _>(&exercises)?;
    }

    let workouts = dir.join(crate::config::paths::WORKOUTS_FILE_NAME);
    if workouts.exists() {
        read_json_required::<WorkoutData, _>(&workouts)?;
    }

    Ok(())
}
