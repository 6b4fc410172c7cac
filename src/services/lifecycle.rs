//! User lifecycle service
//!
//! Full backups, deleting users into the archive, restoring them, and
//! whole-system snapshot export/import.
//!
//! ```text
//! ACTIVE --delete(code)--> ARCHIVED --restore--> ACTIVE
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::PathBuf;

use crate::audit::{AuditEntry, EntityType, Operation};
use crate::backup::{ArchiveInfo, BackupInfo};
use crate::error::{LiftlogError, LiftlogResult};
use crate::export::{Snapshot, UserData};
use crate::models::{User, Username};
use crate::storage::exercises::ExerciseData;
use crate::storage::file_io::{remove_dir_if_exists, write_json_atomic};
use crate::storage::workouts::WorkoutData;
use crate::storage::{init_user_storage, Storage, UserStore};

use super::user::{audit_view, parse_username};

/// Result of a snapshot import
#[derive(Debug, Clone)]
pub struct SnapshotImportResult {
    /// Backup taken before the import
    pub backup_path: PathBuf,
    /// Users now registered
    pub users: usize,
    /// Exercises written across all users
    pub exercises: usize,
    /// Workout sets written across all users
    pub workouts: usize,
    /// Directories removed because their user is no longer registered
    pub removed_users: Vec<String>,
}

impl SnapshotImportResult {
    /// Get a summary of what was imported
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Restored {} users ({} exercises, {} workout sets)",
            self.users, self.exercises, self.workouts
        );
        if !self.removed_users.is_empty() {
            summary.push_str(&format!(
                "; removed data for {}",
                self.removed_users.join(", ")
            ));
        }
        summary
    }
}

/// Service for backups, archives and snapshots
pub struct LifecycleService<'a> {
    storage: &'a Storage,
}

impl<'a> LifecycleService<'a> {
    /// Create a new lifecycle service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    fn active_names(&self) -> LiftlogResult<Vec<Username>> {
        Ok(self
            .storage
            .registry
            .get_all()?
            .into_iter()
            .map(|u| u.name)
            .collect())
    }

    /// Back up the registry and every active user, then apply retention
    pub fn backup_all(&self) -> LiftlogResult<PathBuf> {
        let users = self.active_names()?;
        let (path, pruned) = self
            .storage
            .backup_manager()
            .create_backup_with_retention(&users)?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.storage.log(AuditEntry::event(
            Operation::Create,
            EntityType::Backup,
            name,
            format!("{} users backed up, {} old backups pruned", users.len(), pruned.len()),
        ))?;

        tracing::info!(path = %path.display(), pruned = pruned.len(), "Created full backup");
        Ok(path)
    }

    /// Available backups, newest first
    pub fn list_backups(&self) -> LiftlogResult<Vec<BackupInfo>> {
        self.storage.backup_manager().list_backups()
    }

    /// Delete a user, moving their data into the archive
    ///
    /// The protection code is checked first; a wrong code or unknown user
    /// changes nothing. On success a full backup is taken before the user is
    /// removed from the registry and their directory is archived.
    pub fn delete_user(&self, name: &str, code: &str) -> LiftlogResult<Option<ArchiveInfo>> {
        let name = parse_username(name)?;
        let user = self.storage.require_user(&name)?;

        if !user.verify_code(code) {
            tracing::warn!(user = %name, "Rejected delete with incorrect protection code");
            return Err(LiftlogError::InvalidCode(name.to_string()));
        }

        self.backup_all()?;

        let archive = self.storage.with_user_lock(&name, || {
            let before = self.storage.registry.get_all()?;
            self.storage.registry.remove(&name)?;
            if let Err(e) = self.storage.registry.save() {
                self.storage.registry.replace_all(before)?;
                return Err(e);
            }

            match self.storage.archive_manager().archive_user(&name) {
                Ok(archive) => Ok(archive),
                Err(e) => {
                    // The directory stayed in place, so the user must too
                    self.storage.registry.replace_all(before)?;
                    self.storage.registry.save()?;
                    tracing::warn!(user = %name, error = %e, "Archiving failed, user kept");
                    Err(e)
                }
            }
        })?;

        let note = match &archive {
            Some(info) => format!("archived to {}", info.path.display()),
            None => "no data directory to archive".to_string(),
        };
        let mut entry = AuditEntry::event(Operation::Archive, EntityType::User, name.as_str(), note);
        entry.before = Some(audit_view(&user));
        self.storage.log(entry)?;

        tracing::info!(user = %name, "Deleted user");
        Ok(archive)
    }

    /// Usernames with at least one archive, sorted
    pub fn list_archived(&self) -> LiftlogResult<Vec<Username>> {
        self.storage.archive_manager().list_archived_users()
    }

    /// Restore the most recent archive of a deleted user
    ///
    /// The user comes back with a new id and a new protection code. The
    /// archive folder is deleted only once the user is registered again.
    pub fn restore_user(&self, name: &str) -> LiftlogResult<User> {
        let name = parse_username(name)?;

        if self.storage.registry.contains(&name)? {
            return Err(LiftlogError::user_exists(name.as_str()));
        }

        let archives = self.storage.archive_manager();
        let archive = archives
            .latest_for(&name)?
            .ok_or_else(|| LiftlogError::archive_not_found(name.as_str()))?;

        let user = self.storage.with_user_lock(&name, || {
            archives.stage_restore(&archive)?;

            let user = self.storage.registry.create(name.clone())?;
            if let Err(e) = self.storage.registry.save() {
                self.storage.registry.remove(&name)?;
                let _ = remove_dir_if_exists(&self.storage.paths().user_dir(&name));
                return Err(e);
            }
            Ok(user)
        })?;

        if let Err(e) = archives.remove_archive(&archive) {
            tracing::warn!(
                path = %archive.path.display(),
                error = %e,
                "User restored but the archive folder could not be removed"
            );
        }

        let mut entry = AuditEntry::event(
            Operation::Restore,
            EntityType::User,
            name.as_str(),
            format!("restored from {}", archive.path.display()),
        );
        entry.after = Some(audit_view(&user));
        self.storage.log(entry)?;

        tracing::info!(user = %name, id = user.id, "Restored user");
        Ok(user)
    }

    /// Capture the registry and every active user's collections
    ///
    /// Users whose files cannot be read are left out of `user_data`.
    pub fn export_snapshot(&self) -> LiftlogResult<Snapshot> {
        let users = self.storage.registry.get_all()?;
        let mut user_data = BTreeMap::new();

        for user in &users {
            let loaded = self.storage.with_user_lock(&user.name, || {
                let store = UserStore::open(self.storage.paths(), &user.name)?;
                Ok(UserData {
                    exercises: store.exercises.get_all()?,
                    workouts: store.workouts.get_all()?,
                })
            });

            match loaded {
                Ok(data) => {
                    user_data.insert(user.name.to_string(), data);
                }
                Err(e) => {
                    tracing::warn!(user = %user.name, error = %e, "Skipping unreadable user in snapshot");
                }
            }
        }

        Ok(Snapshot::new(users, user_data))
    }

    /// Replace the whole system with a snapshot
    ///
    /// The snapshot is validated in full before anything changes, and a
    /// backup of the current state is taken first. This is a replace, not a
    /// merge: users absent from the snapshot lose their live directory (it
    /// survives in the backup).
    pub fn import_snapshot(&self, snapshot: Snapshot) -> LiftlogResult<SnapshotImportResult> {
        snapshot.validate().map_err(LiftlogError::Import)?;

        let backup_path = self.backup_all()?;

        self.storage.registry.replace_all(snapshot.users.clone())?;
        self.storage.registry.save()?;

        let paths = self.storage.paths();
        let mut exercises = 0;
        let mut workouts = 0;

        for user in &snapshot.users {
            self.storage.with_user_lock(&user.name, || {
                match snapshot.user_data.get(user.name.as_str()) {
                    Some(data) => {
                        write_json_atomic(
                            paths.exercises_file(&user.name),
                            &ExerciseData {
                                exercises: data.exercises.clone(),
                            },
                        )?;
                        write_json_atomic(
                            paths.workouts_file(&user.name),
                            &WorkoutData {
                                workouts: data.workouts.clone(),
                            },
                        )?;
                        exercises += data.exercises.len();
                        workouts += data.workouts.len();
                        Ok(())
                    }
                    None => init_user_storage(paths, &user.name),
                }
            })?;
        }

        let removed_users = self.remove_unregistered_dirs(&snapshot.users)?;

        let result = SnapshotImportResult {
            backup_path,
            users: snapshot.users.len(),
            exercises,
            workouts,
            removed_users,
        };

        self.storage.log(AuditEntry::event(
            Operation::Import,
            EntityType::Snapshot,
            snapshot.timestamp.to_string(),
            result.summary(),
        ))?;

        tracing::info!(users = result.users, "Imported snapshot");
        Ok(result)
    }

    /// Delete live user directories that have no registry entry
    fn remove_unregistered_dirs(&self, users: &[User]) -> LiftlogResult<Vec<String>> {
        let users_dir = self.storage.paths().users_dir();
        if !users_dir.exists() {
            return Ok(Vec::new());
        }

        let registered: HashSet<&str> = users.iter().map(|u| u.name.as_str()).collect();
        let mut removed = Vec::new();

        for entry in fs::read_dir(&users_dir)
            .map_err(|e| LiftlogError::Io(format!("Failed to read users directory: {}", e)))?
        {
            let entry = entry
                .map_err(|e| LiftlogError::Io(format!("Failed to read directory entry: {}", e)))?;
            let name = entry.file_name().to_string_lossy().into_owned();

            if !entry.path().is_dir() || name.starts_with('.') || registered.contains(name.as_str()) {
                continue;
            }

            remove_dir_if_exists(&entry.path())?;
            tracing::debug!(user = %name, "Removed data of user not in snapshot");
            removed.push(name);
        }

        removed.sort();
        Ok(removed)
    }
}
