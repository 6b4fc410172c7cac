//! Storage layer for Liftlog
//!
//! Provides JSON file storage with atomic writes, the user registry,
//! per-user collections and automatic directory creation.

pub mod exercises;
pub mod file_io;
pub mod init;
pub mod registry;
pub mod user_store;
pub mod workouts;

pub use exercises::ExerciseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::{init_user_storage, initialize_storage};
pub use registry::UserRegistry;
pub use user_store::UserStore;
pub use workouts::WorkoutRepository;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::backup::{ArchiveManager, BackupManager};
use crate::config::paths::LiftlogPaths;
use crate::config::settings::Settings;
use crate::error::{LiftlogError, LiftlogResult};
use crate::models::{User, Username};

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: LiftlogPaths,
    settings: Settings,
    pub registry: UserRegistry,
    audit: AuditLogger,
    user_locks: Mutex<HashMap<Username, Arc<Mutex<()>>>>,
}

impl Storage {
    /// Create a new Storage instance with settings read from disk
    pub fn new(paths: LiftlogPaths) -> LiftlogResult<Self> {
        let settings = Settings::load_or_create(&paths)?;
        Self::with_settings(paths, settings)
    }

    /// Create a new Storage instance with explicit settings
    pub fn with_settings(paths: LiftlogPaths, settings: Settings) -> LiftlogResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            registry: UserRegistry::new(paths.users_file()),
            audit: AuditLogger::new(paths.audit_log()),
            user_locks: Mutex::new(HashMap::new()),
            settings,
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &LiftlogPaths {
        &self.paths
    }

    /// Get the active settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Load all shared data from disk
    pub fn load_all(&mut self) -> LiftlogResult<()> {
        self.registry.load()
    }

    /// Check if storage has been initialized (registry file exists)
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Look up an active user, failing with NotFound
    pub fn require_user(&self, name: &Username) -> LiftlogResult<User> {
        self.registry
            .get_by_name(name)?
            .ok_or_else(|| LiftlogError::user_not_found(name.as_str()))
    }

    /// The in-process lock guarding one user's files
    fn user_lock(&self, user: &Username) -> LiftlogResult<Arc<Mutex<()>>> {
        let mut locks = self
            .user_locks
            .lock()
            .map_err(|e| LiftlogError::Storage(format!("Failed to acquire user lock table: {}", e)))?;

        Ok(locks.entry(user.clone()).or_default().clone())
    }

    /// Run `f` while holding one user's lock
    pub fn with_user_lock<T>(
        &self,
        user: &Username,
        f: impl FnOnce() -> LiftlogResult<T>,
    ) -> LiftlogResult<T> {
        let lock = self.user_lock(user)?;
        let _guard = lock
            .lock()
            .map_err(|e| LiftlogError::Storage(format!("Failed to acquire user lock: {}", e)))?;

        f()
    }

    /// Run `f` against an active user's loaded store while holding that
    /// user's lock
    ///
    /// Read-modify-write sequences for one user never interleave within the
    /// process.
    pub fn with_user_store<T>(
        &self,
        user: &Username,
        f: impl FnOnce(&UserStore) -> LiftlogResult<T>,
    ) -> LiftlogResult<T> {
        self.require_user(user)?;

        self.with_user_lock(user, || {
            let store = UserStore::open(&self.paths, user)?;
            f(&store)
        })
    }

    /// Backup manager configured with the retention from settings
    pub fn backup_manager(&self) -> BackupManager {
        BackupManager::new(self.paths.clone(), self.settings.backup_retention)
    }

    /// Archive manager for deleted users
    pub fn archive_manager(&self) -> ArchiveManager {
        ArchiveManager::new(self.paths.clone())
    }

    /// Get the audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Record an audit entry
    pub fn log(&self, entry: AuditEntry) -> LiftlogResult<()> {
        self.audit.log(&entry)
    }

    /// Record a create in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        user: Option<&Username>,
        entity: &T,
    ) -> LiftlogResult<()> {
        self.log(with_owner(
            AuditEntry::create(entity_type, entity_id, entity),
            user,
        ))
    }

    /// Record an update in the audit log
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        user: Option<&Username>,
        before: &T,
        after: &T,
    ) -> LiftlogResult<()> {
        self.log(with_owner(
            AuditEntry::update(entity_type, entity_id, before, after),
            user,
        ))
    }

    /// Record a delete in the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        user: Option<&Username>,
        entity: &T,
    ) -> LiftlogResult<()> {
        self.log(with_owner(
            AuditEntry::delete(entity_type, entity_id, entity),
            user,
        ))
    }
}

fn with_owner(entry: AuditEntry, user: Option<&Username>) -> AuditEntry {
    match user {
        Some(user) => entry.for_user(user.as_str()),
        None => entry,
    }
}
