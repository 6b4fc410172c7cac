//! Backup system for Liftlog
//!
//! Provides rolling full backups with a count-based retention policy and the
//! archive that deleted users are moved into.
//!
//! # Architecture
//!
//! - `BackupManager`: copies the registry and all user directories into a
//!   `backup_<timestamp>` folder and prunes old ones
//! - `ArchiveManager`: moves a deleted user's directory to
//!   `archived_users/<name>_<timestamp>` and stages it back on restore
//!
//! # Retention Policy
//!
//! The newest `backup_retention` folders (default 5) are kept; older ones
//! are deleted oldest first. Stamps are UTC, and folders written by older
//! versions (`backup_YYYYMMDD_HHMMSS`) are still recognised.
//!
//! # Example
//!
//! ```rust,ignore
//! use liftlog::backup::BackupManager;
//! use liftlog::config::paths::LiftlogPaths;
//!
//! let paths = LiftlogPaths::new()?;
//! let manager = BackupManager::new(paths, 5);
//! let (backup_path, pruned) = manager.create_backup_with_retention(&users)?;
//! ```

mod archive;
mod manager;

pub use archive::{ArchiveInfo, ArchiveManager};
pub use manager::{
    format_timestamp, parse_legacy_timestamp, parse_timestamp, BackupInfo, BackupManager, BACKUP_PREFIX,
    LEGACY_TIMESTAMP_FORMAT, TIMESTAMP_FORMAT,
};
