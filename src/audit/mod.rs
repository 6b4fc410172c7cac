//! Audit logging system for Liftlog
//!
//! Records every mutation (users, exercises, workout sets, backups and
//! snapshot imports) with before/after values in an append-only audit log.
//!
//! # Architecture
//!
//! - `AuditEntry`: a single audit log entry with timestamp, operation,
//!   entity information, the owning user and optional before/after values.
//! - `AuditLogger`: writes entries to the audit log file using a
//!   line-delimited JSON format (JSONL).
//!
//! # Example
//!
//! ```rust,ignore
//! use liftlog::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(audit_log_path);
//!
//! let entry = AuditEntry::create(EntityType::Exercise, "bench press", &exercise)
//!     .for_user("alice");
//! logger.log(&entry)?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
