//! Append-only JSONL audit log
//!
//! One entry per line. Writers append and flush; readers stream the file and
//! keep only what they were asked for.

use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{LiftlogError, LiftlogResult};

use super::entry::AuditEntry;

/// Writer and reader for the audit log file
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one entry
    pub fn log(&self, entry: &AuditEntry) -> LiftlogResult<()> {
        self.log_batch(std::slice::from_ref(entry))
    }

    /// Append several entries with a single flush
    ///
    /// Every entry is serialized before the file is touched, so a bad entry
    /// writes nothing.
    pub fn log_batch(&self, entries: &[AuditEntry]) -> LiftlogResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut buffer = String::new();
        for entry in entries {
            let line = serde_json::to_string(entry).map_err(|e| {
                LiftlogError::Json(format!("Failed to serialize audit entry: {}", e))
            })?;
            buffer.push_str(&line);
            buffer.push('\n');
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| LiftlogError::Io(format!("Failed to open audit log: {}", e)))?;

        file.write_all(buffer.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| LiftlogError::Io(format!("Failed to write audit log: {}", e)))
    }

    /// Every entry, oldest first
    pub fn read_all(&self) -> LiftlogResult<Vec<AuditEntry>> {
        let mut entries = Vec::new();
        self.for_each_entry(|entry| entries.push(entry))?;
        Ok(entries)
    }

    /// The last `limit` entries, oldest first
    ///
    /// With `user` set only entries about that user are kept: their own
    /// exercises and sets plus the events on their account.
    pub fn read_recent(&self, limit: usize, user: Option<&str>) -> LiftlogResult<Vec<AuditEntry>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut window = VecDeque::with_capacity(limit.min(256));
        self.for_each_entry(|entry| {
            if user.map_or(true, |name| entry.concerns(name)) {
                if window.len() == limit {
                    window.pop_front();
                }
                window.push_back(entry);
            }
        })?;

        Ok(window.into())
    }

    /// Whether anything has been logged yet
    pub fn exists(&self) -> bool {
        self.log_path.exists()
    }

    fn for_each_entry(&self, mut f: impl FnMut(AuditEntry)) -> LiftlogResult<()> {
        if !self.log_path.exists() {
            return Ok(());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| LiftlogError::Io(format!("Failed to open audit log: {}", e)))?;

        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line_num = index + 1;
            let line = line.map_err(|e| {
                LiftlogError::Io(format!("Failed to read audit log line {}: {}", line_num, e))
            })?;
            if line.trim().is_empty() {
                continue;
            }

            let entry = serde_json::from_str(&line).map_err(|e| {
                LiftlogError::Json(format!(
                    "Failed to parse audit entry at line {}: {}",
                    line_num, e
                ))
            })?;
            f(entry);
        }

        Ok(())
    }
}
