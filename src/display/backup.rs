//! Backup and audit log display formatting

use tabled::{Table, Tabled};

use crate::audit::AuditEntry;
use crate::backup::BackupInfo;

use super::render;

#[derive(Tabled)]
struct BackupRow<'a> {
    #[tabled(rename = "Backup")]
    name: &'a str,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Users")]
    users: usize,
}

/// Format available backups, newest first
pub fn format_backup_list(backups: &[BackupInfo]) -> String {
    if backups.is_empty() {
        return "No backups found.".to_string();
    }

    let rows = backups.iter().map(|b| BackupRow {
        name: &b.name,
        created: b.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        users: b.user_count,
    });

    render(Table::new(rows))
}

/// Format audit entries one per line
pub fn format_audit_entries(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return "Audit log is empty.".to_string();
    }

    entries
        .iter()
        .map(|e| e.format_human_readable())
        .collect::<Vec<_>>()
        .join("\n")
}
