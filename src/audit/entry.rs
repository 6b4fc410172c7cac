//! Audit entry data structures
//!
//! Defines the structure of audit log entries including operation types,
//! entity types, and the entry format itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Entity was created
    Create,
    /// Entity was updated
    Update,
    /// Entity was deleted
    Delete,
    /// User was moved to the archive
    Archive,
    /// User was brought back from the archive
    Restore,
    /// Data was replaced from an external document
    Import,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
            Operation::Archive => write!(f, "ARCHIVE"),
            Operation::Restore => write!(f, "RESTORE"),
            Operation::Import => write!(f, "IMPORT"),
        }
    }
}

/// Types of entities that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    User,
    Exercise,
    WorkoutSet,
    Backup,
    Snapshot,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::User => write!(f, "User"),
            EntityType::Exercise => write!(f, "Exercise"),
            EntityType::WorkoutSet => write!(f, "WorkoutSet"),
            EntityType::Backup => write!(f, "Backup"),
            EntityType::Snapshot => write!(f, "Snapshot"),
        }
    }
}

/// A single audit log entry
///
/// Records a single operation on an entity with optional before/after values
/// for tracking changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// Type of entity affected
    pub entity_type: EntityType,

    /// Identifier of the affected entity (username, exercise name, set index)
    pub entity_id: String,

    /// User whose data was touched, for per-user entities
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// JSON representation of the entity before the operation (for updates/deletes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<Value>,

    /// JSON representation of the entity after the operation (for creates/updates)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<Value>,

    /// Human-readable diff summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    fn new(operation: Operation, entity_type: EntityType, entity_id: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id: entity_id.into(),
            user: None,
            before: None,
            after: None,
            diff_summary: None,
        }
    }

    /// Create a new audit entry for a create operation
    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity: &T,
    ) -> Self {
        Self {
            after: serde_json::to_value(entity).ok(),
            ..Self::new(Operation::Create, entity_type, entity_id)
        }
    }

    /// Create a new audit entry for an update operation
    ///
    /// The diff summary lists the top-level fields that changed.
    pub fn update<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        before: &T,
        after: &T,
    ) -> Self {
        let before = serde_json::to_value(before).ok();
        let after = serde_json::to_value(after).ok();
        let diff_summary = match (&before, &after) {
            (Some(b), Some(a)) => summarize_changes(b, a),
            _ => None,
        };

        Self {
            before,
            after,
            diff_summary,
            ..Self::new(Operation::Update, entity_type, entity_id)
        }
    }

    /// Create a new audit entry for a delete operation
    pub fn delete<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity: &T,
    ) -> Self {
        Self {
            before: serde_json::to_value(entity).ok(),
            ..Self::new(Operation::Delete, entity_type, entity_id)
        }
    }

    /// Create an entry for a lifecycle event described by a note
    pub fn event(
        operation: Operation,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            diff_summary: Some(note.into()),
            ..Self::new(operation, entity_type, entity_id)
        }
    }

    /// Attach the owning user
    pub fn for_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Whether the entry is about `user`, as owner or as the account itself
    pub fn concerns(&self, user: &str) -> bool {
        match &self.user {
            Some(owner) => owner == user,
            None => self.entity_type == EntityType::User && self.entity_id == user,
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(user) = &self.user {
            output.push_str(&format!(" (user: {})", user));
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  {}", diff));
        }

        output
    }
}

/// Describe changed top-level fields as `field: old -> new`
fn summarize_changes(before: &Value, after: &Value) -> Option<String> {
    let (Value::Object(before_obj), Value::Object(after_obj)) = (before, after) else {
        return (before != after).then(|| format!("{} -> {}", before, after));
    };

    let changes: Vec<String> = before_obj
        .iter()
        .filter_map(|(key, old)| match after_obj.get(key) {
            Some(new) if new != old => Some(format!("{}: {} -> {}", key, old, new)),
            Some(_) => None,
            None => Some(format!("{}: {} -> (removed)", key, old)),
        })
        .chain(
            after_obj
                .iter()
                .filter(|(key, _)| !before_obj.contains_key(*key))
                .map(|(key, new)| format!("{}: (added) -> {}", key, new)),
        )
        .collect();

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(Operation::Archive.to_string(), "ARCHIVE");
        assert_eq!(Operation::Restore.to_string(), "RESTORE");
    }

    #[test]
    fn test_create_entry() {
        let data = json!({"name": "bench press", "muscle_group": "Chest"});
        let entry = AuditEntry::create(EntityType::Exercise, "bench press", &data).for_user("alice");

        assert_eq!(entry.operation, Operation::Create);
        assert_eq!(entry.entity_type, EntityType::Exercise);
        assert_eq!(entry.user.as_deref(), Some("alice"));
        assert!(entry.before.is_none());
        assert!(entry.after.is_some());
    }

    #[test]
    fn test_update_entry_summarizes_changes() {
        let before = json!({"name": "squat", "muscle_group": "Other"});
        let after = json!({"name": "squat", "muscle_group": "Legs"});

        let entry = AuditEntry::update(EntityType::Exercise, "squat", &before, &after);

        assert_eq!(entry.operation, Operation::Update);
        assert_eq!(
            entry.diff_summary.as_deref(),
            Some(r#"muscle_group: "Other" -> "Legs""#)
        );
    }

    #[test]
    fn test_update_without_changes() {
        let value = json!({"name": "squat"});
        let entry = AuditEntry::update(EntityType::Exercise, "squat", &value, &value);
        assert!(entry.diff_summary.is_none());
    }

    #[test]
    fn test_delete_entry() {
        let data = json!({"exercise": "squat", "weight": 100.0, "reps": 5});
        let entry = AuditEntry::delete(EntityType::WorkoutSet, "3", &data);

        assert_eq!(entry.operation, Operation::Delete);
        assert!(entry.before.is_some());
        assert!(entry.after.is_none());
    }

    #[test]
    fn test_serialization() {
        let entry = AuditEntry::event(
            Operation::Archive,
            EntityType::User,
            "alice",
            "archived to alice_20240101-120000-000",
        );

        let json = serde_json::to_string(&entry).unwrap();
        let deserialized: AuditEntry = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.operation, Operation::Archive);
        assert_eq!(deserialized.entity_type, EntityType::User);
        assert!(!json.contains("\"before\""));
    }

    #[test]
    fn test_concerns_owner_or_account() {
        let set = AuditEntry::create(EntityType::WorkoutSet, "0", &json!({})).for_user("alice");
        assert!(set.concerns("alice"));
        assert!(!set.concerns("bob"));

        let account = AuditEntry::event(Operation::Restore, EntityType::User, "bob", "restored");
        assert!(account.concerns("bob"));
        assert!(!account.concerns("alice"));

        let named_after = AuditEntry::create(EntityType::Exercise, "bob", &json!({}));
        assert!(!named_after.concerns("bob"));
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::create(EntityType::WorkoutSet, "0", &json!({})).for_user("alice");

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("CREATE"));
        assert!(formatted.contains("WorkoutSet"));
        assert!(formatted.contains("user: alice"));
    }
}
