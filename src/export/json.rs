//! JSON snapshot export/import
//!
//! JSON is the canonical snapshot format: it is what `backup import` reads.

use std::io::Write;

use crate::error::{LiftlogError, LiftlogResult};

use super::snapshot::Snapshot;

/// Write a snapshot as JSON
pub fn export_snapshot_json<W: Write>(
    snapshot: &Snapshot,
    writer: &mut W,
    pretty: bool,
) -> LiftlogResult<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, snapshot)
    } else {
        serde_json::to_writer(&mut *writer, snapshot)
    }
    .map_err(|e| LiftlogError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| LiftlogError::Export(e.to_string()))?;

    Ok(())
}

/// Parse and validate a JSON snapshot
pub fn import_from_json(json_str: &str) -> LiftlogResult<Snapshot> {
    let snapshot: Snapshot =
        serde_json::from_str(json_str).map_err(|e| LiftlogError::Import(e.to_string()))?;

    snapshot.validate().map_err(LiftlogError::Import)?;

    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::snapshot::UserData;
    use crate::models::{Exercise, MuscleGroup, User, Username, WorkoutSet};
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn sample_snapshot() -> Snapshot {
        let alice = User::new(1, Username::new("alice").unwrap());
        let mut user_data = BTreeMap::new();
        user_data.insert(
            "alice".to_string(),
            UserData {
                exercises: vec![Exercise::new("Bench Press", MuscleGroup::Chest)],
                workouts: vec![WorkoutSet::new(
                    NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
                    "bench press",
                    60.0,
                    5,
                )],
            },
        );
        Snapshot::new(vec![alice], user_data)
    }

    #[test]
    fn test_json_roundtrip() {
        let snapshot = sample_snapshot();

        let mut output = Vec::new();
        export_snapshot_json(&snapshot, &mut output, true).unwrap();
        let json_string = String::from_utf8(output).unwrap();

        let imported = import_from_json(&json_string).unwrap();
        assert_eq!(imported, snapshot);
    }

    #[test]
    fn test_import_rejects_garbage() {
        assert!(matches!(
            import_from_json("not json"),
            Err(LiftlogError::Import(_))
        ));
        assert!(matches!(
            import_from_json(r#"{"users": []}"#),
            Err(LiftlogError::Import(_))
        ));
    }

    #[test]
    fn test_import_runs_validation() {
        let mut snapshot = sample_snapshot();
        snapshot
            .user_data
            .insert("stranger".to_string(), UserData::default());
        let json = serde_json::to_string(&snapshot).unwrap();

        let err = import_from_json(&json).unwrap_err();
        assert!(err.to_string().contains("stranger"));
    }
}
