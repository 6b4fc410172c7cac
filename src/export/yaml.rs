//! YAML snapshot export
//!
//! Human-readable rendering of a snapshot. Import only reads JSON.

use std::io::Write;

use crate::error::{LiftlogError, LiftlogResult};

use super::snapshot::Snapshot;

/// Write a snapshot as YAML with a short header
pub fn export_snapshot_yaml<W: Write>(snapshot: &Snapshot, writer: &mut W) -> LiftlogResult<()> {
    writeln!(writer, "# Liftlog Snapshot Export").map_err(|e| LiftlogError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", snapshot.timestamp)
        .map_err(|e| LiftlogError::Export(e.to_string()))?;
    writeln!(
        writer,
        "# Users: {}, exercises: {}, workout sets: {}",
        snapshot.users.len(),
        snapshot.exercise_count(),
        snapshot.workout_count()
    )
    .map_err(|e| LiftlogError::Export(e.to_string()))?;
    writeln!(writer, "# Contains protection codes - keep it private.")
        .map_err(|e| LiftlogError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| LiftlogError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, snapshot).map_err(|e| LiftlogError::Export(e.to_string()))?;

    Ok(())
}
