//! Workout log repository for JSON storage
//!
//! Manages loading and saving one user's workouts.json

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LiftlogError;
use crate::models::{normalize_exercise_name, WorkoutSet};

use super::file_io::{read_json_required, write_json_atomic};

/// Serializable workout data structure
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WorkoutData {
    pub workouts: Vec<WorkoutSet>,
}

/// Repository for a user's workout log
pub struct WorkoutRepository {
    path: PathBuf,
    data: RwLock<Vec<WorkoutSet>>,
}

impl WorkoutRepository {
    /// Create a new workout repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load workouts from disk; the file must exist
    pub fn load(&self) -> Result<(), LiftlogError> {
        let file_data: WorkoutData = read_json_required(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| LiftlogError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *data = file_data.workouts;
        Ok(())
    }

    /// Save workouts to disk
    pub fn save(&self) -> Result<(), LiftlogError> {
        let data = self
            .data
            .read()
            .map_err(|e| LiftlogError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = WorkoutData {
            workouts: data.clone(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get all sets in the order they were logged
    pub fn get_all(&self) -> Result<Vec<WorkoutSet>, LiftlogError> {
        let data = self
            .data
            .read()
            .map_err(|e| LiftlogError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.clone())
    }

    /// Append sets to the end of the log
    pub fn extend(&self, sets: impl IntoIterator<Item = WorkoutSet>) -> Result<(), LiftlogError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LiftlogError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.extend(sets);
        Ok(())
    }

    /// Remove the set at a position, if it exists
    pub fn remove_at(&self, index: usize) -> Result<Option<WorkoutSet>, LiftlogError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LiftlogError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if index < data.len() {
            Ok(Some(data.remove(index)))
        } else {
            Ok(None)
        }
    }

    /// Most recent set for an exercise
    ///
    /// Ordered by date; among sets on the same day the one logged last wins.
    pub fn last_for(&self, exercise: &str) -> Result<Option<WorkoutSet>, LiftlogError> {
        let key = normalize_exercise_name(exercise);
        let data = self
            .data
            .read()
            .map_err(|e| LiftlogError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data
            .iter()
            .enumerate()
            .filter(|(_, set)| normalize_exercise_name(&set.exercise) == key)
            .max_by_key(|(i, set)| (set.date, *i))
            .map(|(_, set)| set.clone()))
    }

    /// Count sets
    pub fn count(&self) -> Result<usize, LiftlogError> {
        let data = self
            .data
            .read()
            .map_err(|e| LiftlogError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.len())
    }
}
