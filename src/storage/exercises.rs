//! Exercise catalog repository for JSON storage
//!
//! Manages loading and saving one user's exercises.json

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LiftlogError;
use crate::models::{normalize_exercise_name, Exercise};

use super::file_io::{read_json_required, write_json_atomic};

/// Serializable exercise data structure
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExerciseData {
    pub exercises: Vec<Exercise>,
}

/// Repository for a user's exercise catalog
pub struct ExerciseRepository {
    path: PathBuf,
    data: RwLock<Vec<Exercise>>,
}

impl ExerciseRepository {
    /// Create a new exercise repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load exercises from disk; the file must exist
    pub fn load(&self) -> Result<(), LiftlogError> {
        let file_data: ExerciseData = read_json_required(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| LiftlogError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *data = file_data.exercises;
        Ok(())
    }

    /// Save exercises to disk
    pub fn save(&self) -> Result<(), LiftlogError> {
        let data = self
            .data
            .read()
            .map_err(|e| LiftlogError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = ExerciseData {
            exercises: data.clone(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get all exercises in catalog order
    pub fn get_all(&self) -> Result<Vec<Exercise>, LiftlogError> {
        let data = self
            .data
            .read()
            .map_err(|e| LiftlogError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.clone())
    }

    /// Find an exercise by name (normalized before comparison)
    pub fn find(&self, name: &str) -> Result<Option<Exercise>, LiftlogError> {
        let key = normalize_exercise_name(name);
        let data = self
            .data
            .read()
            .map_err(|e| LiftlogError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.iter().find(|e| e.key() == key).cloned())
    }

    /// Insert or update an exercise
    ///
    /// An existing entry with the same normalized name is replaced in place
    /// and keeps its original `created_at`. Returns the previous entry.
    pub fn upsert(&self, exercise: Exercise) -> Result<Option<Exercise>, LiftlogError> {
        let key = exercise.key();
        let mut data = self
            .data
            .write()
            .map_err(|e| LiftlogError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        match data.iter_mut().find(|e| e.key() == key) {
            Some(existing) => {
                let previous = existing.clone();
                existing.name = key;
                existing.muscle_group = exercise.muscle_group;
                Ok(Some(previous))
            }
            None => {
                data.push(exercise);
                Ok(None)
            }
        }
    }

    /// Remove an exercise by its exact stored name
    pub fn remove_exact(&self, name: &str) -> Result<Option<Exercise>, LiftlogError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LiftlogError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let position = data.iter().position(|e| e.name == name);
        Ok(position.map(|i| data.remove(i)))
    }
}
