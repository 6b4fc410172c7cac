//! Per-user store
//!
//! Bundles one user's exercise catalog and workout log.

use crate::config::paths::LiftlogPaths;
use crate::error::LiftlogError;
use crate::models::Username;

use super::exercises::ExerciseRepository;
use super::workouts::WorkoutRepository;

/// A user's two collections, loaded from disk
pub struct UserStore {
    user: Username,
    pub exercises: ExerciseRepository,
    pub workouts: WorkoutRepository,
}

impl UserStore {
    /// Open and load a user's collections
    ///
    /// Fails with a storage error if either file is missing or corrupt.
    pub fn open(paths: &LiftlogPaths, user: &Username) -> Result<Self, LiftlogError> {
        let store = Self {
            user: user.clone(),
            exercises: ExerciseRepository::new(paths.exercises_file(user)),
            workouts: WorkoutRepository::new(paths.workouts_file(user)),
        };

        store.exercises.load()?;
        store.workouts.load()?;

        Ok(store)
    }

    /// The owner of this store
    pub fn user(&self) -> &Username {
        &self.user
    }

    /// Save both collections
    pub fn save_all(&self) -> Result<(), LiftlogError> {
        self.exercises.save()?;
        self.workouts.save()?;
        Ok(())
    }
}
