//! Storage initialization
//!
//! Handles first-run setup and the empty files every active user starts with

use crate::config::paths::LiftlogPaths;
use crate::error::LiftlogError;
use crate::models::Username;

use super::exercises::ExerciseData;
use super::file_io::write_json_atomic;
use super::registry::RegistryData;
use super::workouts::WorkoutData;

/// Initialize storage for a fresh installation
///
/// Creates the directory tree and an empty user registry
pub fn initialize_storage(paths: &LiftlogPaths) -> Result<(), LiftlogError> {
    paths.ensure_directories()?;

    if !paths.users_file().exists() {
        write_json_atomic(paths.users_file(), &RegistryData::default())?;
    }

    Ok(())
}

/// Create a user's directory with empty collections
///
/// Files that already exist are left alone, so this also repairs a
/// partially restored user.
pub fn init_user_storage(paths: &LiftlogPaths, user: &Username) -> Result<(), LiftlogError> {
    let dir = paths.user_dir(user);
    std::fs::create_dir_all(&dir).map_err(|e| {
        LiftlogError::Io(format!("Failed to create directory {}: {}", dir.display(), e))
    })?;

    let exercises = paths.exercises_file(user);
    if !exercises.exists() {
        write_json_atomic(&exercises, &ExerciseData::default())?;
    }

    let workouts = paths.workouts_file(user);
    if !workouts.exists() {
        write_json_atomic(&workouts, &WorkoutData::default())?;
    }

    Ok(())
}
