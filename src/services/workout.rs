//! Workout service
//!
//! Logging, listing and deleting workout sets for one user.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{LiftlogError, LiftlogResult};
use crate::models::{normalize_exercise_name, Username, WorkoutSet};
use crate::storage::Storage;

/// Service for workout management
pub struct WorkoutService<'a> {
    storage: &'a Storage,
}

impl<'a> WorkoutService<'a> {
    /// Create a new workout service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All sets in the order they were logged
    pub fn list(&self, user: &Username) -> LiftlogResult<Vec<WorkoutSet>> {
        self.storage
            .with_user_store(user, |store| store.workouts.get_all())
    }

    /// Log a set dated today
    pub fn log(
        &self,
        user: &Username,
        exercise: &str,
        weight: f64,
        reps: u32,
    ) -> LiftlogResult<WorkoutSet> {
        let today = chrono::Local::now().date_naive();
        self.log_on(user, today, exercise, weight, reps)
    }

    /// Log a set on a given date
    ///
    /// The exercise must already be in the user's catalog.
    pub fn log_on(
        &self,
        user: &Username,
        date: NaiveDate,
        exercise: &str,
        weight: f64,
        reps: u32,
    ) -> LiftlogResult<WorkoutSet> {
        let set = WorkoutSet::new(date, normalize_exercise_name(exercise), weight, reps);
        set.validate()
            .map_err(|e| LiftlogError::Validation(e.to_string()))?;

        let index = self.storage.with_user_store(user, |store| {
            if store.exercises.find(&set.exercise)?.is_none() {
                return Err(LiftlogError::exercise_not_found(&set.exercise));
            }

            let index = store.workouts.count()?;
            store.workouts.extend([set.clone()])?;
            store.workouts.save()?;
            Ok(index)
        })?;

        self.storage
            .log_create(EntityType::WorkoutSet, index.to_string(), Some(user), &set)?;
        tracing::info!(user = %user, set = %set, "Logged workout set");

        Ok(set)
    }

    /// Most recent set for an exercise, if any
    pub fn last(&self, user: &Username, exercise: &str) -> LiftlogResult<Option<WorkoutSet>> {
        self.storage
            .with_user_store(user, |store| store.workouts.last_for(exercise))
    }

    /// Delete the set at a position in the user's log
    pub fn delete_at(&self, user: &Username, index: usize) -> LiftlogResult<WorkoutSet> {
        let removed = self.storage.with_user_store(user, |store| {
            let count = store.workouts.count()?;
            let removed = store.workouts.remove_at(index)?.ok_or_else(|| {
                LiftlogError::Validation(format!(
                    "Invalid workout index {} (user has {} sets)",
                    index, count
                ))
            })?;
            store.workouts.save()?;
            Ok(removed)
        })?;

        self.storage
            .log_delete(EntityType::WorkoutSet, index.to_string(), Some(user), &removed)?;
        tracing::info!(user = %user, index, "Deleted workout set");

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LiftlogPaths;
    use crate::models::MuscleGroup;
    use crate::services::{ExerciseService, UserService};
    use crate::storage::initialize_storage;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup() -> (TempDir, Storage, Username) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LiftlogPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        let user = UserService::new(&storage).register("alice").unwrap().name;
        ExerciseService::new(&storage)
            .upsert(&user, "Bench Press", MuscleGroup::Chest)
            .unwrap();
        (temp_dir, storage, user)
    }

    #[test]
    fn test_log_and_last() {
        let (_temp_dir, storage, alice) = setup();
        let service = WorkoutService::new(&storage);

        assert!(service.last(&alice, "bench press").unwrap().is_none());

        service.log(&alice, "Bench Press", 60.0, 5).unwrap();
        let last = service.last(&alice, "BENCH PRESS").unwrap().unwrap();
        assert_eq!(last.weight, 60.0);
        assert_eq!(last.reps, 5);
        assert_eq!(last.exercise, "bench press");
        assert_eq!(last.date, chrono::Local::now().date_naive());
    }

    #[test]
    fn test_log_requires_cataloged_exercise() {
        let (_temp_dir, storage, alice) = setup();
        let err = WorkoutService::new(&storage)
            .log(&alice, "Deadlift", 100.0, 5)
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(WorkoutService::new(&storage).list(&alice).unwrap().is_empty());
    }

    #[test]
    fn test_log_rejects_negative_weight() {
        let (_temp_dir, storage, alice) = setup();
        let service = WorkoutService::new(&storage);
        assert!(service
            .log(&alice, "bench press", -1.0, 5)
            .unwrap_err()
            .is_validation());
        assert!(service
            .log(&alice, "bench press", f64::NAN, 5)
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_last_prefers_later_date_over_later_entry() {
        let (_temp_dir, storage, alice) = setup();
        let service = WorkoutService::new(&storage);

        service.log_on(&alice, date(2024, 3, 10), "bench press", 70.0, 3).unwrap();
        service.log_on(&alice, date(2024, 3, 1), "bench press", 65.0, 5).unwrap();

        assert_eq!(
            service.last(&alice, "bench press").unwrap().unwrap().weight,
            70.0
        );
    }

    #[test]
    fn test_delete_at() {
        let (_temp_dir, storage, alice) = setup();
        let service = WorkoutService::new(&storage);
        service.log_on(&alice, date(2024, 1, 1), "bench press", 50.0, 5).unwrap();
        service.log_on(&alice, date(2024, 1, 2), "bench press", 55.0, 5).unwrap();

        assert!(service.delete_at(&alice, 2).unwrap_err().is_validation());

        let removed = service.delete_at(&alice, 0).unwrap();
        assert_eq!(removed.weight, 50.0);
        let remaining = service.list(&alice).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].weight, 55.0);
    }

    #[test]
    fn test_delete_is_scoped_to_user() {
        let (_temp_dir, storage, alice) = setup();
        let bob = UserService::new(&storage).register("bob").unwrap().name;
        let service = WorkoutService::new(&storage);
        service.log(&alice, "bench press", 60.0, 5).unwrap();

        assert!(service.delete_at(&bob, 0).unwrap_err().is_validation());
        assert_eq!(service.list(&alice).unwrap().len(), 1);
    }
}
