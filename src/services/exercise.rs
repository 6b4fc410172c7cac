//! Exercise service
//!
//! Manages a user's exercise catalog: listing, upserting by normalized name
//! and deleting by exact stored name.

use crate::audit::EntityType;
use crate::error::{LiftlogError, LiftlogResult};
use crate::models::{Exercise, MuscleGroup, Username};
use crate::storage::Storage;

/// Outcome of an upsert
#[derive(Debug, Clone, PartialEq)]
pub enum UpsertOutcome {
    /// A new catalog entry was added
    Created(Exercise),
    /// An existing entry had its muscle group replaced
    Updated { before: Exercise, after: Exercise },
}

impl UpsertOutcome {
    /// The exercise as now stored
    pub fn exercise(&self) -> &Exercise {
        match self {
            Self::Created(exercise) => exercise,
            Self::Updated { after, .. } => after,
        }
    }
}

/// Service for exercise catalog management
pub struct ExerciseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExerciseService<'a> {
    /// Create a new exercise service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All exercises in catalog order
    pub fn list(&self, user: &Username) -> LiftlogResult<Vec<Exercise>> {
        self.storage
            .with_user_store(user, |store| store.exercises.get_all())
    }

    /// Look up an exercise by (normalized) name
    pub fn get(&self, user: &Username, name: &str) -> LiftlogResult<Option<Exercise>> {
        self.storage
            .with_user_store(user, |store| store.exercises.find(name))
    }

    /// Add an exercise, or change the muscle group of an existing one
    ///
    /// The name is normalized; an existing entry keeps its `created_at`.
    pub fn upsert(
        &self,
        user: &Username,
        name: &str,
        muscle_group: MuscleGroup,
    ) -> LiftlogResult<UpsertOutcome> {
        let exercise = Exercise::new(name, muscle_group);
        exercise
            .validate()
            .map_err(|e| LiftlogError::Validation(e.to_string()))?;

        let outcome = self.storage.with_user_store(user, |store| {
            let previous = store.exercises.upsert(exercise.clone())?;
            store.exercises.save()?;

            Ok(match previous {
                Some(before) => {
                    let after = store
                        .exercises
                        .find(&exercise.name)?
                        .unwrap_or_else(|| exercise.clone());
                    UpsertOutcome::Updated { before, after }
                }
                None => UpsertOutcome::Created(exercise.clone()),
            })
        })?;

        match &outcome {
            UpsertOutcome::Created(created) => {
                self.storage
                    .log_create(EntityType::Exercise, &created.name, Some(user), created)?;
                tracing::info!(user = %user, exercise = %created.name, "Added exercise");
            }
            UpsertOutcome::Updated { before, after } => {
                self.storage.log_update(
                    EntityType::Exercise,
                    &after.name,
                    Some(user),
                    before,
                    after,
                )?;
                tracing::info!(user = %user, exercise = %after.name, "Updated exercise");
            }
        }

        Ok(outcome)
    }

    /// Delete an exercise by its exact stored name
    ///
    /// Logged sets that reference the exercise are kept.
    pub fn delete(&self, user: &Username, name: &str) -> LiftlogResult<Exercise> {
        let removed = self.storage.with_user_store(user, |store| {
            let removed = store
                .exercises
                .remove_exact(name)?
                .ok_or_else(|| LiftlogError::exercise_not_found(name))?;
            store.exercises.save()?;
            Ok(removed)
        })?;

        self.storage
            .log_delete(EntityType::Exercise, &removed.name, Some(user), &removed)?;
        tracing::info!(user = %user, exercise = %removed.name, "Deleted exercise");

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LiftlogPaths;
    use crate::services::UserService;
    use crate::storage::initialize_storage;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage, Username) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LiftlogPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        let user = UserService::new(&storage).register("alice").unwrap().name;
        (temp_dir, storage, user)
    }

    #[test]
    fn test_upsert_twice_keeps_one_entry() {
        let (_temp_dir, storage, alice) = setup();
        let service = ExerciseService::new(&storage);

        let first = service
            .upsert(&alice, "Bench Press", MuscleGroup::Chest)
            .unwrap();
        assert!(matches!(first, UpsertOutcome::Created(_)));
        let created_at = first.exercise().created_at;

        let second = service
            .upsert(&alice, " bench   PRESS ", MuscleGroup::Shoulders)
            .unwrap();
        assert!(matches!(second, UpsertOutcome::Updated { .. }));

        let all = service.list(&alice).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "bench press");
        assert_eq!(all[0].muscle_group, MuscleGroup::Shoulders);
        assert_eq!(all[0].created_at, created_at);
    }

    #[test]
    fn test_upsert_rejects_blank_name() {
        let (_temp_dir, storage, alice) = setup();
        let err = ExerciseService::new(&storage)
            .upsert(&alice, "   ", MuscleGroup::Other)
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_delete_by_exact_name() {
        let (_temp_dir, storage, alice) = setup();
        let service = ExerciseService::new(&storage);
        service.upsert(&alice, "Squat", MuscleGroup::Legs).unwrap();

        assert!(service.delete(&alice, "Squat").unwrap_err().is_not_found());
        let removed = service.delete(&alice, "squat").unwrap();
        assert_eq!(removed.muscle_group, MuscleGroup::Legs);
        assert!(service.list(&alice).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_user() {
        let (_temp_dir, storage, _alice) = setup();
        let ghost = Username::new("ghost").unwrap();
        assert!(ExerciseService::new(&storage)
            .list(&ghost)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_catalogs_are_per_user() {
        let (_temp_dir, storage, alice) = setup();
        let bob = UserService::new(&storage).register("bob").unwrap().name;
        let service = ExerciseService::new(&storage);

        service.upsert(&alice, "Row", MuscleGroup::Back).unwrap();
        assert!(service.get(&alice, "row").unwrap().is_some());
        assert!(service.get(&bob, "row").unwrap().is_none());
    }
}
