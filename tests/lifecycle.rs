use liftlog::config::paths::LiftlogPaths;
use liftlog::config::settings::Settings;
use liftlog::export::{export_snapshot_json, import_from_json};
use liftlog::models::{MuscleGroup, User};
use liftlog::services::{ExerciseService, LifecycleService, UserService, WorkoutService};
use liftlog::storage::{initialize_storage, Storage};
use liftlog::LiftlogError;
use tempfile::TempDir;

fn open_storage(dir: &TempDir) -> Storage {
    let paths = LiftlogPaths::with_base_dir(dir.path().to_path_buf());
    initialize_storage(&paths).unwrap();
    let mut storage = Storage::with_settings(paths, Settings::default()).unwrap();
    storage.load_all().unwrap();
    storage
}

fn code_of(user: &User) -> String {
    user.protection_code.as_ref().unwrap().reveal().to_string()
}

#[test]
fn alice_logs_deletes_and_restores() {
    let dir = TempDir::new().unwrap();
    let storage = open_storage(&dir);

    let alice = UserService::new(&storage).register("alice").unwrap();
    ExerciseService::new(&storage)
        .upsert(&alice.name, "Bench Press", MuscleGroup::Chest)
        .unwrap();
    WorkoutService::new(&storage)
        .log(&alice.name, "Bench Press", 60.0, 5)
        .unwrap();

    let last = WorkoutService::new(&storage)
        .last(&alice.name, "bench press")
        .unwrap()
        .unwrap();
    assert_eq!((last.weight, last.reps), (60.0, 5));

    let lifecycle = LifecycleService::new(&storage);
    lifecycle.delete_user("alice", &code_of(&alice)).unwrap();
    assert!(UserService::new(&storage).get("alice").unwrap().is_none());
    assert_eq!(lifecycle.list_backups().unwrap().len(), 1);

    let restored = lifecycle.restore_user("alice").unwrap();
    assert_ne!(restored.id, alice.id);

    let exercises = ExerciseService::new(&storage).list(&restored.name).unwrap();
    assert_eq!(exercises.len(), 1);
    assert_eq!(exercises[0].muscle_group, MuscleGroup::Chest);
    assert_eq!(
        WorkoutService::new(&storage)
            .last(&restored.name, "bench press")
            .unwrap()
            .unwrap()
            .weight,
        60.0
    );
}

#[test]
fn state_survives_reopening() {
    let dir = TempDir::new().unwrap();
    {
        let storage = open_storage(&dir);
        let bob = UserService::new(&storage).register("bob").unwrap();
        ExerciseService::new(&storage)
            .upsert(&bob.name, "Row", MuscleGroup::Back)
            .unwrap();
    }

    let storage = open_storage(&dir);
    let bob = UserService::new(&storage).require("bob").unwrap();
    assert!(ExerciseService::new(&storage)
        .get(&bob.name, "row")
        .unwrap()
        .is_some());

    let carol = UserService::new(&storage).register("carol").unwrap();
    assert!(carol.id > bob.id);
}

#[test]
fn snapshot_survives_json_round_trip() {
    let dir = TempDir::new().unwrap();
    let storage = open_storage(&dir);
    let alice = UserService::new(&storage).register("alice").unwrap();
    ExerciseService::new(&storage)
        .upsert(&alice.name, "Squat", MuscleGroup::Legs)
        .unwrap();
    WorkoutService::new(&storage)
        .log(&alice.name, "squat", 100.0, 5)
        .unwrap();
    let lifecycle = LifecycleService::new(&storage);

    let snapshot = lifecycle.export_snapshot().unwrap();
    let mut buffer = Vec::new();
    export_snapshot_json(&snapshot, &mut buffer, true).unwrap();

    let other_dir = TempDir::new().unwrap();
    let other = open_storage(&other_dir);
    let parsed = import_from_json(std::str::from_utf8(&buffer).unwrap()).unwrap();
    LifecycleService::new(&other).import_snapshot(parsed).unwrap();

    let imported = LifecycleService::new(&other).export_snapshot().unwrap();
    assert_eq!(imported.users, snapshot.users);
    assert_eq!(imported.user_data, snapshot.user_data);

    let alice_again = UserService::new(&other).require("alice").unwrap();
    assert_eq!(code_of(&alice_again), code_of(&alice));
}

#[test]
fn restore_preconditions() {
    let dir = TempDir::new().unwrap();
    let storage = open_storage(&dir);
    UserService::new(&storage).register("dave").unwrap();
    let lifecycle = LifecycleService::new(&storage);

    assert!(matches!(
        lifecycle.restore_user("erin"),
        Err(LiftlogError::NotFound { .. })
    ));
    assert!(matches!(
        lifecycle.restore_user("dave"),
        Err(LiftlogError::Duplicate { .. })
    ));
}

#[test]
fn legacy_archive_folder_can_be_restored() {
    let dir = TempDir::new().unwrap();
    let storage = open_storage(&dir);
    let archive = storage.paths().archive_dir().join("frank_20230615_093000");
    std::fs::create_dir_all(&archive).unwrap();
    std::fs::write(
        archive.join("workouts.json"),
        r#"{"workouts": [{"date": "2023-06-14", "exercise": "squat", "weight": 90, "reps": 5}]}"#,
    )
    .unwrap();

    let lifecycle = LifecycleService::new(&storage);
    let archived: Vec<String> = lifecycle
        .list_archived()
        .unwrap()
        .into_iter()
        .map(|u| u.to_string())
        .collect();
    assert_eq!(archived, vec!["frank"]);

    let frank = lifecycle.restore_user("frank").unwrap();
    let sets = WorkoutService::new(&storage).list(&frank.name).unwrap();
    assert_eq!(sets.len(), 1);
    assert!(!archive.exists());
}

#[test]
fn seven_backups_keep_five() {
    let dir = TempDir::new().unwrap();
    let storage = open_storage(&dir);
    UserService::new(&storage).register("alice").unwrap();
    let lifecycle = LifecycleService::new(&storage);

    let created: Vec<_> = (0..7).map(|_| lifecycle.backup_all().unwrap()).collect();

    let kept: Vec<_> = lifecycle
        .list_backups()
        .unwrap()
        .into_iter()
        .map(|b| b.path)
        .collect();
    let expected: Vec<_> = created[2..].iter().rev().cloned().collect();
    assert_eq!(kept, expected);
}

#[test]
fn audit_log_hides_protection_codes() {
    let dir = TempDir::new().unwrap();
    let storage = open_storage(&dir);
    let alice = UserService::new(&storage).register("alice").unwrap();
    LifecycleService::new(&storage)
        .delete_user("alice", &code_of(&alice))
        .unwrap();

    let log = std::fs::read_to_string(storage.paths().audit_log()).unwrap();
    assert!(!log.contains("protection_code"));
    assert!(log.lines().count() >= 3);
}
