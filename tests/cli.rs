use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn liftlog(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("liftlog").unwrap();
    cmd.env("LIFTLOG_DATA_DIR", dir.path())
        .env_remove("LIFTLOG_USER")
        .env_remove("LIFTLOG_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

fn register(dir: &TempDir, name: &str) -> String {
    let output = liftlog(dir).args(["user", "add", name]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout
        .lines()
        .find_map(|l| l.trim().strip_prefix("Protection code: "))
        .unwrap()
        .to_string()
}

#[test]
fn init_and_config() {
    let dir = TempDir::new().unwrap();

    liftlog(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));
    assert!(dir.path().join("data").join("users.json").exists());

    liftlog(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup retention:    5"));
}

#[test]
fn log_and_report_a_set() {
    let dir = TempDir::new().unwrap();
    register(&dir, "alice");

    liftlog(&dir)
        .args(["exercise", "add", "Bench Press", "--group", "Chest", "--user", "alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added exercise: bench press (Chest)"));

    liftlog(&dir)
        .env("LIFTLOG_USER", "alice")
        .args(["workout", "log", "bench press", "60", "5"])
        .assert()
        .success();

    liftlog(&dir)
        .env("LIFTLOG_USER", "alice")
        .args(["workout", "last", "BENCH PRESS"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bench press: 60kg × 5"));

    liftlog(&dir)
        .env("LIFTLOG_USER", "alice")
        .args(["report", "recent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("60kg × 5"));

    liftlog(&dir)
        .env("LIFTLOG_USER", "alice")
        .args(["report", "weekly"])
        .assert()
        .success()
        .stdout(predicate::str::contains("This week:  1 sets"));
}

#[test]
fn workout_arguments_are_bounded() {
    let dir = TempDir::new().unwrap();
    register(&dir, "alice");
    liftlog(&dir)
        .args(["exercise", "add", "squat", "--user", "alice"])
        .assert()
        .success();

    for args in [["squat", "501", "5"], ["squat", "-1", "5"], ["squat", "100", "101"]] {
        liftlog(&dir)
            .args(["workout", "log", "--user", "alice"])
            .args(args)
            .assert()
            .failure();
    }

    liftlog(&dir)
        .args(["workout", "log", "squat", "100", "0", "--user", "alice"])
        .assert()
        .success();

    liftlog(&dir)
        .args(["workout", "last", "squat", "--user", "alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("squat: 100kg × 0"));

    liftlog(&dir)
        .args(["workout", "log", "deadlift", "100", "5", "--user", "alice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Exercise not found: deadlift"));
}

#[test]
fn per_user_commands_need_a_user() {
    let dir = TempDir::new().unwrap();

    liftlog(&dir)
        .args(["exercise", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No user selected"));

    liftlog(&dir)
        .args(["exercise", "list", "--user", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("User not found: ghost"));
}

#[test]
fn delete_and_restore_user() {
    let dir = TempDir::new().unwrap();
    let code = register(&dir, "alice");
    let wrong = if code == "0000" { "1111" } else { "0000" };

    liftlog(&dir)
        .args(["user", "add", "alice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    liftlog(&dir)
        .args(["user", "delete", "alice", "--code", wrong])
        .assert()
        .failure();
    assert!(!dir.path().join("backups").read_dir().unwrap().any(|_| true));

    liftlog(&dir)
        .args(["user", "delete", "alice", "--code", &code])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted user: alice"));

    liftlog(&dir)
        .args(["user", "archived"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alice"));

    liftlog(&dir)
        .args(["user", "restore", "alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored user: alice"));

    liftlog(&dir)
        .args(["user", "restore", "alice"])
        .assert()
        .failure();
}

#[test]
fn audit_log_filters_by_user() {
    let dir = TempDir::new().unwrap();
    register(&dir, "alice");
    register(&dir, "bob");
    liftlog(&dir)
        .args(["exercise", "add", "squat", "--user", "alice"])
        .assert()
        .success();
    liftlog(&dir)
        .args(["exercise", "add", "row", "--user", "bob"])
        .assert()
        .success();

    liftlog(&dir)
        .args(["log", "--user", "bob"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("CREATE User bob")
                .and(predicate::str::contains("row"))
                .and(predicate::str::contains("alice").not())
                .and(predicate::str::contains("squat").not()),
        );

    liftlog(&dir)
        .args(["log", "--limit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("row").and(predicate::str::contains("squat").not()));

    liftlog(&dir)
        .args(["log", "--user", "carol"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No audit entries for carol."));
}

#[test]
fn import_workouts_from_csv() {
    let dir = TempDir::new().unwrap();
    register(&dir, "alice");
    let csv = dir.path().join("history.csv");
    std::fs::write(
        &csv,
        "date,exercise,weight,reps\n2024-05-01,Squat,100,5\n05/02/2024,squat,102.5,5.0\n",
    )
    .unwrap();

    liftlog(&dir)
        .args(["workout", "import", "--user", "alice"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 workouts and added 1 new exercises"));

    let bad = dir.path().join("bad.csv");
    std::fs::write(&bad, "date,exercise,weight\n2024-05-01,squat,100\n").unwrap();
    liftlog(&dir)
        .args(["workout", "import", "--user", "alice"])
        .arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("reps"));
}

#[test]
fn snapshot_export_then_import() {
    let dir = TempDir::new().unwrap();
    register(&dir, "alice");
    let out = dir.path().join("snapshot.json");

    liftlog(&dir)
        .args(["backup", "export", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 users"));

    register(&dir, "bob");

    liftlog(&dir)
        .args(["backup", "import"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("run again with --force"));

    liftlog(&dir)
        .args(["backup", "import", "--force"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Import complete!"));

    liftlog(&dir)
        .args(["user", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alice").and(predicate::str::contains("bob").not()));
}

#[test]
fn access_password_gates_commands() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{"access_password": "s3cret"}"#,
    )
    .unwrap();

    liftlog(&dir)
        .args(["user", "list", "--password", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("incorrect password"));

    liftlog(&dir)
        .env("LIFTLOG_PASSWORD", "s3cret")
        .args(["user", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No users found."));

    liftlog(&dir).arg("config").assert().success();
}
