//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod backup;
pub mod exercise;
pub mod log;
pub mod report;
pub mod user;
pub mod workout;

pub use backup::{handle_backup_command, BackupCommands};
pub use exercise::{handle_exercise_command, ExerciseCommands};
pub use log::handle_log_command;
pub use report::{handle_report_command, ReportCommands};
pub use user::{handle_user_command, UserCommands};
pub use workout::{handle_workout_command, WorkoutCommands};

use std::fs::File;
use std::path::Path;

use crate::error::{LiftlogError, LiftlogResult};
use crate::models::Username;
use crate::services::user::parse_username;

/// Environment variable selecting the user for per-user commands
pub const USER_ENV: &str = "LIFTLOG_USER";

/// Resolve the `--user` argument of a per-user command
pub fn resolve_user(user: Option<&str>) -> LiftlogResult<Username> {
    match user {
        Some(name) => parse_username(name),
        None => Err(LiftlogError::Validation(format!(
            "No user selected. Pass --user <NAME> or set {}",
            USER_ENV
        ))),
    }
}

/// Open a CSV file for import
pub(crate) fn open_csv(path: &Path) -> LiftlogResult<File> {
    File::open(path).map_err(|e| {
        LiftlogError::Import(format!("Failed to open {}: {}", path.display(), e))
    })
}

/// Prompt for a secret without echoing it
pub fn prompt_secret(prompt: &str) -> LiftlogResult<String> {
    rpassword::prompt_password(prompt)
        .map_err(|e| LiftlogError::Io(format!("Failed to read input: {}", e)))
}
