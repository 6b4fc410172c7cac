//! Exercise CLI commands
//!
//! Implements CLI commands for managing a user's exercise catalog.

use clap::Subcommand;
use std::path::PathBuf;

use crate::display::format_exercise_list;
use crate::error::{LiftlogError, LiftlogResult};
use crate::models::{MuscleGroup, Username};
use crate::services::{ExerciseService, ImportService, UpsertOutcome};
use crate::storage::Storage;

use super::open_csv;

/// Exercise subcommands
#[derive(Subcommand)]
pub enum ExerciseCommands {
    /// List the exercise catalog
    List,
    /// Add an exercise, or change the muscle group of an existing one
    Add {
        /// Exercise name
        name: String,
        /// Muscle group (Arms, Back, Chest, Core, Full Body, Legs, Shoulders, Other)
        #[arg(short, long, default_value = "Other")]
        group: String,
    },
    /// Delete an exercise by its stored name
    Delete {
        /// Exercise name exactly as listed
        name: String,
    },
    /// Import exercises from a CSV file with `exercise` and optional `muscle_group` columns
    Import {
        /// CSV file path
        file: PathBuf,
    },
}

/// Handle an exercise command
pub fn handle_exercise_command(
    storage: &Storage,
    user: &Username,
    cmd: ExerciseCommands,
) -> LiftlogResult<()> {
    let service = ExerciseService::new(storage);

    match cmd {
        ExerciseCommands::List => {
            println!("{}", format_exercise_list(&service.list(user)?));
        }

        ExerciseCommands::Add { name, group } => {
            let group = parse_group(&group)?;
            match service.upsert(user, &name, group)? {
                UpsertOutcome::Created(exercise) => {
                    println!("Added exercise: {} ({})", exercise.name, exercise.muscle_group);
                }
                UpsertOutcome::Updated { before, after } => {
                    println!(
                        "Updated exercise: {} ({} -> {})",
                        after.name, before.muscle_group, after.muscle_group
                    );
                }
            }
        }

        ExerciseCommands::Delete { name } => {
            let removed = service.delete(user, &name)?;
            println!("Deleted exercise: {}", removed.name);
        }

        ExerciseCommands::Import { file } => {
            let added = ImportService::new(storage).import_exercises_csv(user, open_csv(&file)?)?;
            if added.is_empty() {
                println!("No new exercises found in {}.", file.display());
            } else {
                println!("Added {} exercises:", added.len());
                for name in &added {
                    println!("  {}", name);
                }
            }
        }
    }

    Ok(())
}

/// Parse a muscle group given on the command line
///
/// Unlike CSV imports, an unknown label is an error here rather than `Other`.
fn parse_group(label: &str) -> LiftlogResult<MuscleGroup> {
    MuscleGroup::all()
        .iter()
        .copied()
        .find(|g| g.label().eq_ignore_ascii_case(label.trim()))
        .ok_or_else(|| {
            let valid: Vec<&str> = MuscleGroup::all().iter().map(|g| g.label()).collect();
            LiftlogError::Validation(format!(
                "Invalid muscle group: '{}'. Valid groups: {}",
                label,
                valid.join(", ")
            ))
        })
}
