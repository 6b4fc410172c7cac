//! Workout CLI commands
//!
//! Implements CLI commands for logging, listing, deleting and importing
//! workout sets.

use clap::Subcommand;
use std::path::PathBuf;

use crate::display::{format_workout_list, format_workout_set};
use crate::error::{LiftlogError, LiftlogResult};
use crate::models::{parse_flexible_date, Username};
use crate::services::{ImportService, WorkoutService};
use crate::storage::Storage;

use super::open_csv;

/// Heaviest weight accepted on the command line, in kg
pub const MAX_WEIGHT: f64 = 500.0;

/// Workout subcommands
#[derive(Subcommand)]
pub enum WorkoutCommands {
    /// Log a set
    Log {
        /// Exercise name (must be in the catalog)
        exercise: String,
        /// Weight in kg (0 to 500)
        #[arg(value_parser = parse_weight)]
        weight: f64,
        /// Repetitions (0 to 100)
        #[arg(value_parser = clap::value_parser!(u32).range(0..=100))]
        reps: u32,
        /// Date of the set (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List all logged sets
    List,
    /// Show the most recent set for an exercise
    Last {
        /// Exercise name
        exercise: String,
    },
    /// Delete a set by its number in `workout list`
    Delete {
        /// Set number
        index: usize,
    },
    /// Import sets from a CSV file with `date, exercise, weight, reps` columns
    Import {
        /// CSV file path
        file: PathBuf,
    },
}

/// Handle a workout command
pub fn handle_workout_command(
    storage: &Storage,
    user: &Username,
    cmd: WorkoutCommands,
) -> LiftlogResult<()> {
    let service = WorkoutService::new(storage);

    match cmd {
        WorkoutCommands::Log {
            exercise,
            weight,
            reps,
            date,
        } => {
            let set = match date {
                Some(date) => {
                    let date = parse_flexible_date(&date).map_err(LiftlogError::Validation)?;
                    service.log_on(user, date, &exercise, weight, reps)?
                }
                None => service.log(user, &exercise, weight, reps)?,
            };
            println!("Logged {}", format_workout_set(&set));
        }

        WorkoutCommands::List => {
            println!("{}", format_workout_list(&service.list(user)?));
        }

        WorkoutCommands::Last { exercise } => match service.last(user, &exercise)? {
            Some(set) => println!("Last: {}", format_workout_set(&set)),
            None => println!("No sets logged for {}.", exercise.trim()),
        },

        WorkoutCommands::Delete { index } => {
            let removed = service.delete_at(user, index)?;
            println!("Deleted {}", format_workout_set(&removed));
        }

        WorkoutCommands::Import { file } => {
            let summary =
                ImportService::new(storage).import_workouts_csv(user, open_csv(&file)?)?;
            println!("{}", summary.message());
        }
    }

    Ok(())
}

/// Parse a weight argument, bounded to `[0, MAX_WEIGHT]`
fn parse_weight(s: &str) -> Result<f64, String> {
    let weight: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;

    if !weight.is_finite() || !(0.0..=MAX_WEIGHT).contains(&weight) {
        return Err(format!("weight must be between 0 and {} kg", MAX_WEIGHT));
    }

    Ok(weight)
}
