//! Report CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_progress, format_recent_workouts, format_weekly_comparison};
use crate::error::LiftlogResult;
use crate::models::{normalize_exercise_name, Username};
use crate::reports::{daily_max, recent_workouts, weekly_comparison};
use crate::services::WorkoutService;
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Recent workouts, one column per training day
    Recent {
        /// Number of training days to show
        #[arg(short, long, default_value = "7")]
        days: usize,
    },
    /// Heaviest set per day for one exercise
    Progress {
        /// Exercise name
        exercise: String,
    },
    /// Sets logged this week compared with last week
    Weekly,
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    user: &Username,
    cmd: ReportCommands,
) -> LiftlogResult<()> {
    let workouts = WorkoutService::new(storage).list(user)?;

    match cmd {
        ReportCommands::Recent { days } => {
            let report = recent_workouts(&workouts, days);
            println!("Recent workouts for {}", user);
            println!(
                "{}",
                format_recent_workouts(&report, &settings.display_date_format)
            );
        }

        ReportCommands::Progress { exercise } => {
            let exercise = normalize_exercise_name(&exercise);
            println!("{}", format_progress(&exercise, &daily_max(&workouts, &exercise)));
        }

        ReportCommands::Weekly => {
            let today = chrono::Local::now().date_naive();
            print!("{}", format_weekly_comparison(&weekly_comparison(&workouts, today)));
        }
    }

    Ok(())
}
