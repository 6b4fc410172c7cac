//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models and reports as tables for
//! the terminal.

pub mod backup;
pub mod exercise;
pub mod report;
pub mod user;
pub mod workout;

pub use backup::{format_audit_entries, format_backup_list};
pub use exercise::format_exercise_list;
pub use report::{format_progress, format_recent_workouts, format_weekly_comparison};
pub use user::{format_archived_list, format_registration, format_user_list};
pub use workout::{format_workout_list, format_workout_set};

use tabled::settings::Style;
use tabled::Table;

/// Render a table in the shared style
pub(crate) fn render(mut table: Table) -> String {
    table.with(Style::psql()).to_string()
}
