//! Workout display formatting
//!
//! The list view numbers each set by its position in the user's log, which
//! is the index `workout delete` takes.

use tabled::{Table, Tabled};

use crate::models::{format_weight, WorkoutSet};

use super::render;

#[derive(Tabled)]
struct WorkoutRow<'a> {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Exercise")]
    exercise: &'a str,
    #[tabled(rename = "Weight (kg)")]
    weight: String,
    #[tabled(rename = "Reps")]
    reps: u32,
}

/// Format logged sets, keeping their log positions
pub fn format_workout_list(workouts: &[WorkoutSet]) -> String {
    if workouts.is_empty() {
        return "No workouts logged yet.".to_string();
    }

    let rows = workouts.iter().enumerate().map(|(index, w)| WorkoutRow {
        index,
        date: w.date.format("%Y-%m-%d").to_string(),
        exercise: &w.exercise,
        weight: format_weight(w.weight),
        reps: w.reps,
    });

    render(Table::new(rows))
}

/// One-line description of a set
pub fn format_workout_set(set: &WorkoutSet) -> String {
    format!("{}: {} on {}", set.exercise, set.summary(), set.date.format("%Y-%m-%d"))
}
