//! Recent Workouts Report
//!
//! Pivots a user's sets into one row per exercise and one column per day,
//! most recent day first.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::models::WorkoutSet;

/// One exercise row of the pivot
#[derive(Debug, Clone, PartialEq)]
pub struct RecentRow {
    /// Normalized exercise name
    pub exercise: String,
    /// One cell per report date; empty when nothing was logged that day
    pub cells: Vec<String>,
}

/// Recent Workouts Report
#[derive(Debug, Clone, PartialEq)]
pub struct RecentWorkoutsReport {
    /// Report columns, newest first
    pub dates: Vec<NaiveDate>,
    /// Exercise rows, sorted by name
    pub rows: Vec<RecentRow>,
}

impl RecentWorkoutsReport {
    /// Check if there is anything to show
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Build the pivot over the `max_dates` most recent training days
///
/// Each cell lists that day's sets in logged order as `"60kg × 5"`, joined by
/// `", "`. Only exercises trained on one of the shown days get a row.
pub fn recent_workouts(workouts: &[WorkoutSet], max_dates: usize) -> RecentWorkoutsReport {
    let mut dates: Vec<NaiveDate> = workouts.iter().map(|w| w.date).collect();
    dates.sort_unstable_by(|a, b| b.cmp(a));
    dates.dedup();
    dates.truncate(max_dates);

    let mut by_exercise: BTreeMap<&str, BTreeMap<NaiveDate, Vec<String>>> = BTreeMap::new();
    for set in workouts.iter().filter(|w| dates.contains(&w.date)) {
        by_exercise
            .entry(set.exercise.as_str())
            .or_default()
            .entry(set.date)
            .or_default()
            .push(set.summary());
    }

    let rows = by_exercise
        .into_iter()
        .map(|(exercise, days)| RecentRow {
            exercise: exercise.to_string(),
            cells: dates
                .iter()
                .map(|date| days.get(date).map(|sets| sets.join(", ")).unwrap_or_default())
                .collect(),
        })
        .collect();

    RecentWorkoutsReport { dates, rows }
}
