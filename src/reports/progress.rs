//! Progress Reports
//!
//! The per-exercise daily maximum series and the week-over-week training
//! volume comparison.

use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

use crate::models::{normalize_exercise_name, WorkoutSet};

/// Heaviest set of one day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressPoint {
    pub date: NaiveDate,
    pub max_weight: f64,
}

/// Heaviest weight per day for one exercise, oldest day first
pub fn daily_max(workouts: &[WorkoutSet], exercise: &str) -> Vec<ProgressPoint> {
    let exercise = normalize_exercise_name(exercise);
    let mut days: BTreeMap<NaiveDate, f64> = BTreeMap::new();

    for set in workouts
        .iter()
        .filter(|w| normalize_exercise_name(&w.exercise) == exercise)
    {
        days.entry(set.date)
            .and_modify(|max| *max = max.max(set.weight))
            .or_insert(set.weight);
    }

    days.into_iter()
        .map(|(date, max_weight)| ProgressPoint { date, max_weight })
        .collect()
}

/// Sets logged this week against the week before
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeeklyComparison {
    /// Sets dated within the last 7 days
    pub this_week: usize,
    /// Sets dated 8 to 14 days ago
    pub previous_week: usize,
}

impl WeeklyComparison {
    /// Difference between the two weeks
    pub fn change(&self) -> i64 {
        self.this_week as i64 - self.previous_week as i64
    }
}

/// Count sets in the 7 days ending `today` and in the 7 days before that
///
/// This week is `date > today - 7`; the previous week is
/// `today - 14 < date <= today - 7`.
pub fn weekly_comparison(workouts: &[WorkoutSet], today: NaiveDate) -> WeeklyComparison {
    let week_start = today - Duration::days(7);
    let previous_start = today - Duration::days(14);

    workouts
        .iter()
        .fold(WeeklyComparison::default(), |mut acc, set| {
            if set.date > week_start {
                acc.this_week += 1;
            } else if set.date > previous_start {
                acc.previous_week += 1;
            }
            acc
        })
}
