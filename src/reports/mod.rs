//! Reports module for Liftlog
//!
//! Provides the recent-workouts pivot, per-exercise progress and the weekly
//! comparison.

pub mod progress;
pub mod recent;

pub use progress::{daily_max, weekly_comparison, ProgressPoint, WeeklyComparison};
pub use recent::{recent_workouts, RecentRow, RecentWorkoutsReport};
