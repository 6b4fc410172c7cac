//! Core data models for Liftlog
//!
//! This module contains the data structures of the logbook domain: users,
//! their exercise catalogs and logged workout sets.

pub mod date;
pub mod exercise;
pub mod user;
pub mod workout;

pub use date::parse_flexible_date;
pub use exercise::{normalize_exercise_name, Exercise, MuscleGroup};
pub use user::{ProtectionCode, User, Username};
pub use workout::{format_weight, WorkoutSet};
