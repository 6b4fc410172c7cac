//! Workout set model
//!
//! One logged set: a date, the exercise it belongs to, the weight moved and
//! the number of repetitions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::date::flexible;

/// A single logged set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSet {
    /// Day the set was performed
    #[serde(with = "flexible")]
    pub date: NaiveDate,

    /// Normalized exercise name
    pub exercise: String,

    /// Weight in kilograms
    pub weight: f64,

    /// Repetitions
    pub reps: u32,
}

impl WorkoutSet {
    /// Create a new set
    pub fn new(date: NaiveDate, exercise: impl Into<String>, weight: f64, reps: u32) -> Self {
        Self {
            date,
            exercise: exercise.into(),
            weight,
            reps,
        }
    }

    /// Validate the set
    pub fn validate(&self) -> Result<(), WorkoutValidationError> {
        if self.exercise.trim().is_empty() {
            return Err(WorkoutValidationError::MissingExercise);
        }

        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(WorkoutValidationError::InvalidWeight(self.weight));
        }

        Ok(())
    }

    /// Short "60kg × 5" label
    pub fn summary(&self) -> String {
        format!("{}kg × {}", format_weight(self.weight), self.reps)
    }
}

impl fmt::Display for WorkoutSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date, self.exercise, self.summary())
    }
}

/// Format a weight without a trailing ".0" for whole numbers
pub fn format_weight(weight: f64) -> String {
    if weight.fract() == 0.0 {
        format!("{:.0}", weight)
    } else {
        format!("{}", weight)
    }
}

/// Validation errors for workout sets
#[derive(Debug, Clone, PartialEq)]
pub enum WorkoutValidationError {
    MissingExercise,
    InvalidWeight(f64),
}

impl fmt::Display for WorkoutValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingExercise => write!(f, "Workout set must name an exercise"),
            Self::InvalidWeight(w) => {
                write!(f, "Weight must be a non-negative number, got {}", w)
            }
        }
    }
}

impl std::error::Error for WorkoutValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_validate() {
        assert!(WorkoutSet::new(date(2024, 1, 1), "squat", 100.0, 5)
            .validate()
            .is_ok());
        assert!(WorkoutSet::new(date(2024, 1, 1), "squat", 0.0, 0)
            .validate()
            .is_ok());
        assert_eq!(
            WorkoutSet::new(date(2024, 1, 1), "squat", -2.5, 5).validate(),
            Err(WorkoutValidationError::InvalidWeight(-2.5))
        );
        assert!(WorkoutSet::new(date(2024, 1, 1), "squat", f64::NAN, 5)
            .validate()
            .is_err());
        assert_eq!(
            WorkoutSet::new(date(2024, 1, 1), " ", 10.0, 5).validate(),
            Err(WorkoutValidationError::MissingExercise)
        );
    }

    #[test]
    fn test_summary() {
        assert_eq!(
            WorkoutSet::new(date(2024, 1, 1), "squat", 60.0, 5).summary(),
            "60kg × 5"
        );
        assert_eq!(
            WorkoutSet::new(date(2024, 1, 1), "curl", 12.5, 10).summary(),
            "12.5kg × 10"
        );
    }

    #[test]
    fn test_reads_mixed_dates_and_integer_weights() {
        let json = r#"[
            {"date": "2024-02-01", "exercise": "squat", "weight": 100, "reps": 5},
            {"date": "2024-02-02T00:00:00", "exercise": "squat", "weight": 102.5, "reps": 3},
            {"date": "02/03/2024", "exercise": "squat", "weight": 105.0, "reps": 1}
        ]"#;
        let sets: Vec<WorkoutSet> = serde_json::from_str(json).unwrap();
        assert_eq!(sets[0].weight, 100.0);
        assert_eq!(sets[1].date, date(2024, 2, 2));
        assert_eq!(sets[2].date, date(2024, 2, 3));
    }

    #[test]
    fn test_writes_canonical_date() {
        let set = WorkoutSet::new(date(2024, 2, 3), "squat", 100.0, 5);
        let json = serde_json::to_string(&set).unwrap();
        assert!(json.contains("\"date\":\"2024-02-03\""));
    }
}
