//! Exercise catalog model
//!
//! Exercises are keyed by their normalized name: lowercase with runs of
//! whitespace collapsed to a single space.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Muscle group an exercise is filed under
///
/// Stored by label; labels this version does not know read back as `Other`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(from = "String", into = "String")]
pub enum MuscleGroup {
    Arms,
    Back,
    Chest,
    Core,
    FullBody,
    Legs,
    Shoulders,
    #[default]
    Other,
}

impl MuscleGroup {
    /// All muscle groups, alphabetically
    pub fn all() -> &'static [MuscleGroup] {
        &[
            MuscleGroup::Arms,
            MuscleGroup::Back,
            MuscleGroup::Chest,
            MuscleGroup::Core,
            MuscleGroup::FullBody,
            MuscleGroup::Legs,
            MuscleGroup::Other,
            MuscleGroup::Shoulders,
        ]
    }

    /// Display label, as stored on disk
    pub fn label(&self) -> &'static str {
        match self {
            MuscleGroup::Arms => "Arms",
            MuscleGroup::Back => "Back",
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Core => "Core",
            MuscleGroup::FullBody => "Full Body",
            MuscleGroup::Legs => "Legs",
            MuscleGroup::Shoulders => "Shoulders",
            MuscleGroup::Other => "Other",
        }
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for MuscleGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_exercise_name(&s.replace(['-', '_'], " "));
        if wanted == "fullbody" {
            return Ok(MuscleGroup::FullBody);
        }

        MuscleGroup::all()
            .iter()
            .copied()
            .find(|g| g.label().to_lowercase() == wanted)
            .ok_or_else(|| {
                let labels: Vec<_> = MuscleGroup::all().iter().map(|g| g.label()).collect();
                format!(
                    "Unknown muscle group '{}' (expected one of: {})",
                    s.trim(),
                    labels.join(", ")
                )
            })
    }
}

impl From<String> for MuscleGroup {
    fn from(label: String) -> Self {
        label.parse().unwrap_or_default()
    }
}

impl From<MuscleGroup> for String {
    fn from(group: MuscleGroup) -> Self {
        group.label().to_string()
    }
}

/// Normalize an exercise name: lowercase, whitespace collapsed
pub fn normalize_exercise_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// An entry in a user's exercise catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    /// Normalized name (the catalog key)
    pub name: String,

    /// Muscle group
    #[serde(default)]
    pub muscle_group: MuscleGroup,

    /// When the exercise was first cataloged
    pub created_at: NaiveDateTime,
}

impl Exercise {
    /// Create a new catalog entry; the name is normalized
    pub fn new(name: &str, muscle_group: MuscleGroup) -> Self {
        Self {
            name: normalize_exercise_name(name),
            muscle_group,
            created_at: chrono::Local::now().naive_local(),
        }
    }

    /// Normalized key of this entry
    ///
    /// Older files may hold names that were never normalized.
    pub fn key(&self) -> String {
        normalize_exercise_name(&self.name)
    }

    /// Validate the exercise
    pub fn validate(&self) -> Result<(), ExerciseValidationError> {
        if self.name.trim().is_empty() {
            return Err(ExerciseValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(ExerciseValidationError::NameTooLong(self.name.len()));
        }

        Ok(())
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.muscle_group)
    }
}

/// Validation errors for exercises
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExerciseValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for ExerciseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Exercise name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Exercise name too long ({} characters, max 100)", len)
            }
        }
    }
}

impl std::error::Error for ExerciseValidationError {}
