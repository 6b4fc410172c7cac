//! Snapshot document
//!
//! A snapshot is one JSON document holding the user registry and every
//! active user's exercises and workouts. It is the unit of export/import.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::{Exercise, User, Username, WorkoutSet};
use crate::storage::exercises::ExerciseData;
use crate::storage::workouts::WorkoutData;

/// Full system snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// When the snapshot was taken (local time)
    pub timestamp: NaiveDateTime,

    /// Registered users in registration order
    pub users: Vec<User>,

    /// Collections keyed by username
    #[serde(default)]
    pub user_data: BTreeMap<String, UserData>,
}

/// One user's collections inside a snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    #[serde(default, deserialize_with = "exercise_list")]
    pub exercises: Vec<Exercise>,

    #[serde(default, deserialize_with = "workout_list")]
    pub workouts: Vec<WorkoutSet>,
}

// Older snapshots embed the whole file object instead of the bare list
#[derive(Deserialize)]
#[serde(untagged)]
enum ListOrFile<T, F> {
    List(Vec<T>),
    File(F),
}

fn exercise_list<'de, D>(deserializer: D) -> Result<Vec<Exercise>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        match ListOrFile::<Exercise, ExerciseData>::deserialize(deserializer)? {
            ListOrFile::List(list) => list,
            ListOrFile::File(file) => file.exercises,
        },
    )
}

fn workout_list<'de, D>(deserializer: D) -> Result<Vec<WorkoutSet>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        match ListOrFile::<WorkoutSet, WorkoutData>::deserialize(deserializer)? {
            ListOrFile::List(list) => list,
            ListOrFile::File(file) => file.workouts,
        },
    )
}

impl Snapshot {
    /// Create a snapshot taken now
    pub fn new(users: Vec<User>, user_data: BTreeMap<String, UserData>) -> Self {
        Self {
            timestamp: chrono::Local::now().naive_local(),
            users,
            user_data,
        }
    }

    /// Check the whole document before anything is written
    ///
    /// Usernames must be valid and unique, every `user_data` key must belong
    /// to a listed user, and every exercise and set must validate.
    pub fn validate(&self) -> Result<(), String> {
        let mut names = HashSet::new();
        let mut ids = HashSet::new();
        for user in &self.users {
            if !names.insert(user.name.as_str()) {
                return Err(format!("Duplicate user '{}'", user.name));
            }
            if !ids.insert(user.id) {
                return Err(format!("Duplicate user id {}", user.id));
            }
        }

        for (name, data) in &self.user_data {
            let username =
                Username::new(name).map_err(|e| format!("Invalid username '{}': {}", name, e))?;
            if !names.contains(username.as_str()) {
                return Err(format!("Data for unknown user '{}'", name));
            }

            for exercise in &data.exercises {
                exercise
                    .validate()
                    .map_err(|e| format!("User '{}': {}", name, e))?;
            }

            for (i, set) in data.workouts.iter().enumerate() {
                set.validate()
                    .map_err(|e| format!("User '{}', workout {}: {}", name, i, e))?;
            }
        }

        Ok(())
    }

    /// Number of exercises across all users
    pub fn exercise_count(&self) -> usize {
        self.user_data.values().map(|d| d.exercises.len()).sum()
    }

    /// Number of workout sets across all users
    pub fn workout_count(&self) -> usize {
        self.user_data.values().map(|d| d.workouts.len()).sum()
    }
}
