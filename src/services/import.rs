//! CSV Import service
//!
//! Imports historical workout sets and exercise catalogs from CSV. Every row
//! is parsed and validated before anything is written, so a bad row leaves
//! the user's data untouched.

use std::collections::HashSet;
use std::io::Read;

use csv::{Reader, StringRecord};

use crate::audit::{AuditEntry, EntityType, Operation};
use crate::error::{LiftlogError, LiftlogResult};
use crate::models::{
    normalize_exercise_name, parse_flexible_date, Exercise, MuscleGroup, Username, WorkoutSet,
};
use crate::storage::Storage;

/// Columns a workout CSV must provide
pub const WORKOUT_COLUMNS: [&str; 4] = ["date", "exercise", "weight", "reps"];

/// Result of a completed workout import
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportSummary {
    /// Number of workout sets appended
    pub workouts_imported: usize,
    /// Exercises added to the catalog with muscle group `Other`
    pub new_exercises: Vec<String>,
}

impl ImportSummary {
    /// One-line description for the user
    pub fn message(&self) -> String {
        let mut message = format!("Imported {} workouts", self.workouts_imported);
        if !self.new_exercises.is_empty() {
            message.push_str(&format!(
                " and added {} new exercises. Categorize them with `exercise add --group`.",
                self.new_exercises.len()
            ));
        }
        message
    }
}

/// Column positions of a workout CSV
#[derive(Debug, Clone, Copy)]
struct WorkoutColumns {
    date: usize,
    exercise: usize,
    weight: usize,
    reps: usize,
}

impl WorkoutColumns {
    /// Locate the required columns, naming any that are missing
    fn from_headers(headers: &StringRecord) -> LiftlogResult<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        let missing: Vec<&str> = WORKOUT_COLUMNS
            .iter()
            .copied()
            .filter(|&c| find(c).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(LiftlogError::Validation(format!(
                "CSV must contain columns: {} (missing: {})",
                WORKOUT_COLUMNS.join(", "),
                missing.join(", ")
            )));
        }

        Ok(Self {
            date: find("date").unwrap_or_default(),
            exercise: find("exercise").unwrap_or_default(),
            weight: find("weight").unwrap_or_default(),
            reps: find("reps").unwrap_or_default(),
        })
    }
}

/// Parse every row of a workout CSV
///
/// Rows are numbered from 1, not counting the header. The first bad row
/// fails the whole parse.
pub fn parse_workout_csv<R: Read>(reader: R) -> LiftlogResult<Vec<WorkoutSet>> {
    let mut reader = Reader::from_reader(reader);
    let headers = reader
        .headers()
        .map_err(|e| LiftlogError::Validation(format!("Failed to read CSV header: {}", e)))?
        .clone();
    let columns = WorkoutColumns::from_headers(&headers)?;

    let mut sets = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let row = idx + 1;
        let record =
            result.map_err(|e| LiftlogError::Validation(format!("Row {}: {}", row, e)))?;
        let set = parse_workout_record(&record, columns)
            .map_err(|e| LiftlogError::Validation(format!("Row {}: {}", row, e)))?;
        sets.push(set);
    }

    Ok(sets)
}

fn parse_workout_record(
    record: &StringRecord,
    columns: WorkoutColumns,
) -> Result<WorkoutSet, String> {
    let field = |i: usize| record.get(i).map(str::trim).unwrap_or("");

    let date = parse_flexible_date(field(columns.date))?;

    let exercise = normalize_exercise_name(field(columns.exercise));
    if exercise.is_empty() {
        return Err("Missing exercise name".to_string());
    }

    let weight = parse_weight(field(columns.weight))?;
    let reps = parse_reps(field(columns.reps))?;

    let set = WorkoutSet::new(date, exercise, weight, reps);
    set.validate().map_err(|e| e.to_string())?;
    Ok(set)
}

/// Parse a non-negative weight
fn parse_weight(s: &str) -> Result<f64, String> {
    let weight: f64 = s
        .parse()
        .map_err(|_| format!("Could not parse weight: '{}'", s))?;
    if !weight.is_finite() || weight < 0.0 {
        return Err(format!("Weight must be a non-negative number, got '{}'", s));
    }
    Ok(weight)
}

/// Parse a rep count, accepting integral floats such as "5.0"
fn parse_reps(s: &str) -> Result<u32, String> {
    if let Ok(reps) = s.parse::<u32>() {
        return Ok(reps);
    }

    match s.parse::<f64>() {
        Ok(value)
            if value.is_finite()
                && value >= 0.0
                && value.fract() == 0.0
                && value <= u32::MAX as f64 =>
        {
            Ok(value as u32)
        }
        _ => Err(format!("Could not parse reps: '{}'", s)),
    }
}

/// Parse an exercise catalog CSV
///
/// Requires an `exercise` column; an optional `muscle_group` column is
/// read leniently (unknown or empty becomes `Other`). Blank names are
/// skipped.
pub fn parse_exercise_csv<R: Read>(reader: R) -> LiftlogResult<Vec<Exercise>> {
    let mut reader = Reader::from_reader(reader);
    let headers = reader
        .headers()
        .map_err(|e| LiftlogError::Validation(format!("Failed to read CSV header: {}", e)))?
        .clone();

    let name_col = headers
        .iter()
        .position(|h| h.trim() == "exercise")
        .ok_or_else(|| LiftlogError::Validation("CSV must contain column: exercise".into()))?;
    let group_col = headers.iter().position(|h| h.trim() == "muscle_group");

    let mut exercises = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record =
            result.map_err(|e| LiftlogError::Validation(format!("Row {}: {}", idx + 1, e)))?;

        let name = record.get(name_col).map(str::trim).unwrap_or("");
        if name.is_empty() {
            continue;
        }

        let group = group_col
            .and_then(|i| record.get(i))
            .and_then(|g| g.parse::<MuscleGroup>().ok())
            .unwrap_or_default();

        let exercise = Exercise::new(name, group);
        exercise
            .validate()
            .map_err(|e| LiftlogError::Validation(format!("Row {}: {}", idx + 1, e)))?;
        exercises.push(exercise);
    }

    Ok(exercises)
}

/// Service for CSV import
pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    /// Create a new import service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Import workout sets from CSV
    ///
    /// Unknown exercises are added to the catalog as `Other`, then the sets
    /// are appended to the user's log.
    pub fn import_workouts_csv<R: Read>(
        &self,
        user: &Username,
        reader: R,
    ) -> LiftlogResult<ImportSummary> {
        let sets = parse_workout_csv(reader)?;

        let (summary, created) = self.storage.with_user_store(user, |store| {
            let mut known: HashSet<String> = store
                .exercises
                .get_all()?
                .iter()
                .map(Exercise::key)
                .collect();

            let mut created = Vec::new();
            for set in &sets {
                if known.insert(set.exercise.clone()) {
                    let exercise = Exercise::new(&set.exercise, MuscleGroup::Other);
                    store.exercises.upsert(exercise.clone())?;
                    created.push(exercise);
                }
            }

            if !created.is_empty() {
                store.exercises.save()?;
            }
            store.workouts.extend(sets.iter().cloned())?;
            store.workouts.save()?;

            let summary = ImportSummary {
                workouts_imported: sets.len(),
                new_exercises: created.iter().map(|e| e.name.clone()).collect(),
            };
            Ok((summary, created))
        })?;

        let mut entries: Vec<AuditEntry> = created
            .iter()
            .map(|e| AuditEntry::create(EntityType::Exercise, &e.name, e).for_user(user.as_str()))
            .collect();
        entries.push(
            AuditEntry::event(
                Operation::Import,
                EntityType::WorkoutSet,
                "csv",
                format!("Imported {} workout sets from CSV", summary.workouts_imported),
            )
            .for_user(user.as_str()),
        );
        self.storage.audit().log_batch(&entries)?;

        tracing::info!(
            user = %user,
            workouts = summary.workouts_imported,
            new_exercises = summary.new_exercises.len(),
            "Imported workouts from CSV"
        );

        Ok(summary)
    }

    /// Import an exercise catalog from CSV
    ///
    /// Only names not yet cataloged are added; existing entries are left
    /// unchanged. Returns the names that were added.
    pub fn import_exercises_csv<R: Read>(
        &self,
        user: &Username,
        reader: R,
    ) -> LiftlogResult<Vec<String>> {
        let parsed = parse_exercise_csv(reader)?;

        let added = self.storage.with_user_store(user, |store| {
            let mut known: HashSet<String> = store
                .exercises
                .get_all()?
                .iter()
                .map(Exercise::key)
                .collect();

            let mut added = Vec::new();
            for exercise in parsed {
                if known.insert(exercise.key()) {
                    store.exercises.upsert(exercise.clone())?;
                    added.push(exercise);
                }
            }

            if !added.is_empty() {
                store.exercises.save()?;
            }
            Ok(added)
        })?;

        let entries: Vec<AuditEntry> = added
            .iter()
            .map(|e| AuditEntry::create(EntityType::Exercise, &e.name, e).for_user(user.as_str()))
            .collect();
        self.storage.audit().log_batch(&entries)?;

        tracing::info!(user = %user, added = added.len(), "Imported exercises from CSV");

        Ok(added.into_iter().map(|e| e.name).collect())
    }
}
