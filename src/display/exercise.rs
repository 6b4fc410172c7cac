//! Exercise display formatting

use tabled::{Table, Tabled};

use crate::models::Exercise;

use super::render;

#[derive(Tabled)]
struct ExerciseRow<'a> {
    #[tabled(rename = "Exercise")]
    name: &'a str,
    #[tabled(rename = "Muscle Group")]
    muscle_group: &'static str,
    #[tabled(rename = "Added")]
    added: String,
}

/// Format an exercise catalog as a table
pub fn format_exercise_list(exercises: &[Exercise]) -> String {
    if exercises.is_empty() {
        return "No exercises found.".to_string();
    }

    let rows = exercises.iter().map(|e| ExerciseRow {
        name: &e.name,
        muscle_group: e.muscle_group.label(),
        added: e.created_at.format("%Y-%m-%d").to_string(),
    });

    render(Table::new(rows))
}
