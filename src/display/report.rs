//! Report formatting utilities for terminal output

use tabled::builder::Builder;
use tabled::{Table, Tabled};

use crate::models::format_weight;
use crate::reports::{ProgressPoint, RecentWorkoutsReport, WeeklyComparison};

use super::render;

/// Format the recent-workouts pivot, headed by dates in `date_format`
pub fn format_recent_workouts(report: &RecentWorkoutsReport, date_format: &str) -> String {
    if report.is_empty() {
        return "No workouts logged yet.".to_string();
    }

    let mut builder = Builder::default();

    let mut header = vec!["Exercise".to_string()];
    header.extend(report.dates.iter().map(|d| d.format(date_format).to_string()));
    builder.push_record(header);

    for row in &report.rows {
        let mut record = vec![row.exercise.clone()];
        record.extend(row.cells.iter().cloned());
        builder.push_record(record);
    }

    render(builder.build())
}

#[derive(Tabled)]
struct ProgressRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Max (kg)")]
    max_weight: String,
    #[tabled(rename = "")]
    bar: String,
}

/// Format the daily maximum series with a bar per day
pub fn format_progress(exercise: &str, series: &[ProgressPoint]) -> String {
    if series.is_empty() {
        return format!("No sets logged for {}.", exercise);
    }

    let max = series.iter().map(|p| p.max_weight).fold(0.0, f64::max);
    let rows = series.iter().map(|p| ProgressRow {
        date: p.date.format("%Y-%m-%d").to_string(),
        max_weight: format_weight(p.max_weight),
        bar: format_bar(p.max_weight, max, 30),
    });

    format!("Progress: {}\n{}", exercise, render(Table::new(rows)))
}

/// Format the week-over-week comparison
pub fn format_weekly_comparison(comparison: &WeeklyComparison) -> String {
    let change = comparison.change();
    let trend = match change {
        c if c > 0 => format!("+{}", c),
        c => c.to_string(),
    };

    format!(
        "This week:  {} sets\nLast week:  {} sets\nChange:     {}\n",
        comparison.this_week, comparison.previous_week, trend
    )
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
