//! Backup CLI commands
//!
//! Implements CLI commands for full backups and snapshot export/import.

use clap::{Subcommand, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;

use crate::display::format_backup_list;
use crate::error::{LiftlogError, LiftlogResult};
use crate::export::{export_snapshot_json, export_snapshot_yaml, import_from_json, unique_export_path};
use crate::services::LifecycleService;
use crate::storage::Storage;

/// Snapshot export format
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// JSON (importable)
    Json,
    /// YAML (human-readable, export only)
    Yaml,
}

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Back up the registry and every user's data
    Create,

    /// List available backups
    List,

    /// Export a snapshot of all users
    Export {
        /// Output file (stdout if omitted; an existing file is never overwritten)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Replace all data with a JSON snapshot
    Import {
        /// Snapshot file, or '-' for stdin
        file: String,

        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a backup command
pub fn handle_backup_command(storage: &Storage, cmd: BackupCommands) -> LiftlogResult<()> {
    let service = LifecycleService::new(storage);

    match cmd {
        BackupCommands::Create => {
            println!("Creating backup...");
            let backup_path = service.backup_all()?;
            let name = backup_path
                .file_name()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| backup_path.display().to_string());
            println!("Backup created: {}", name);
            println!("Location: {}", backup_path.display());
        }

        BackupCommands::List => {
            let backups = service.list_backups()?;
            println!("{}", format_backup_list(&backups));
            if backups.is_empty() {
                println!("Create one with: liftlog backup create");
            } else {
                println!(
                    "Keeping the {} most recent backups.",
                    storage.settings().backup_retention
                );
            }
        }

        BackupCommands::Export {
            output,
            format,
            pretty,
        } => {
            let snapshot = service.export_snapshot()?;

            match output {
                Some(output) => {
                    let path = unique_export_path(&output);
                    let file = File::create(&path).map_err(|e| {
                        LiftlogError::Export(format!(
                            "Failed to create file {}: {}",
                            path.display(),
                            e
                        ))
                    })?;
                    let mut writer = BufWriter::new(file);
                    write_snapshot(&snapshot, &mut writer, format, pretty)?;
                    writer
                        .flush()
                        .map_err(|e| LiftlogError::Export(e.to_string()))?;

                    println!(
                        "Exported {} users ({} exercises, {} workout sets) to: {}",
                        snapshot.users.len(),
                        snapshot.exercise_count(),
                        snapshot.workout_count(),
                        path.display()
                    );
                }
                None => {
                    let stdout = io::stdout();
                    let mut writer = stdout.lock();
                    write_snapshot(&snapshot, &mut writer, format, pretty)?;
                }
            }
        }

        BackupCommands::Import { file, force } => {
            let content = read_input(&file)?;
            let snapshot = import_from_json(&content)?;

            println!("Snapshot Information");
            println!("====================");
            println!("Created: {}", snapshot.timestamp.format("%Y-%m-%d %H:%M:%S"));
            println!("Users: {}", snapshot.users.len());
            println!("Exercises: {}", snapshot.exercise_count());
            println!("Workout sets: {}", snapshot.workout_count());
            println!();

            if !force {
                println!("WARNING: This will replace ALL current users and their data!");
                println!("To proceed, run again with --force flag:");
                println!("  liftlog backup import {} --force", file);
                return Ok(());
            }

            let result = service.import_snapshot(snapshot)?;
            println!(
                "Backup of previous data: {}",
                result.backup_path.display()
            );
            println!("Import complete!");
            println!("{}", result.summary());
        }
    }

    Ok(())
}

fn write_snapshot<W: Write>(
    snapshot: &crate::export::Snapshot,
    writer: &mut W,
    format: ExportFormat,
    pretty: bool,
) -> LiftlogResult<()> {
    match format {
        ExportFormat::Json => export_snapshot_json(snapshot, writer, pretty),
        ExportFormat::Yaml => export_snapshot_yaml(snapshot, writer),
    }
}

/// Read a snapshot from a file, or stdin for `-`
fn read_input(file: &str) -> LiftlogResult<String> {
    let mut content = String::new();

    if file == "-" {
        io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| LiftlogError::Import(format!("Failed to read stdin: {}", e)))?;
    } else {
        File::open(file)
            .and_then(|mut f| f.read_to_string(&mut content))
            .map_err(|e| LiftlogError::Import(format!("Failed to read {}: {}", file, e)))?;
    }

    Ok(content)
}
