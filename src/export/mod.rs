//! Export module for Liftlog
//!
//! Snapshot documents and their renderings:
//! - JSON: machine-readable, importable with `backup import`
//! - YAML: human-readable, export only

pub mod json;
pub mod snapshot;
pub mod yaml;

use std::path::{Path, PathBuf};

pub use json::{export_snapshot_json, import_from_json};
pub use snapshot::{Snapshot, UserData};
pub use yaml::export_snapshot_yaml;

/// First free variant of `path`, appending `_1`, `_2`, ... before the extension
pub fn unique_export_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path.extension().map(|e| e.to_string_lossy().into_owned());

    (1..)
        .map(|counter| {
            let name = match &extension {
                Some(ext) => format!("{}_{}.{}", stem, counter, ext),
                None => format!("{}_{}", stem, counter),
            };
            path.with_file_name(name)
        })
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| path.to_path_buf())
}
