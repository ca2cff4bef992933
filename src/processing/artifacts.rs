//! Result and error artifacts, written next to their saying.
//!
//! For `dir/saying.txt`:
//! - success: `dir/saying.json`,
//! - failure: `dir/saying-error.json`.
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, error, info};
use serde::Serialize;

use crate::error::Error;
use crate::record::{SayingInput, SayingRecord};

/// Sibling success artifact path.
pub fn output_path(input: &Path) -> PathBuf {
    input.with_extension("json")
}

/// Sibling error artifact path.
pub fn error_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}-error.json"))
}

/// Error artifact layout.
#[derive(Debug, Serialize)]
struct ErrorArtifact<'a> {
    file: &'a Path,
    error: &'a str,
    expected: &'a str,
    got: String,
    #[serde(rename = "fullData")]
    full_data: Option<&'a SayingRecord>,
}

/// Write the success artifact of `input`, removing any stale error artifact.
///
/// The original text echo is not persisted.
pub fn write_success(input: &SayingInput, record: &SayingRecord) -> Result<PathBuf, Error> {
    let path = output_path(&input.path);
    let json = serde_json::to_string_pretty(&record.entry)?;
    fs::write(&path, json)?;
    info!("Generated: {}", path.display());

    let stale = error_path(&input.path);
    if stale.exists() {
        debug!("removing stale error file {}", stale.display());
        fs::remove_file(stale)?;
    }
    Ok(path)
}

/// Write the error artifact of `input`.
pub fn write_failure(
    input: &SayingInput,
    record: Option<&SayingRecord>,
    reason: &str,
) -> Result<PathBuf, Error> {
    let path = error_path(&input.path);
    let (part1, part2) = record
        .map(|r| (r.entry.lu_part1.as_str(), r.entry.lu_part2.as_str()))
        .unwrap_or_default();

    let artifact = ErrorArtifact {
        file: &input.path,
        error: reason,
        expected: &input.content,
        got: format!("{part1} | {part2}"),
        full_data: record,
    };
    fs::write(&path, serde_json::to_string_pretty(&artifact)?)?;
    error!("FAILED: {} - {}", input.path.display(), reason);
    Ok(path)
}
