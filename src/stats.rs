//! Inspection of generated records.
//!
//! Walks a datasets directory, loads every success artifact and keeps the ones
//! whose scores match a [ScoreFilter].
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::Error;
use crate::filtering::Filter;
use crate::record::SayingEntry;

/// Exact score constraints. Unset scores are not checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreFilter {
    pub vulgarity: Option<u8>,
    pub popularity: Option<u8>,
    pub difficulty: Option<u8>,
}

impl Filter<&SayingEntry> for ScoreFilter {
    fn detect(&self, entry: &SayingEntry) -> bool {
        self.vulgarity.map_or(true, |v| entry.vulgarity == Some(v))
            && self
                .popularity
                .map_or(true, |p| entry.cultural_popularity == p)
            && self.difficulty.map_or(true, |d| entry.words_difficulty == d)
    }
}

fn is_success_artifact(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    name.ends_with(".json") && !name.ends_with("-error.json")
}

fn collect(dir: &Path, entries: &mut Vec<(PathBuf, SayingEntry)>) -> Result<(), Error> {
    let mut children = fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;
    children.sort_by_key(|c| c.file_name());

    for child in children {
        let path = child.path();
        if child.file_type()?.is_dir() {
            collect(&path, entries)?;
        } else if is_success_artifact(&path) {
            let parsed = fs::read_to_string(&path)
                .map_err(Error::from)
                .and_then(|s| serde_json::from_str::<SayingEntry>(&s).map_err(Error::from));
            match parsed {
                Ok(entry) => entries.push((path, entry)),
                Err(e) => warn!("skipping {}: {}", path.display(), e),
            }
        }
    }
    Ok(())
}

/// Load every generated record under `root` and keep those detected by `filter`.
pub fn matching_entries(
    root: &Path,
    filter: &ScoreFilter,
) -> Result<Vec<(PathBuf, SayingEntry)>, Error> {
    if !root.is_dir() {
        return Err(Error::Custom(format!(
            "Directory not found: {}",
            root.display()
        )));
    }

    let mut entries = Vec::new();
    collect(root, &mut entries)?;
    debug!("{} records found under {}", entries.len(), root.display());

    Ok(entries
        .into_iter()
        .filter(|(_, entry)| filter.detect(entry))
        .collect())
}
