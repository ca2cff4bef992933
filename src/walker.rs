//! Dataset discovery.
//!
//! Pending sayings are `*.txt` files without a sibling `.json` output.
//! The output files themselves are the only record of what has been processed.
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::Error;
use crate::processing::artifacts::output_path;

/// Extension of saying files.
pub const INPUT_EXTENSION: &str = ".txt";

/// Discovery parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    /// Keep at most this many files overall.
    pub limit: Option<usize>,
    /// Include files that already have an output.
    pub overwrite: bool,
    /// Keep at most this many files from each directory.
    pub limit_per_dir: Option<usize>,
}

impl Discovery {
    fn is_pending(&self, path: &Path) -> bool {
        self.overwrite || !output_path(path).exists()
    }

    /// Visit `dir` in name order, recursing into subdirectories when met.
    fn visit(&self, dir: &Path, found: &mut Vec<PathBuf>) -> Result<(), Error> {
        let mut entries = fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;
        entries.sort_by_key(|e| e.file_name());

        let mut added_in_dir = 0;
        for entry in entries {
            let path = entry.path();
            if entry.file_type()?.is_dir() {
                self.visit(&path, found)?;
                continue;
            }

            if !has_input_extension(entry.file_name()) {
                continue;
            }
            if self.limit_per_dir.map_or(false, |max| added_in_dir >= max) {
                continue;
            }
            if self.is_pending(&path) {
                found.push(path);
                added_in_dir += 1;
            } else {
                debug!("skipping {}: output exists", path.display());
            }
        }
        Ok(())
    }

    /// List pending sayings under `root`, sorted by full path.
    ///
    /// A missing `root` yields an empty list.
    pub fn discover(&self, root: &Path) -> Result<Vec<PathBuf>, Error> {
        if !root.is_dir() {
            return Ok(Vec::new());
        }

        let mut found = Vec::new();
        self.visit(root, &mut found)?;
        found.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));

        // a limit of 0 means no limit
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            found.truncate(limit);
        }
        Ok(found)
    }
}

fn has_input_extension(name: OsString) -> bool {
    name.to_string_lossy().ends_with(INPUT_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "saying").unwrap();
    }

    fn relative(root: &Path, paths: Vec<PathBuf>) -> Vec<String> {
        paths
            .into_iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn sorted_globally() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "B/B_1.txt");
        touch(dir.path(), "A/A_1.txt");

        let found = Discovery::default().discover(dir.path()).unwrap();
        assert_eq!(relative(dir.path(), found), vec!["A/A_1.txt", "B/B_1.txt"]);
    }

    #[test]
    fn names_compared_bytewise() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "A/a.txt");
        touch(dir.path(), "A/B.txt");

        let found = Discovery::default().discover(dir.path()).unwrap();
        assert_eq!(relative(dir.path(), found), vec!["A/B.txt", "A/a.txt"]);

        let per_dir = Discovery {
            limit_per_dir: Some(1),
            ..Default::default()
        };
        let found = per_dir.discover(dir.path()).unwrap();
        assert_eq!(relative(dir.path(), found), vec!["A/B.txt"]);
    }

    #[test]
    fn only_txt_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "A/A_1.txt");
        touch(dir.path(), "A/notes.md");
        touch(dir.path(), "A/A_2-error.json");

        let found = Discovery::default().discover(dir.path()).unwrap();
        assert_eq!(relative(dir.path(), found), vec!["A/A_1.txt"]);
    }

    #[test]
    fn existing_outputs() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "A/A_1.txt");
        touch(dir.path(), "A/A_1.json");
        touch(dir.path(), "A/A_2.txt");

        let skipping = Discovery::default().discover(dir.path()).unwrap();
        assert_eq!(relative(dir.path(), skipping), vec!["A/A_2.txt"]);

        let overwriting = Discovery {
            overwrite: true,
            ..Default::default()
        }
        .discover(dir.path())
        .unwrap();
        assert_eq!(
            relative(dir.path(), overwriting),
            vec!["A/A_1.txt", "A/A_2.txt"]
        );
    }

    #[test]
    fn limit_per_dir_counts_eligible_files_per_directory() {
        let dir = tempfile::tempdir().unwrap();
        for rel in ["A/1.txt", "A/2.txt", "A/3.txt", "B/1.txt", "B/2.txt", "top.txt"] {
            touch(dir.path(), rel);
        }
        // already processed, does not count
        touch(dir.path(), "A/1.json");

        let found = Discovery {
            limit_per_dir: Some(1),
            ..Default::default()
        }
        .discover(dir.path())
        .unwrap();
        assert_eq!(
            relative(dir.path(), found),
            vec!["A/2.txt", "B/1.txt", "top.txt"]
        );
    }

    #[test]
    fn global_limit_after_sort() {
        let dir = tempfile::tempdir().unwrap();
        for rel in ["C/1.txt", "B/1.txt", "A/1.txt", "A/2.txt"] {
            touch(dir.path(), rel);
        }

        let found = Discovery {
            limit: Some(3),
            ..Default::default()
        }
        .discover(dir.path())
        .unwrap();
        assert_eq!(
            relative(dir.path(), found),
            vec!["A/1.txt", "A/2.txt", "B/1.txt"]
        );

        let unlimited = Discovery {
            limit: Some(0),
            ..Default::default()
        }
        .discover(dir.path())
        .unwrap();
        assert_eq!(unlimited.len(), 4);
    }

    #[test]
    fn missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let found = Discovery::default()
            .discover(&dir.path().join("datasets"))
            .unwrap();
        assert!(found.is_empty());
    }
}
