//! Directory scanning.
//!
//! Lists the immediate children of a directory that carry a given extension.
//! The listing is taken once per run and sorted by file name, so callers get
//! the same order on every platform.

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{LectureKitError, Result};

/// A file found by the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    /// Full path to the file.
    pub path: PathBuf,
    /// Base name, used for classification and sorting.
    pub name: String,
}

impl FileEntry {
    /// Build an entry from a path. Returns `None` for paths without a name.
    pub fn from_path(path: PathBuf) -> Option<Self> {
        let name = path.file_name()?.to_string_lossy().into_owned();
        Some(Self { path, name })
    }
}

/// Files found by a scan, split into usable entries and excluded ones.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// Entries to process, sorted by name.
    pub entries: Vec<FileEntry>,
    /// Entries removed by an exclude pattern, sorted by name.
    pub excluded: Vec<FileEntry>,
}

impl ScanResult {
    /// Move entries satisfying `predicate` from `entries` into `excluded`.
    pub fn exclude_where<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&FileEntry) -> bool,
    {
        let (excluded, kept) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition::<Vec<_>, _>(|entry| predicate(entry));

        self.entries = kept;
        self.excluded.extend(excluded);
        self.excluded.sort_by(|a, b| a.name.cmp(&b.name));
    }
}

/// Non-recursive, extension-filtered directory scanner.
#[derive(Debug, Clone)]
pub struct DirectoryScanner {
    extension: String,
    excludes: GlobSet,
}

impl DirectoryScanner {
    /// Create a scanner for files ending in `.{extension}` (case-insensitive).
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            excludes: GlobSet::empty(),
        }
    }

    /// Skip files whose names match any of the given glob patterns.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern is not a valid glob.
    pub fn with_excludes<S: AsRef<str>>(mut self, patterns: &[S]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(Glob::new(pattern.as_ref())?);
        }
        self.excludes = builder.build()?;
        Ok(self)
    }

    /// List matching files directly inside `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if `dir` is not a directory or is not valid UTF-8.
    /// Entries that cannot be read are logged and left out.
    pub fn scan(&self, dir: &Path) -> Result<ScanResult> {
        if !dir.is_dir() {
            return Err(LectureKitError::NotADirectory {
                path: dir.to_path_buf(),
            });
        }

        let dir_str = dir.to_str().ok_or_else(|| {
            LectureKitError::invalid_config(format!(
                "Directory path is not valid UTF-8: {}",
                dir.display()
            ))
        })?;

        let pattern = format!(
            "{}/*.{}",
            glob::Pattern::escape(dir_str),
            glob::Pattern::escape(&self.extension)
        );
        let options = glob::MatchOptions {
            case_sensitive: false,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };

        let paths = glob::glob_with(&pattern, options)
            .map_err(|err| LectureKitError::other(err.to_string()))?;

        let mut result = ScanResult::default();
        for entry in paths {
            let path = match entry {
                Ok(path) => path,
                Err(err) => {
                    warn!(
                        path = %err.path().display(),
                        error = %err.error(),
                        "skipping unreadable entry"
                    );
                    continue;
                }
            };

            if !path.is_file() {
                continue;
            }

            let Some(entry) = FileEntry::from_path(path) else {
                continue;
            };

            if self.excludes.is_match(&entry.name) {
                debug!(file = %entry.name, "excluded by pattern");
                result.excluded.push(entry);
            } else {
                result.entries.push(entry);
            }
        }

        result.entries.sort_by(|a, b| a.name.cmp(&b.name));
        result.excluded.sort_by(|a, b| a.name.cmp(&b.name));

        debug!(
            dir = %dir.display(),
            found = result.entries.len(),
            excluded = result.excluded.len(),
            "scanned directory"
        );

        Ok(result)
    }
}
