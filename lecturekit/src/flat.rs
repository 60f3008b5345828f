//! Flat merge: many PDFs into one caller-chosen output.
//!
//! Inputs come either from a directory (every PDF directly inside it,
//! sorted by name) or from an explicit ordered list. Listed paths that do
//! not exist are skipped with a warning.
//!
//! # Examples
//!
//! ```no_run
//! use lecturekit::flat::FlatMerger;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let report = FlatMerger::new()
//!     .merge_directory(Path::new("downloads"), Path::new("downloads/merged.pdf"))
//!     .await?;
//! println!("{} pages", report.total_pages);
//! # Ok(())
//! # }
//! ```

use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

use crate::config::{FlatInputs, FlatMergeConfig, OverwriteMode};
use crate::error::{LectureKitError, Result};
use crate::io::{PdfReader, PdfWriter};
use crate::merge::DocumentMerger;
use crate::scan::DirectoryScanner;

/// One input of a flat merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatInput {
    /// Path to the PDF.
    pub path: PathBuf,
    /// Number of pages it contributed.
    pub pages: usize,
}

/// Summary of a flat merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatMergeReport {
    /// Output path.
    pub output: PathBuf,
    /// Inputs in merge order.
    pub inputs: Vec<FlatInput>,
    /// Listed paths that did not exist.
    pub missing: Vec<PathBuf>,
    /// Pages in the (planned) output.
    pub total_pages: usize,
    /// Size of the written output; `None` on a dry run.
    pub bytes: Option<u64>,
    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl FlatMergeReport {
    /// The input directory held no PDFs; nothing was written.
    pub fn nothing_to_do(&self) -> bool {
        self.inputs.is_empty()
    }
}

/// Concatenates a directory or an explicit list of PDFs.
#[derive(Debug, Clone, Default)]
pub struct FlatMerger {
    reader: PdfReader,
    writer: PdfWriter,
}

impl FlatMerger {
    /// Create a merger with default reader and writer settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge every PDF in `dir` (except `output` itself) into `output`,
    /// overwriting it if it exists. A directory without PDFs yields a report
    /// for which [`FlatMergeReport::nothing_to_do`] holds.
    pub async fn merge_directory(&self, dir: &Path, output: &Path) -> Result<FlatMergeReport> {
        self.run(&FlatMergeConfig {
            inputs: FlatInputs::Directory(dir.to_path_buf()),
            output: output.to_path_buf(),
            dry_run: false,
            overwrite_mode: OverwriteMode::Force,
        })
        .await
    }

    /// Merge `paths` in the given order into `output`, overwriting it if it
    /// exists. Paths that do not exist are skipped.
    pub async fn merge_list(&self, paths: &[PathBuf], output: &Path) -> Result<FlatMergeReport> {
        self.run(&FlatMergeConfig {
            inputs: FlatInputs::List(paths.to_vec()),
            output: output.to_path_buf(),
            dry_run: false,
            overwrite_mode: OverwriteMode::Force,
        })
        .await
    }

    /// Run the merge described by `config`.
    ///
    /// [`OverwriteMode::Prompt`] is treated like [`OverwriteMode::Force`]
    /// here; asking the user is the caller's job.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An input list has no entry left after dropping missing paths
    /// - The output exists under [`OverwriteMode::NoClobber`]
    /// - Any input cannot be loaded, or the output cannot be written
    pub async fn run(&self, config: &FlatMergeConfig) -> Result<FlatMergeReport> {
        config.validate()?;

        let (paths, missing) = collect_inputs(&config.inputs, &config.output)?;
        if paths.is_empty() {
            let FlatInputs::Directory(dir) = &config.inputs else {
                return Err(LectureKitError::NoFilesToMerge);
            };

            info!(dir = %dir.display(), "nothing to do");
            return Ok(FlatMergeReport {
                output: config.output.clone(),
                inputs: Vec::new(),
                missing,
                total_pages: 0,
                bytes: None,
                dry_run: config.dry_run,
            });
        }

        if !config.dry_run
            && config.overwrite_mode == OverwriteMode::NoClobber
            && config.output.exists()
        {
            return Err(LectureKitError::output_exists(config.output.clone()));
        }

        let mut merger = DocumentMerger::new();
        let mut inputs = Vec::with_capacity(paths.len());

        for path in paths {
            let loaded = self.reader.load(&path).await?;
            debug!(file = %path.display(), pages = loaded.page_count, "loaded input");
            inputs.push(FlatInput {
                path,
                pages: loaded.page_count,
            });

            if !config.dry_run {
                merger.append(loaded)?;
            }
        }

        let total_pages = inputs.iter().map(|input| input.pages).sum();

        let bytes = if config.dry_run {
            None
        } else {
            let (document, _) = merger.finish()?;
            let stats = self
                .writer
                .save_with_stats(document, &config.output)
                .await?;
            Some(stats.file_size)
        };

        Ok(FlatMergeReport {
            output: config.output.clone(),
            inputs,
            missing,
            total_pages,
            bytes,
            dry_run: config.dry_run,
        })
    }
}

/// Resolve the input source into (present, missing) paths.
fn collect_inputs(inputs: &FlatInputs, output: &Path) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
    match inputs {
        FlatInputs::Directory(dir) => {
            let mut scan = DirectoryScanner::new("pdf").scan(dir)?;
            scan.exclude_where(|entry| same_file(&entry.path, output));
            let paths = scan.entries.into_iter().map(|entry| entry.path).collect();
            Ok((paths, Vec::new()))
        }
        FlatInputs::List(list) => {
            let (present, missing): (Vec<_>, Vec<_>) =
                list.iter().cloned().partition(|path| path.exists());
            for path in &missing {
                warn!(file = %path.display(), "input not found, skipping");
            }
            Ok((present, missing))
        }
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }

    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Read input paths from a file, one per line.
///
/// Lines starting with `#` are comments and empty lines are skipped.
/// Relative paths are taken relative to the current directory.
///
/// # Errors
///
/// Returns [`LectureKitError::FailedToReadInputList`] if the file cannot be
/// read.
pub async fn read_input_list(path: &Path) -> Result<Vec<PathBuf>> {
    let read_error = |source| LectureKitError::FailedToReadInputList {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).await.map_err(read_error)?;
    let mut lines = BufReader::new(file).lines();
    let mut paths = Vec::new();

    while let Some(line) = lines.next_line().await.map_err(read_error)? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        paths.push(PathBuf::from(line));
    }

    Ok(paths)
}
