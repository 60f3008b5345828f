//! PDF merging operations.
//!
//! # Examples
//!
//! ```no_run
//! use lecturekit::io::PdfReader;
//! use lecturekit::merge::merge_files;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let inputs = vec![PathBuf::from("Ch1 - a.pdf"), PathBuf::from("Ch1 - b.pdf")];
//! let (document, stats) = merge_files(&PdfReader::new(), &inputs).await?;
//! println!("Merged {} pages", stats.total_pages);
//! # Ok(())
//! # }
//! ```

pub mod merger;

pub use merger::{DocumentMerger, MergeStatistics};

use lopdf::Document;
use std::path::PathBuf;

use crate::error::Result;
use crate::io::PdfReader;

/// Load `paths` one at a time, in order, and concatenate them.
///
/// Stops at the first file that cannot be loaded or appended.
///
/// # Errors
///
/// Returns the first load or merge error, or
/// [`NoFilesToMerge`](crate::error::LectureKitError::NoFilesToMerge) if
/// `paths` is empty.
pub async fn merge_files(
    reader: &PdfReader,
    paths: &[PathBuf],
) -> Result<(Document, MergeStatistics)> {
    let mut merger = DocumentMerger::new();
    for path in paths {
        let loaded = reader.load(path).await?;
        merger.append(loaded)?;
    }
    merger.finish()
}
