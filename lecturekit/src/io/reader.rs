//! PDF reading and loading operations.
//!
//! Documents are parsed on a blocking task so the async runtime stays free.
//!
//! # Examples
//!
//! ```no_run
//! use lecturekit::io::reader::PdfReader;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let loaded = reader.load(Path::new("Ch1 - intro.pdf")).await?;
//! println!("{} pages", loaded.page_count);
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::path::{Path, PathBuf};
use tokio::task;

use crate::error::{LectureKitError, Result};

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// File size in bytes.
    pub file_size: u64,
}

/// PDF reader with configurable loading behavior.
#[derive(Debug, Clone)]
pub struct PdfReader {
    /// Whether to reject documents without pages.
    verify: bool,
}

impl PdfReader {
    /// Create a new PDF reader with default settings.
    pub fn new() -> Self {
        Self { verify: true }
    }

    /// Create a reader that accepts documents without pages.
    pub fn without_verification() -> Self {
        Self { verify: false }
    }

    /// Check that `path` exists and is a regular file.
    pub fn check_path_exists(path: &Path) -> Result<()> {
        if !path.try_exists()? {
            return Err(LectureKitError::file_not_found(path.to_path_buf()));
        }

        if !path.is_file() {
            return Err(LectureKitError::not_a_file(path.to_path_buf()));
        }

        Ok(())
    }

    /// Load a single PDF document.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File does not exist or is not a regular file
    /// - File is not a valid PDF
    /// - PDF is encrypted
    /// - PDF has no pages (unless verification is disabled)
    pub async fn load(&self, path: &Path) -> Result<LoadedPdf> {
        Self::check_path_exists(path)?;

        let path_buf = path.to_path_buf();
        let verify = self.verify;

        task::spawn_blocking(move || {
            let document = Document::load(&path_buf).map_err(|e| {
                let err_msg = e.to_string();
                if err_msg.contains("encrypt") || err_msg.contains("password") {
                    LectureKitError::encrypted_pdf(path_buf.clone())
                } else {
                    LectureKitError::failed_to_load_pdf(path_buf.clone(), err_msg)
                }
            })?;

            if document.is_encrypted() {
                return Err(LectureKitError::encrypted_pdf(path_buf));
            }

            let page_count = document.get_pages().len();
            if verify && page_count == 0 {
                return Err(LectureKitError::EmptyPdf { path: path_buf });
            }

            let file_size = std::fs::metadata(&path_buf).map(|m| m.len()).unwrap_or(0);

            Ok(LoadedPdf {
                document,
                path: path_buf,
                page_count,
                file_size,
            })
        })
        .await
        .map_err(|e| LectureKitError::other(format!("Load task failed: {e}")))?
    }
}

impl Default for PdfReader {
    fn default() -> Self {
        Self::new()
    }
}
