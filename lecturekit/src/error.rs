//! Error types for lecturekit.
//!
//! Errors carry enough context (paths, chapter keys, tool output) to be
//! reported per item. Per-item failures never abort a run on their own; the
//! run loops capture them into their reports and move on.
//!
//! # Error Categories
//!
//! - **I/O Errors**: File not found, unreadable directory, write failures
//! - **PDF Errors**: Documents that cannot be loaded or merged
//! - **Tool Errors**: The external transcoder could not be launched
//! - **Configuration Errors**: Invalid templates, patterns or arguments

use std::io;
use std::path::PathBuf;

/// Result type alias for lecturekit operations.
pub type Result<T> = std::result::Result<T, LectureKitError>;

/// Main error type for lecturekit operations.
#[derive(Debug, thiserror::Error)]
pub enum LectureKitError {
    /// Input file was not found.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Path exists but is not a regular file.
    #[error("Not a file: {}", path.display())]
    NotAFile {
        /// Offending path.
        path: PathBuf,
    },

    /// Source directory does not exist or is not a directory.
    #[error("Not a directory: {}", path.display())]
    NotADirectory {
        /// Offending path.
        path: PathBuf,
    },

    /// Failed to load PDF file.
    #[error("Failed to load PDF: {}\n  Reason: {reason}", path.display())]
    FailedToLoadPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// PDF file is encrypted and cannot be processed.
    #[error(
        "PDF is encrypted and cannot be processed: {}\n  \
         Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools",
        path.display()
    )]
    EncryptedPdf {
        /// Path to the encrypted PDF.
        path: PathBuf,
    },

    /// PDF loaded but has no pages.
    #[error("PDF has no pages: {}", path.display())]
    EmptyPdf {
        /// Path to the PDF.
        path: PathBuf,
    },

    /// No files were provided for merging.
    #[error("No input files to merge")]
    NoFilesToMerge,

    /// Output file already exists and overwrite is not allowed.
    #[error(
        "Output file already exists: {}\n  \
         Use --force to overwrite or choose a different output path",
        path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Failed to create output file.
    #[error("Failed to create output file: {}\n  Reason: {source}", path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write to output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to read input list file.
    #[error("Failed to read input list file: {}\n  Reason: {source}", path.display())]
    FailedToReadInputList {
        /// Path to the input list file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to read or parse a chapter profile.
    #[error("Invalid chapter profile: {}\n  Reason: {reason}", path.display())]
    InvalidProfile {
        /// Path to the profile file.
        path: PathBuf,
        /// Parse or validation failure.
        reason: String,
    },

    /// The transcoder executable could not be started.
    #[error("Failed to launch {}: {source}", program.display())]
    ToolLaunchFailed {
        /// Program that was invoked.
        program: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Files matched no chapter pattern and the policy forbids skipping them.
    #[error("{} file(s) match no chapter pattern: {}", names.len(), names.join(", "))]
    UnmatchedFiles {
        /// Names of the unmatched files.
        names: Vec<String>,
    },

    /// Merge operation failed.
    #[error("Merge operation failed: {reason}")]
    MergeFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<lopdf::Error> for LectureKitError {
    fn from(err: lopdf::Error) -> Self {
        Self::merge_failed(err.to_string())
    }
}

impl From<anyhow::Error> for LectureKitError {
    fn from(err: anyhow::Error) -> Self {
        Self::invalid_config(format!("{err:#}"))
    }
}

impl From<regex::Error> for LectureKitError {
    fn from(err: regex::Error) -> Self {
        Self::invalid_config(err.to_string())
    }
}

impl From<globset::Error> for LectureKitError {
    fn from(err: globset::Error) -> Self {
        Self::invalid_config(err.to_string())
    }
}

impl From<serde_json::Error> for LectureKitError {
    fn from(err: serde_json::Error) -> Self {
        Self::other(format!("JSON serialization failed: {err}"))
    }
}

impl LectureKitError {
    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: PathBuf) -> Self {
        Self::NotAFile { path }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create an EncryptedPdf error.
    pub fn encrypted_pdf(path: PathBuf) -> Self {
        Self::EncryptedPdf { path }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create a MergeFailed error.
    pub fn merge_failed(reason: impl Into<String>) -> Self {
        Self::MergeFailed {
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Check if this error only affects the current item (file or group).
    ///
    /// The audio and chapter run loops record recoverable errors in their
    /// report and continue; any other error ends the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound { .. }
                | Self::NotAFile { .. }
                | Self::FailedToLoadPdf { .. }
                | Self::EncryptedPdf { .. }
                | Self::EmptyPdf { .. }
                | Self::FailedToCreateOutput { .. }
                | Self::FailedToWrite { .. }
                | Self::ToolLaunchFailed { .. }
                | Self::MergeFailed { .. }
                | Self::Io { .. }
        )
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::NotADirectory { .. } => 2,
            Self::FailedToReadInputList { .. } => 2,
            Self::FailedToLoadPdf { .. } => 3,
            Self::EncryptedPdf { .. } => 3,
            Self::EmptyPdf { .. } => 3,
            Self::NoFilesToMerge => 1,
            Self::OutputExists { .. } => 4,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::Io { .. } => 5,
            Self::MergeFailed { .. } => 6,
            Self::ToolLaunchFailed { .. } => 7,
            Self::UnmatchedFiles { .. } => 8,
            Self::InvalidProfile { .. } => 1,
            Self::InvalidConfig { .. } => 1,
            Self::Cancelled => 130, // SIGINT
            Self::Other { .. } => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_file_not_found_display() {
        let err = LectureKitError::file_not_found(PathBuf::from("/tmp/missing.pdf"));
        let msg = format!("{err}");
        assert!(msg.contains("File not found"));
        assert!(msg.contains("missing.pdf"));
    }

    #[test]
    fn test_encrypted_pdf_display() {
        let err = LectureKitError::encrypted_pdf(PathBuf::from("secret.pdf"));
        let msg = format!("{err}");
        assert!(msg.contains("encrypted"));
        assert!(msg.contains("Decrypt"));
    }

    #[test]
    fn test_output_exists_display() {
        let err = LectureKitError::output_exists(PathBuf::from("existing.pdf"));
        let msg = format!("{err}");
        assert!(msg.contains("already exists"));
        assert!(msg.contains("--force"));
    }

    #[test]
    fn test_unmatched_files_display() {
        let err = LectureKitError::UnmatchedFiles {
            names: vec!["notes.pdf".to_string(), "syllabus.pdf".to_string()],
        };
        let msg = format!("{err}");
        assert!(msg.starts_with("2 file(s)"));
        assert!(msg.contains("notes.pdf, syllabus.pdf"));
    }

    #[test]
    fn test_is_recoverable() {
        assert!(LectureKitError::failed_to_load_pdf(PathBuf::from("x"), "bad").is_recoverable());
        assert!(
            LectureKitError::ToolLaunchFailed {
                program: PathBuf::from("ffmpeg"),
                source: io::Error::new(io::ErrorKind::NotFound, "missing"),
            }
            .is_recoverable()
        );

        assert!(LectureKitError::from(io::Error::other("denied")).is_recoverable());

        assert!(!LectureKitError::NoFilesToMerge.is_recoverable());
        assert!(!LectureKitError::other("Load task failed").is_recoverable());
        assert!(!LectureKitError::invalid_config("bad").is_recoverable());
        assert!(!LectureKitError::UnmatchedFiles { names: vec![] }.is_recoverable());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(LectureKitError::file_not_found(PathBuf::from("x")).exit_code(), 2);
        assert_eq!(LectureKitError::NoFilesToMerge.exit_code(), 1);
        assert_eq!(LectureKitError::output_exists(PathBuf::from("x")).exit_code(), 4);
        assert_eq!(LectureKitError::Cancelled.exit_code(), 130);
    }

    #[test]
    fn test_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "not found");
        let err: LectureKitError = io_err.into();
        assert!(matches!(err, LectureKitError::Io { .. }));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_from_anyhow_is_config_error() {
        let err: LectureKitError = anyhow::anyhow!("template is empty").into();
        assert!(matches!(err, LectureKitError::InvalidConfig { .. }));
    }
}
