//! lecturekit - Organize downloaded lecture material.
//!
//! This library provides the three jobs behind the `lecturekit` command:
//!
//! - **Audio extraction**: convert every video in a directory into an audio
//!   file with an external transcoder, skipping files already converted
//! - **Chapter merging**: classify PDFs by the chapter number in their file
//!   names and merge each chapter into one document
//! - **Flat merging**: concatenate a directory or an explicit list of PDFs
//!   into one document
//!
//! Every run is sequential and returns a serializable report. Failures that
//! only concern one file or one chapter are recorded in the report instead
//! of aborting the run.
//!
//! # Examples
//!
//! ## Chapter merge
//!
//! ```no_run
//! use lecturekit::chapter::ChapterMerger;
//! use lecturekit::config::{ChapterConfig, ChapterProfile};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ChapterConfig {
//!     source_dir: PathBuf::from("lectures"),
//!     profile: ChapterProfile::lecture(),
//!     excludes: vec!["*draft*".to_string()],
//!     dry_run: false,
//! };
//!
//! let report = ChapterMerger::new().run(&config).await?;
//! for group in &report.groups {
//!     println!("Chapter {} -> {}", group.chapter, group.output.display());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Audio extraction
//!
//! ```no_run
//! use lecturekit::audio::extract_audio;
//! use lecturekit::config::{AudioConfig, TranscodeSettings};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AudioConfig {
//!     source_dir: PathBuf::from("downloads"),
//!     settings: TranscodeSettings::default(),
//!     dry_run: true,
//! };
//!
//! let report = extract_audio(&config).await?;
//! println!("{} file(s) to convert", report.planned());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod audio;
pub mod chapter;
pub mod config;
pub mod error;
pub mod flat;
pub mod io;
pub mod merge;
pub mod output;
pub mod scan;
pub mod utils;

// Re-export commonly used types
pub use config::{AudioConfig, ChapterConfig, ChapterProfile, FlatMergeConfig};
pub use error::{LectureKitError, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
