//! Chapter classification, grouping and per-chapter merging.
//!
//! A run goes through four steps:
//!
//! 1. [`DirectoryScanner`](crate::scan::DirectoryScanner) lists the PDFs,
//!    minus excluded names and files this profile produced earlier.
//! 2. [`PatternSet::classify`] assigns each name a [`ChapterKey`] and prefix.
//! 3. [`group_by_chapter`] partitions the names into a [`ChapterPlan`].
//! 4. [`ChapterMerger`] merges each group into the file named by the
//!    profile's [`NamingTemplate`].
//!
//! # Examples
//!
//! ```no_run
//! use lecturekit::chapter::ChapterMerger;
//! use lecturekit::config::{ChapterConfig, ChapterProfile};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ChapterConfig {
//!     source_dir: PathBuf::from("lectures"),
//!     profile: ChapterProfile::by_chapter("21"),
//!     excludes: Vec::new(),
//!     dry_run: false,
//! };
//!
//! let report = ChapterMerger::new().run(&config).await?;
//! println!("{} chapter files written", report.written());
//! # Ok(())
//! # }
//! ```

pub mod grouper;
pub mod key;
pub mod naming;
pub mod pattern;
pub mod report;
pub mod runner;

pub use grouper::{ChapterGroup, ChapterPlan, group_by_chapter};
pub use key::ChapterKey;
pub use naming::NamingTemplate;
pub use pattern::{ChapterMatch, ChapterPattern, PatternSet};
pub use report::{ChapterReport, GroupOutcome, GroupReport};
pub use runner::ChapterMerger;
