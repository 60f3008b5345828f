//! Audio extraction from downloaded lecture videos.
//!
//! Each source file (`*.webm` by default) gets a sibling target file
//! (`*.mp3` by default) produced by an external transcoder. Files whose
//! target already exists are skipped, so re-running is cheap.
//!
//! # Examples
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
//!     dry_run: false,
//! };
//!
//! let report = extract_audio(&config).await?;
//! println!("{} converted, {} failed", report.converted(), report.failed());
//! # Ok(())
//! # }
//! ```

pub mod extractor;
pub mod transcoder;

pub use extractor::{AudioExtractor, AudioFileReport, AudioOutcome, AudioReport};
pub use transcoder::{FfmpegTranscoder, TranscodeStatus, Transcoder};

use crate::config::AudioConfig;
use crate::error::Result;

/// Run an extraction with the ffmpeg transcoder configured in `config`.
pub async fn extract_audio(config: &AudioConfig) -> Result<AudioReport> {
    AudioExtractor::new(config.settings.clone()).run(config).await
}
