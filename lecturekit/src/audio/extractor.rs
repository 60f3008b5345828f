//! The audio extraction run.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::audio::transcoder::{FfmpegTranscoder, TranscodeStatus, Transcoder};
use crate::config::{AudioConfig, TranscodeSettings};
use crate::error::Result;
use crate::scan::DirectoryScanner;

/// What happened to one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AudioOutcome {
    /// The target was produced.
    Converted,
    /// The target already existed; the tool was not run.
    Skipped,
    /// Dry run: the target would have been produced.
    Planned,
    /// The tool failed or could not be started.
    Failed {
        /// Exit code of the tool, if it ran.
        exit_code: Option<i32>,
        /// Tool diagnostics or launch error.
        reason: String,
    },
}

/// One source file and its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioFileReport {
    /// Source file.
    pub source: PathBuf,
    /// Target file.
    pub target: PathBuf,
    /// Outcome.
    #[serde(flatten)]
    pub outcome: AudioOutcome,
}

/// Summary of an audio extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AudioReport {
    /// Directory that was scanned.
    pub source_dir: PathBuf,
    /// Per-file results in processing order.
    pub files: Vec<AudioFileReport>,
    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl AudioReport {
    /// The directory held no source files.
    pub fn nothing_to_do(&self) -> bool {
        self.files.is_empty()
    }

    /// Number of files converted.
    pub fn converted(&self) -> usize {
        self.count(|outcome| matches!(outcome, AudioOutcome::Converted))
    }

    /// Number of files skipped because their target existed.
    pub fn skipped(&self) -> usize {
        self.count(|outcome| matches!(outcome, AudioOutcome::Skipped))
    }

    /// Number of files a dry run would convert.
    pub fn planned(&self) -> usize {
        self.count(|outcome| matches!(outcome, AudioOutcome::Planned))
    }

    /// Number of failed conversions.
    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, AudioOutcome::Failed { .. }))
    }

    fn count(&self, predicate: impl Fn(&AudioOutcome) -> bool) -> usize {
        self.files
            .iter()
            .filter(|file| predicate(&file.outcome))
            .count()
    }
}

/// Converts every source file of a directory that has no target yet.
#[derive(Debug, Clone)]
pub struct AudioExtractor<T = FfmpegTranscoder> {
    transcoder: T,
}

impl AudioExtractor<FfmpegTranscoder> {
    /// Create an extractor that runs ffmpeg with `settings`.
    pub fn new(settings: TranscodeSettings) -> Self {
        Self::with_transcoder(FfmpegTranscoder::new(settings))
    }
}

impl<T: Transcoder> AudioExtractor<T> {
    /// Create an extractor around any transcoder.
    pub fn with_transcoder(transcoder: T) -> Self {
        Self { transcoder }
    }

    /// Run the extraction described by `config`.
    ///
    /// Files are processed one at a time in name order. A failed conversion
    /// is recorded and the run continues with the next file.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the source
    /// directory cannot be scanned, or the transcoder fails in a way that is
    /// not specific to one file (see
    /// [`LectureKitError::is_recoverable`](crate::error::LectureKitError::is_recoverable)).
    pub async fn run(&self, config: &AudioConfig) -> Result<AudioReport> {
        config.validate()?;

        let settings = &config.settings;
        let scan = DirectoryScanner::new(settings.source_extension.as_str())
            .scan(&config.source_dir)?;

        let mut report = AudioReport {
            source_dir: config.source_dir.clone(),
            files: Vec::with_capacity(scan.entries.len()),
            dry_run: config.dry_run,
        };

        if scan.entries.is_empty() {
            info!(dir = %config.source_dir.display(), "nothing to do");
            return Ok(report);
        }

        for entry in scan.entries {
            let target = settings.target_for(&entry.path);
            let outcome = self.process(&entry.path, &target, config.dry_run).await?;
            report.files.push(AudioFileReport {
                source: entry.path,
                target,
                outcome,
            });
        }

        Ok(report)
    }

    async fn process(&self, source: &Path, target: &Path, dry_run: bool) -> Result<AudioOutcome> {
        if target.exists() {
            debug!(target = %target.display(), "target exists, skipping");
            return Ok(AudioOutcome::Skipped);
        }

        if dry_run {
            return Ok(AudioOutcome::Planned);
        }

        let outcome = match self.transcoder.transcode(source, target).await {
            Ok(TranscodeStatus::Success) => {
                info!(source = %source.display(), target = %target.display(), "converted");
                return Ok(AudioOutcome::Converted);
            }
            Ok(TranscodeStatus::Exited { code, diagnostics }) => AudioOutcome::Failed {
                exit_code: code,
                reason: diagnostics,
            },
            Err(err) if err.is_recoverable() => AudioOutcome::Failed {
                exit_code: None,
                reason: err.to_string(),
            },
            Err(err) => {
                remove_partial_target(target).await;
                return Err(err);
            }
        };

        warn!(source = %source.display(), ?outcome, "conversion failed");
        remove_partial_target(target).await;
        Ok(outcome)
    }
}

/// A failed run may leave a truncated target; it would be skipped as
/// "already converted" next time.
async fn remove_partial_target(target: &Path) {
    match tokio::fs::remove_file(target).await {
        Ok(()) => debug!(target = %target.display(), "removed partial output"),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => warn!(target = %target.display(), error = %err, "could not remove partial output"),
    }
}
