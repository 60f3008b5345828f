//! Integration tests for audio extraction.

use lecturekit::audio::{AudioExtractor, AudioOutcome, TranscodeStatus, Transcoder};
use lecturekit::config::{AudioConfig, TranscodeSettings};
use lecturekit::error::Result;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

use crate::common::file_names;

/// Copies the source bytes into the target, or fails for names containing
/// "corrupt" after leaving a partial file behind.
#[derive(Default)]
struct CopyTranscoder {
    seen: Mutex<Vec<PathBuf>>,
}

impl Transcoder for CopyTranscoder {
    async fn transcode(&self, input: &Path, output: &Path) -> Result<TranscodeStatus> {
        self.seen.lock().unwrap().push(input.to_path_buf());

        if input.to_string_lossy().contains("corrupt") {
            tokio::fs::write(output, b"partial").await?;
            return Ok(TranscodeStatus::Exited {
                code: Some(1),
                diagnostics: "Invalid data found when processing input".to_string(),
            });
        }

        tokio::fs::copy(input, output).await?;
        Ok(TranscodeStatus::Success)
    }
}

fn config(dir: &Path) -> AudioConfig {
    AudioConfig {
        source_dir: dir.to_path_buf(),
        settings: TranscodeSettings::default(),
        dry_run: false,
    }
}

#[tokio::test]
async fn test_converts_missing_targets_and_skips_existing() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("foo.webm"), b"foo").unwrap();
    std::fs::write(dir.path().join("foo.mp3"), b"already there").unwrap();
    std::fs::write(dir.path().join("bar.webm"), b"bar").unwrap();

    let extractor = AudioExtractor::with_transcoder(CopyTranscoder::default());
    let report = extractor.run(&config(dir.path())).await.unwrap();

    assert_eq!(report.converted(), 1);
    assert_eq!(report.skipped(), 1);
    assert_eq!(std::fs::read(dir.path().join("bar.mp3")).unwrap(), b"bar");
    assert_eq!(
        std::fs::read(dir.path().join("foo.mp3")).unwrap(),
        b"already there"
    );
}

#[tokio::test]
async fn test_failure_is_reported_and_run_continues() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a-corrupt.webm"), b"?").unwrap();
    std::fs::write(dir.path().join("b.webm"), b"b").unwrap();

    let transcoder = CopyTranscoder::default();
    let report = AudioExtractor::with_transcoder(transcoder)
        .run(&config(dir.path()))
        .await
        .unwrap();

    assert_eq!(
        report.files[0].outcome,
        AudioOutcome::Failed {
            exit_code: Some(1),
            reason: "Invalid data found when processing input".to_string(),
        }
    );
    assert_eq!(report.files[1].outcome, AudioOutcome::Converted);
    assert_eq!(
        file_names(dir.path()),
        vec!["a-corrupt.webm", "b.mp3", "b.webm"]
    );
}

#[tokio::test]
async fn test_second_run_skips_everything() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("lecture.webm"), b"x").unwrap();

    let extractor = AudioExtractor::with_transcoder(CopyTranscoder::default());
    extractor.run(&config(dir.path())).await.unwrap();
    let second = extractor.run(&config(dir.path())).await.unwrap();

    assert_eq!(second.skipped(), 1);
    assert_eq!(second.converted(), 0);
}

#[tokio::test]
async fn test_missing_ffmpeg_fails_each_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("one.webm"), b"1").unwrap();

    let settings = TranscodeSettings {
        program: PathBuf::from("/nonexistent/ffmpeg"),
        ..TranscodeSettings::default()
    };
    let config = AudioConfig {
        source_dir: dir.path().to_path_buf(),
        settings: settings.clone(),
        dry_run: false,
    };

    let report = AudioExtractor::new(settings).run(&config).await.unwrap();

    assert!(matches!(
        report.files[0].outcome,
        AudioOutcome::Failed { exit_code: None, .. }
    ));
    assert!(!dir.path().join("one.mp3").exists());
}

#[tokio::test]
async fn test_empty_directory_is_nothing_to_do() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("notes.txt"), b"").unwrap();

    let report = AudioExtractor::with_transcoder(CopyTranscoder::default())
        .run(&config(dir.path()))
        .await
        .unwrap();

    assert!(report.nothing_to_do());
}
