//! Integration tests for dry-run functionality.

use lecturekit::audio::{AudioExtractor, AudioOutcome};
use lecturekit::chapter::{ChapterMerger, GroupOutcome};
use lecturekit::config::{
    AudioConfig, ChapterConfig, ChapterProfile, FlatInputs, FlatMergeConfig, OverwriteMode,
    TranscodeSettings,
};
use lecturekit::flat::FlatMerger;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::common::{file_names, write_pdf};

#[tokio::test]
async fn test_chapter_dry_run_does_not_create_output() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("Ch4 - a.pdf"), &["a"]);
    write_pdf(&dir.path().join("Ch5 - b.pdf"), &["b"]);

    let config = ChapterConfig {
        source_dir: dir.path().to_path_buf(),
        profile: ChapterProfile::lecture(),
        excludes: Vec::new(),
        dry_run: true,
    };

    let report = ChapterMerger::new().run(&config).await.unwrap();

    assert!(report.dry_run);
    assert_eq!(report.planned(), 2);
    assert!(report.groups.iter().all(|g| g.outcome == GroupOutcome::Planned));
    assert_eq!(file_names(dir.path()), vec!["Ch4 - a.pdf", "Ch5 - b.pdf"]);
}

#[tokio::test]
async fn test_chapter_dry_run_does_not_read_pdfs() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("Ch1 - broken.pdf"), b"not a pdf").unwrap();

    let config = ChapterConfig {
        source_dir: dir.path().to_path_buf(),
        profile: ChapterProfile::lecture(),
        excludes: Vec::new(),
        dry_run: true,
    };

    let report = ChapterMerger::new().run(&config).await.unwrap();
    assert_eq!(report.planned(), 1);
}

#[tokio::test]
async fn test_flat_dry_run_keeps_existing_output() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("a.pdf"), &["1", "2", "3"]);
    let output = dir.path().join("out.pdf");
    std::fs::write(&output, b"previous").unwrap();

    let config = FlatMergeConfig {
        inputs: FlatInputs::List(vec![dir.path().join("a.pdf")]),
        output: output.clone(),
        dry_run: true,
        overwrite_mode: OverwriteMode::NoClobber,
    };

    let report = FlatMerger::new().run(&config).await.unwrap();

    assert_eq!(report.total_pages, 3);
    assert_eq!(report.bytes, None);
    assert_eq!(std::fs::read(&output).unwrap(), b"previous");
}

#[tokio::test]
async fn test_audio_dry_run_never_launches_the_tool() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("talk.webm"), b"webm").unwrap();

    let config = AudioConfig {
        source_dir: dir.path().to_path_buf(),
        settings: TranscodeSettings {
            program: PathBuf::from("/nonexistent/ffmpeg"),
            ..TranscodeSettings::default()
        },
        dry_run: true,
    };

    let report = AudioExtractor::new(config.settings.clone())
        .run(&config)
        .await
        .unwrap();

    assert_eq!(report.files[0].outcome, AudioOutcome::Planned);
    assert_eq!(file_names(dir.path()), vec!["talk.webm"]);
}
