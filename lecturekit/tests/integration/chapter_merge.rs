//! Integration tests for chapter-grouped merging.

use lecturekit::chapter::{ChapterMerger, GroupOutcome};
use lecturekit::config::{ChapterConfig, ChapterOrder, ChapterProfile, UnmatchedPolicy};
use lecturekit::error::LectureKitError;
use rstest::rstest;
use std::path::Path;
use tempfile::TempDir;

use crate::common::{file_names, page_labels, write_pdf};

fn config(dir: &Path, profile: ChapterProfile) -> ChapterConfig {
    ChapterConfig {
        source_dir: dir.to_path_buf(),
        profile,
        excludes: Vec::new(),
        dry_run: false,
    }
}

#[tokio::test]
async fn test_handouts_grouped_per_chapter() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("Ch1 - intro.pdf"), &["intro"]);
    write_pdf(&dir.path().join("Ch1 - details.pdf"), &["details"]);
    write_pdf(&dir.path().join("Ch2 - a.pdf"), &["a"]);

    let report = ChapterMerger::new()
        .run(&config(dir.path(), ChapterProfile::lecture()))
        .await
        .unwrap();

    assert_eq!(report.groups.len(), 2);
    assert_eq!(
        report.groups[0].files,
        vec!["Ch1 - details.pdf", "Ch1 - intro.pdf"]
    );
    assert_eq!(report.groups[1].files, vec!["Ch2 - a.pdf"]);
    assert_eq!(
        page_labels(&dir.path().join("Lecture Notes - Ch1 - Merged.pdf")),
        vec!["details", "intro"]
    );
    assert_eq!(
        page_labels(&dir.path().join("Lecture Notes - Ch2 - Merged.pdf")),
        vec!["a"]
    );
}

#[tokio::test]
async fn test_mixed_course_folder() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("18 - Ch 6 - 01. Processes.pdf"), &["p"]);
    write_pdf(&dir.path().join("[Ch6-2. Threads].pdf"), &["t"]);
    write_pdf(&dir.path().join("Review Ch 6 questions.pdf"), &["r"]);
    write_pdf(&dir.path().join("[Ch7-1. Memory].pdf"), &["m"]);

    let report = ChapterMerger::new()
        .run(&config(dir.path(), ChapterProfile::by_chapter("21")))
        .await
        .unwrap();

    assert_eq!(report.written(), 2);
    assert!(report.unmatched.is_empty());

    let six = dir.path().join("21 - 18 - Ch 6 - Lecture Notes.pdf");
    assert_eq!(page_labels(&six), vec!["p", "r", "t"]);
    assert_eq!(
        page_labels(&dir.path().join("21 - Ch 7 - Lecture Notes.pdf")),
        vec!["m"]
    );
}

#[rstest]
#[case(ChapterOrder::Lexical, vec!["1", "10", "2"])]
#[case(ChapterOrder::Numeric, vec!["1", "2", "10"])]
#[tokio::test]
async fn test_group_order(#[case] order: ChapterOrder, #[case] expected: Vec<&str>) {
    let dir = TempDir::new().unwrap();
    for chapter in ["2", "10", "1"] {
        write_pdf(&dir.path().join(format!("Ch{chapter} - slides.pdf")), &[chapter]);
    }

    let mut profile = ChapterProfile::lecture();
    profile.order = order;
    let mut cfg = config(dir.path(), profile);
    cfg.dry_run = true;

    let report = ChapterMerger::new().run(&cfg).await.unwrap();
    let chapters: Vec<&str> = report.groups.iter().map(|g| g.chapter.as_str()).collect();
    assert_eq!(chapters, expected);
}

#[tokio::test]
async fn test_second_run_leaves_outputs_alone() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("Ch3 - a.pdf"), &["a"]);
    write_pdf(&dir.path().join("Ch3 - b.pdf"), &["b"]);

    let merger = ChapterMerger::new();
    let cfg = config(dir.path(), ChapterProfile::lecture());
    merger.run(&cfg).await.unwrap();
    let second = merger.run(&cfg).await.unwrap();

    assert_eq!(second.excluded.len(), 1);
    assert_eq!(
        page_labels(&dir.path().join("Lecture Notes - Ch3 - Merged.pdf")),
        vec!["a", "b"]
    );
    assert_eq!(file_names(dir.path()).len(), 3);
}

#[tokio::test]
async fn test_user_excludes() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("Ch1 - a.pdf"), &["a"]);
    write_pdf(&dir.path().join("Ch1 - draft.pdf"), &["draft"]);

    let mut cfg = config(dir.path(), ChapterProfile::lecture());
    cfg.excludes = vec!["*draft*".to_string()];

    let report = ChapterMerger::new().run(&cfg).await.unwrap();
    assert_eq!(report.excluded, vec!["Ch1 - draft.pdf"]);
    assert_eq!(
        page_labels(&dir.path().join("Lecture Notes - Ch1 - Merged.pdf")),
        vec!["a"]
    );
}

#[tokio::test]
async fn test_unmatched_files() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("Ch1 - a.pdf"), &["a"]);
    write_pdf(&dir.path().join("syllabus.pdf"), &["s"]);

    let report = ChapterMerger::new()
        .run(&config(dir.path(), ChapterProfile::lecture()))
        .await
        .unwrap();
    assert_eq!(report.unmatched, vec!["syllabus.pdf"]);
    assert_eq!(report.written(), 1);

    let mut strict = ChapterProfile::lecture();
    strict.unmatched = UnmatchedPolicy::Fail;
    std::fs::remove_file(dir.path().join("Lecture Notes - Ch1 - Merged.pdf")).unwrap();

    let result = ChapterMerger::new().run(&config(dir.path(), strict)).await;
    assert!(matches!(result, Err(LectureKitError::UnmatchedFiles { .. })));
    assert!(!dir.path().join("Lecture Notes - Ch1 - Merged.pdf").exists());
}

#[tokio::test]
async fn test_no_chapter_information() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("notes.pdf"), &["n"]);

    let report = ChapterMerger::new()
        .run(&config(dir.path(), ChapterProfile::by_chapter("21")))
        .await
        .unwrap();

    assert!(report.no_chapters_found());
    assert_eq!(file_names(dir.path()), vec!["notes.pdf"]);
}

#[tokio::test]
async fn test_corrupt_input_fails_only_its_chapter() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("Ch1 - ok.pdf"), &["ok"]);
    std::fs::write(dir.path().join("Ch1 - truncated.pdf"), b"%PDF-1.5\n").unwrap();
    write_pdf(&dir.path().join("Ch2 - ok.pdf"), &["two"]);

    let report = ChapterMerger::new()
        .run(&config(dir.path(), ChapterProfile::lecture()))
        .await
        .unwrap();

    assert!(matches!(report.groups[0].outcome, GroupOutcome::Failed { .. }));
    assert!(matches!(
        report.groups[1].outcome,
        GroupOutcome::Written { pages: 1, .. }
    ));
    assert!(!dir.path().join("Lecture Notes - Ch1 - Merged.pdf").exists());
}

#[tokio::test]
async fn test_missing_source_directory() {
    let dir = TempDir::new().unwrap();
    let result = ChapterMerger::new()
        .run(&config(&dir.path().join("absent"), ChapterProfile::lecture()))
        .await;

    assert!(result.is_err());
}
