//! Integration tests for flat merging.

use lecturekit::config::{FlatInputs, FlatMergeConfig, OverwriteMode};
use lecturekit::error::LectureKitError;
use lecturekit::flat::{FlatMerger, read_input_list};
use tempfile::TempDir;

use crate::common::{page_labels, write_pdf};

#[tokio::test]
async fn test_directory_merge_in_name_order() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("02 - b.pdf"), &["b1", "b2"]);
    write_pdf(&dir.path().join("01 - a.pdf"), &["a"]);
    write_pdf(&dir.path().join("03 - c.PDF"), &["c"]);
    std::fs::write(dir.path().join("notes.txt"), "not a pdf").unwrap();
    let output = dir.path().join("merged.pdf");

    let report = FlatMerger::new()
        .merge_directory(dir.path(), &output)
        .await
        .unwrap();

    assert_eq!(report.total_pages, 4);
    assert_eq!(report.bytes, Some(std::fs::metadata(&output).unwrap().len()));
    assert_eq!(page_labels(&output), vec!["a", "b1", "b2", "c"]);
}

#[tokio::test]
async fn test_repeated_directory_merge_does_not_include_itself() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("a.pdf"), &["a"]);
    let output = dir.path().join("merged.pdf");

    let merger = FlatMerger::new();
    merger.merge_directory(dir.path(), &output).await.unwrap();
    let second = merger.merge_directory(dir.path(), &output).await.unwrap();

    assert_eq!(second.inputs.len(), 1);
    assert_eq!(page_labels(&output), vec!["a"]);
}

#[tokio::test]
async fn test_list_file_drives_order() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("zeta.pdf");
    let second = dir.path().join("alpha.pdf");
    write_pdf(&first, &["zeta"]);
    write_pdf(&second, &["alpha"]);

    let list = dir.path().join("order.txt");
    std::fs::write(
        &list,
        format!(
            "# reading order\n{}\n{}\n{}\n",
            first.display(),
            dir.path().join("lost.pdf").display(),
            second.display()
        ),
    )
    .unwrap();

    let paths = read_input_list(&list).await.unwrap();
    let output = dir.path().join("out.pdf");
    let report = FlatMerger::new().merge_list(&paths, &output).await.unwrap();

    assert_eq!(report.missing, vec![dir.path().join("lost.pdf")]);
    assert_eq!(page_labels(&output), vec!["zeta", "alpha"]);
}

#[tokio::test]
async fn test_empty_directory_is_nothing_to_do() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.pdf");

    let report = FlatMerger::new()
        .merge_directory(dir.path(), &output)
        .await
        .unwrap();

    assert!(report.nothing_to_do());
    assert_eq!(report.total_pages, 0);
    assert!(!output.exists());
}

#[tokio::test]
async fn test_list_with_only_missing_files_is_an_error() {
    let dir = TempDir::new().unwrap();
    let result = FlatMerger::new()
        .merge_list(&[dir.path().join("gone.pdf")], &dir.path().join("out.pdf"))
        .await;

    assert!(matches!(result, Err(LectureKitError::NoFilesToMerge)));
}

#[tokio::test]
async fn test_unreadable_input_leaves_no_output() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("a.pdf"), &["a"]);
    std::fs::write(dir.path().join("b.pdf"), b"garbage").unwrap();
    let output = dir.path().join("merged.pdf");

    let result = FlatMerger::new().merge_directory(dir.path(), &output).await;

    assert!(matches!(result, Err(LectureKitError::FailedToLoadPdf { .. })));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_output_listed_as_input_is_rejected() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("a.pdf");
    write_pdf(&input, &["a"]);

    let config = FlatMergeConfig {
        inputs: FlatInputs::List(vec![input.clone()]),
        output: input.clone(),
        dry_run: false,
        overwrite_mode: OverwriteMode::Force,
    };

    let result = FlatMerger::new().run(&config).await;
    assert!(matches!(result, Err(LectureKitError::InvalidConfig { .. })));
    assert_eq!(page_labels(&input), vec!["a"]);
}
