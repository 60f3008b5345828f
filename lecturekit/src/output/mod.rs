//! Human-readable run summaries.
//!
//! Each command has one `display_*` function that prints its report through
//! an [`OutputFormatter`]. Machine-readable output is the report itself,
//! serialized with `serde_json` by the caller.
//!
//! # Examples
//!
//! ```no_run
//! use lecturekit::audio::extract_audio;
//! use lecturekit::config::AudioConfig;
//! use lecturekit::output::{OutputFormatter, display_audio_report};
//!
//! # async fn example(config: AudioConfig) -> Result<(), Box<dyn std::error::Error>> {
//! let report = extract_audio(&config).await?;
//! display_audio_report(&OutputFormatter::default(), &report);
//! # Ok(())
//! # }
//! ```

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::audio::{AudioOutcome, AudioReport};
use crate::chapter::{ChapterReport, GroupOutcome};
use crate::flat::FlatMergeReport;
use crate::utils::{display_name, format_file_size, pluralize};

/// Display the outcome of an audio extraction run.
pub fn display_audio_report(formatter: &OutputFormatter, report: &AudioReport) {
    if report.nothing_to_do() {
        formatter.info(&format!(
            "Nothing to do: no source files in {}",
            report.source_dir.display()
        ));
        return;
    }

    formatter.info(&format!(
        "Found {} in {}",
        pluralize(report.files.len(), "file"),
        report.source_dir.display()
    ));

    for file in &report.files {
        let source = display_name(&file.source);
        let target = display_name(&file.target);
        match &file.outcome {
            AudioOutcome::Converted => formatter.success(&format!("{source} -> {target}")),
            AudioOutcome::Skipped => formatter.debug(&format!("{target} exists, skipped")),
            AudioOutcome::Planned => formatter.info(&format!("Would convert {source} -> {target}")),
            AudioOutcome::Failed { exit_code, reason } => {
                let status = exit_code
                    .map(|code| format!("exit code {code}"))
                    .unwrap_or_else(|| "not run".to_string());
                formatter.error(&format!("{source} failed ({status})"));
                if !reason.is_empty() {
                    formatter.error(reason);
                }
            }
        }
    }

    formatter.blank_line();
    let summary = if report.dry_run {
        format!(
            "Dry run: {} to convert, {} skipped",
            report.planned(),
            report.skipped()
        )
    } else {
        format!(
            "{} converted, {} skipped, {} failed",
            report.converted(),
            report.skipped(),
            report.failed()
        )
    };
    summarize(formatter, report.failed(), &summary);
}

/// Display the outcome of a chapter merge run.
pub fn display_chapter_report(formatter: &OutputFormatter, report: &ChapterReport) {
    for name in &report.excluded {
        formatter.debug(&format!("Excluded {name}"));
    }

    if report.nothing_to_do() {
        formatter.info(&format!(
            "Nothing to do: no PDFs in {}",
            report.source_dir.display()
        ));
        return;
    }

    for name in report.unmatched_warnings() {
        formatter.warning(&format!("No chapter pattern matched: {name}"));
    }

    if report.no_chapters_found() {
        formatter.warning(&format!(
            "No chapter information found in {}",
            report.source_dir.display()
        ));
        return;
    }

    for group in &report.groups {
        formatter.section(&format!(
            "Chapter {} ({})",
            group.chapter,
            pluralize(group.files.len(), "file")
        ));
        for (index, file) in group.files.iter().enumerate() {
            formatter.list_item(index + 1, file);
        }

        let output = display_name(&group.output);
        match &group.outcome {
            GroupOutcome::Written { pages, bytes } => formatter.success(&format!(
                "{output} ({}, {})",
                pluralize(*pages, "page"),
                format_file_size(*bytes)
            )),
            GroupOutcome::Planned => formatter.info(&format!("Would write {output}")),
            GroupOutcome::Failed { reason } => {
                formatter.error(&format!("Chapter {} failed: {reason}", group.chapter));
            }
        }
    }

    formatter.blank_line();
    let summary = if report.dry_run {
        format!(
            "Dry run: {} planned",
            pluralize(report.planned(), "chapter file")
        )
    } else {
        format!(
            "{} written, {} failed",
            pluralize(report.written(), "chapter file"),
            report.failed()
        )
    };
    summarize(formatter, report.failed(), &summary);
}

/// Display the outcome of a flat merge.
pub fn display_flat_report(formatter: &OutputFormatter, report: &FlatMergeReport) {
    for path in &report.missing {
        formatter.warning(&format!("File not found, skipped: {}", path.display()));
    }

    if report.nothing_to_do() {
        formatter.info(&format!(
            "Nothing to do: no PDFs to merge into {}",
            report.output.display()
        ));
        return;
    }

    formatter.section(if report.dry_run {
        "Merge plan:"
    } else {
        "Merged:"
    });
    for (index, input) in report.inputs.iter().enumerate() {
        formatter.list_item(
            index + 1,
            &format!(
                "{} ({})",
                display_name(&input.path),
                pluralize(input.pages, "page")
            ),
        );
    }
    formatter.blank_line();

    match report.bytes {
        Some(bytes) => formatter.success(&format!(
            "Created {} ({}, {})",
            report.output.display(),
            pluralize(report.total_pages, "page"),
            format_file_size(bytes)
        )),
        None => formatter.info(&format!(
            "Dry run: {} would be written to {}",
            pluralize(report.total_pages, "page"),
            report.output.display()
        )),
    }
}

fn summarize(formatter: &OutputFormatter, failed: usize, summary: &str) {
    if failed > 0 {
        formatter.warning(summary);
    } else {
        formatter.success(summary);
    }
}
