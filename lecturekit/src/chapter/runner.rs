//! The chapter merge run: scan, classify, group, then merge each group.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::chapter::{
    ChapterGroup, ChapterKey, ChapterPlan, ChapterReport, GroupOutcome, GroupReport,
    NamingTemplate, PatternSet, group_by_chapter,
};
use crate::config::{ChapterConfig, UnmatchedPolicy};
use crate::error::{LectureKitError, Result};
use crate::io::{PdfReader, PdfWriter, WriteStatistics};
use crate::merge::{MergeStatistics, merge_files};
use crate::scan::{DirectoryScanner, FileEntry, ScanResult};

/// Groups the PDFs of a directory by chapter and writes one merged PDF per
/// chapter.
#[derive(Debug, Clone, Default)]
pub struct ChapterMerger {
    reader: PdfReader,
    writer: PdfWriter,
}

impl ChapterMerger {
    /// Create a merger with default reader and writer settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a merger with a custom writer.
    pub fn with_writer(writer: PdfWriter) -> Self {
        Self {
            reader: PdfReader::new(),
            writer,
        }
    }

    /// Run the merge described by `config`.
    ///
    /// A failure inside one group (unreadable input, write error) is
    /// recorded in that group's report and the run moves on. Errors that are
    /// not specific to one group abort the run.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is invalid
    /// - The source directory cannot be scanned
    /// - Files match no pattern under [`UnmatchedPolicy::Fail`]; nothing is
    ///   written in that case
    pub async fn run(&self, config: &ChapterConfig) -> Result<ChapterReport> {
        config.validate()?;

        let profile = &config.profile;
        let patterns = PatternSet::compile(&profile.patterns)?;
        let template = NamingTemplate::parse(&profile.template)?;
        let scan = scan_inputs(config, &template)?;

        let mut report = ChapterReport {
            source_dir: config.source_dir.clone(),
            scanned: scan.entries.len() + scan.excluded.len(),
            excluded: names(&scan.excluded),
            unmatched_policy: profile.unmatched,
            dry_run: config.dry_run,
            ..Default::default()
        };

        if scan.entries.is_empty() {
            info!(dir = %config.source_dir.display(), "nothing to do");
            return Ok(report);
        }

        let plan = group_by_chapter(scan.entries, &patterns, profile.order);
        report.unmatched = names(&plan.unmatched);
        apply_unmatched_policy(&plan, profile.unmatched)?;

        if plan.groups.is_empty() {
            warn!(dir = %config.source_dir.display(), "no chapter information found");
            return Ok(report);
        }

        let mut claimed: HashMap<PathBuf, ChapterKey> = HashMap::new();

        for group in plan.groups {
            let output = config
                .source_dir
                .join(template.render(&profile.label, &group.key, &group.prefix));

            let outcome = if let Some(owner) = claimed.get(&output) {
                GroupOutcome::Failed {
                    reason: format!(
                        "Output name {} is already used by chapter {owner}",
                        output.display()
                    ),
                }
            } else if config.dry_run {
                GroupOutcome::Planned
            } else {
                match self.merge_group(&group, &output).await {
                    Ok((merge_stats, write_stats)) => {
                        info!(
                            chapter = %group.key,
                            output = %output.display(),
                            pages = merge_stats.total_pages,
                            "wrote chapter"
                        );
                        GroupOutcome::Written {
                            pages: merge_stats.total_pages,
                            bytes: write_stats.file_size,
                        }
                    }
                    Err(err) if err.is_recoverable() => {
                        warn!(chapter = %group.key, error = %err, "chapter failed");
                        GroupOutcome::Failed {
                            reason: err.to_string(),
                        }
                    }
                    Err(err) => return Err(err),
                }
            };

            claimed
                .entry(output.clone())
                .or_insert_with(|| group.key.clone());

            report.groups.push(GroupReport {
                files: names(&group.files),
                chapter: group.key,
                prefix: group.prefix,
                output,
                outcome,
            });
        }

        Ok(report)
    }

    async fn merge_group(
        &self,
        group: &ChapterGroup,
        output: &Path,
    ) -> Result<(MergeStatistics, WriteStatistics)> {
        let paths: Vec<PathBuf> = group.files.iter().map(|f| f.path.clone()).collect();
        debug!(chapter = %group.key, files = paths.len(), "merging chapter");

        let (document, merge_stats) = merge_files(&self.reader, &paths).await?;
        let write_stats = self.writer.save_with_stats(document, output).await?;

        Ok((merge_stats, write_stats))
    }
}

/// Scan the source directory, dropping user excludes and earlier outputs.
fn scan_inputs(config: &ChapterConfig, template: &NamingTemplate) -> Result<ScanResult> {
    let own_outputs = template.output_matcher(&config.profile.label)?;

    let mut scan = DirectoryScanner::new("pdf")
        .with_excludes(&config.excludes)?
        .scan(&config.source_dir)?;
    scan.exclude_where(|entry| own_outputs.is_match(&entry.name));

    Ok(scan)
}

fn apply_unmatched_policy(plan: &ChapterPlan, policy: UnmatchedPolicy) -> Result<()> {
    if plan.unmatched.is_empty() {
        return Ok(());
    }

    match policy {
        UnmatchedPolicy::Skip => {
            debug!(count = plan.unmatched.len(), "skipping unmatched files");
        }
        UnmatchedPolicy::Warn => {
            for entry in &plan.unmatched {
                warn!(file = %entry.name, "no chapter pattern matched");
            }
        }
        UnmatchedPolicy::Fail => {
            return Err(LectureKitError::UnmatchedFiles {
                names: names(&plan.unmatched),
            });
        }
    }

    Ok(())
}

fn names(entries: &[FileEntry]) -> Vec<String> {
    entries.iter().map(|entry| entry.name.clone()).collect()
}
