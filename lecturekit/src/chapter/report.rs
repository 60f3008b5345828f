//! Results of a chapter merge run.

use serde::Serialize;
use std::path::PathBuf;

use crate::chapter::ChapterKey;
use crate::config::UnmatchedPolicy;

/// What happened to one chapter group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GroupOutcome {
    /// The merged output was written.
    Written {
        /// Pages in the output.
        pages: usize,
        /// Size of the output in bytes.
        bytes: u64,
    },
    /// Dry run: the output would have been written.
    Planned,
    /// Loading, merging or writing failed; no output was left behind.
    Failed {
        /// Error message.
        reason: String,
    },
}

/// One chapter group and its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupReport {
    /// Chapter key.
    pub chapter: ChapterKey,
    /// Recorded prefix.
    pub prefix: String,
    /// Input file names, in merge order.
    pub files: Vec<String>,
    /// Output path.
    pub output: PathBuf,
    /// Outcome.
    #[serde(flatten)]
    pub outcome: GroupOutcome,
}

/// Summary of a chapter merge run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChapterReport {
    /// Directory that was scanned.
    pub source_dir: PathBuf,
    /// Number of PDFs found, including excluded ones.
    pub scanned: usize,
    /// Names removed before classification (earlier outputs, `--exclude`).
    pub excluded: Vec<String>,
    /// Groups in processing order.
    pub groups: Vec<GroupReport>,
    /// Names that matched no pattern.
    pub unmatched: Vec<String>,
    /// Policy the run applied to `unmatched`.
    pub unmatched_policy: UnmatchedPolicy,
    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl ChapterReport {
    /// PDFs that took part in classification.
    pub fn candidates(&self) -> usize {
        self.scanned - self.excluded.len()
    }

    /// The directory held no PDFs to work on.
    pub fn nothing_to_do(&self) -> bool {
        self.candidates() == 0
    }

    /// There were PDFs, but none of them carried a chapter number.
    pub fn no_chapters_found(&self) -> bool {
        self.candidates() > 0 && self.groups.is_empty()
    }

    /// Unmatched names the user should be warned about; empty under
    /// [`UnmatchedPolicy::Skip`].
    pub fn unmatched_warnings(&self) -> &[String] {
        match self.unmatched_policy {
            UnmatchedPolicy::Skip => &[],
            UnmatchedPolicy::Warn | UnmatchedPolicy::Fail => &self.unmatched,
        }
    }

    /// Number of outputs written.
    pub fn written(&self) -> usize {
        self.count(|outcome| matches!(outcome, GroupOutcome::Written { .. }))
    }

    /// Number of outputs planned by a dry run.
    pub fn planned(&self) -> usize {
        self.count(|outcome| matches!(outcome, GroupOutcome::Planned))
    }

    /// Number of failed groups.
    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, GroupOutcome::Failed { .. }))
    }

    fn count(&self, predicate: impl Fn(&GroupOutcome) -> bool) -> usize {
        self.groups
            .iter()
            .filter(|group| predicate(&group.outcome))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(chapter: &str, outcome: GroupOutcome) -> GroupReport {
        GroupReport {
            chapter: ChapterKey::new(chapter),
            prefix: format!("Ch {chapter}"),
            files: vec![format!("Ch{chapter} - a.pdf")],
            output: PathBuf::from(format!("Ch{chapter} - Merged.pdf")),
            outcome,
        }
    }

    #[test]
    fn test_counters() {
        let report = ChapterReport {
            scanned: 4,
            groups: vec![
                group("1", GroupOutcome::Written { pages: 3, bytes: 10 }),
                group("2", GroupOutcome::Failed { reason: "broken".into() }),
                group("3", GroupOutcome::Written { pages: 1, bytes: 5 }),
            ],
            ..Default::default()
        };

        assert_eq!(report.written(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.planned(), 0);
        assert!(!report.nothing_to_do());
        assert!(!report.no_chapters_found());
    }

    #[test]
    fn test_empty_states() {
        let only_outputs = ChapterReport {
            scanned: 1,
            excluded: vec!["21 - Ch 1 - Lecture Notes.pdf".into()],
            ..Default::default()
        };
        assert!(only_outputs.nothing_to_do());

        let unmatched = ChapterReport {
            scanned: 1,
            unmatched: vec!["syllabus.pdf".into()],
            ..Default::default()
        };
        assert!(unmatched.no_chapters_found());
    }

    #[test]
    fn test_skip_policy_has_no_unmatched_warnings() {
        let mut report = ChapterReport {
            scanned: 2,
            unmatched: vec!["syllabus.pdf".into()],
            unmatched_policy: UnmatchedPolicy::Skip,
            ..Default::default()
        };
        assert!(report.unmatched_warnings().is_empty());
        assert_eq!(report.unmatched, vec!["syllabus.pdf"]);

        report.unmatched_policy = UnmatchedPolicy::Warn;
        assert_eq!(report.unmatched_warnings(), ["syllabus.pdf"]);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(group(
            "6",
            GroupOutcome::Written { pages: 2, bytes: 99 },
        ))
        .unwrap();

        assert_eq!(json["chapter"], "6");
        assert_eq!(json["status"], "written");
        assert_eq!(json["pages"], 2);

        let failed = serde_json::to_value(group("7", GroupOutcome::Failed { reason: "x".into() }))
            .unwrap();
        assert_eq!(failed["status"], "failed");
        assert_eq!(failed["reason"], "x");
    }
}
