//! Configuration module for lecturekit.
//!
//! Every command is driven by a validated configuration struct built from CLI
//! arguments (or, for chapter profiles, a JSON file). Nothing here touches
//! the filesystem except [`ChapterProfile::from_json_file`].

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::chapter::{ChapterKey, NamingTemplate, PatternSet};
use crate::error::{LectureKitError, Result};

/// Order in which chapter groups are processed and reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChapterOrder {
    /// Plain string comparison of the captured digits: "10" sorts before "2".
    #[default]
    Lexical,
    /// Numeric comparison of the captured digits: "2" sorts before "10".
    Numeric,
}

impl ChapterOrder {
    /// Compare two chapter keys under this ordering.
    ///
    /// Numeric comparison works on digit strings of any length; keys that are
    /// numerically equal ("6" and "06") fall back to string order so the
    /// ordering stays total.
    pub fn compare(self, a: &ChapterKey, b: &ChapterKey) -> Ordering {
        match self {
            Self::Lexical => a.cmp(b),
            Self::Numeric => {
                let (ta, tb) = (a.significant_digits(), b.significant_digits());
                ta.len()
                    .cmp(&tb.len())
                    .then_with(|| ta.cmp(tb))
                    .then_with(|| a.cmp(b))
            }
        }
    }
}

impl FromStr for ChapterOrder {
    type Err = LectureKitError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "lexical" => Ok(Self::Lexical),
            "numeric" => Ok(Self::Numeric),
            _ => Err(LectureKitError::invalid_config(format!(
                "Invalid chapter order: {s}. Must be one of: lexical, numeric"
            ))),
        }
    }
}

/// What to do with PDFs whose names match no chapter pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnmatchedPolicy {
    /// Leave them out without comment.
    Skip,
    /// Leave them out and report each one as a warning.
    #[default]
    Warn,
    /// Abort the run before anything is written.
    Fail,
}

impl FromStr for UnmatchedPolicy {
    type Err = LectureKitError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "warn" => Ok(Self::Warn),
            "fail" => Ok(Self::Fail),
            _ => Err(LectureKitError::invalid_config(format!(
                "Invalid unmatched-file policy: {s}. Must be one of: skip, warn, fail"
            ))),
        }
    }
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Prompt the user before overwriting (default).
    #[default]
    Prompt,
    /// Always overwrite without prompting.
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
}

/// One filename pattern in a chapter profile.
///
/// `regex` must define a `chapter` named group. `prefix` is rendered by
/// substituting `{group}` placeholders with the text of the named groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSpec {
    /// Short name used in logs.
    pub name: String,
    /// Regular expression tried against the file name.
    pub regex: String,
    /// Prefix template, e.g. `"{lecture} - Ch {chapter}"`.
    pub prefix: String,
}

impl PatternSpec {
    fn new(name: &str, regex: &str, prefix: &str) -> Self {
        Self {
            name: name.to_string(),
            regex: regex.to_string(),
            prefix: prefix.to_string(),
        }
    }

    /// `"18 - Ch 6 - 01. Title.pdf"`: lecture number, then chapter.
    pub fn numbered_lecture() -> Self {
        Self::new(
            "numbered-lecture",
            r"^(?P<lecture>\d+)\s*-\s*Ch\s+(?P<chapter>\d+)",
            "{lecture} - Ch {chapter}",
        )
    }

    /// `"[Ch6-2. Storage] RAID.pdf"` or `"Ch6-2 ..."` at the start of the name.
    pub fn bracketed() -> Self {
        Self::new(
            "bracketed",
            r"^\[?Ch\s*(?P<chapter>\d+)[-\s]",
            "Ch {chapter}",
        )
    }

    /// `"... Ch 6 ..."` anywhere in the name.
    pub fn loose() -> Self {
        Self::new("loose", r"Ch\s+(?P<chapter>\d+)", "Ch {chapter}")
    }

    /// `"Ch01..."` at the start of the name, digits kept as written.
    pub fn compact() -> Self {
        Self::new("compact", r"^Ch(?P<chapter>\d+)", "Ch{chapter}")
    }
}

/// A complete chapter-merge strategy: which names belong to which chapter
/// and what each merged output is called.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterProfile {
    /// Run label substituted for `{label}` in the template.
    #[serde(default)]
    pub label: String,
    /// Output naming template (`{label}`, `{prefix}`, `{chapter}`).
    pub template: String,
    /// Patterns in priority order; the first match wins.
    pub patterns: Vec<PatternSpec>,
    /// Group ordering.
    #[serde(default)]
    pub order: ChapterOrder,
    /// Handling of names that match no pattern.
    #[serde(default)]
    pub unmatched: UnmatchedPolicy,
}

impl ChapterProfile {
    /// Three-pattern profile for course folders mixing
    /// `"18 - Ch 6 - ..."`, `"[Ch6-2. ...]"` and `"... Ch 6 ..."` names.
    pub fn by_chapter(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            template: "{label} - {prefix} - Lecture Notes.pdf".to_string(),
            patterns: vec![
                PatternSpec::numbered_lecture(),
                PatternSpec::bracketed(),
                PatternSpec::loose(),
            ],
            order: ChapterOrder::Lexical,
            unmatched: UnmatchedPolicy::Warn,
        }
    }

    /// Single-pattern profile for handout folders named `"Ch01 ..."`.
    pub fn lecture() -> Self {
        Self {
            label: String::new(),
            template: "Lecture Notes - Ch{chapter} - Merged.pdf".to_string(),
            patterns: vec![PatternSpec::compact()],
            order: ChapterOrder::Lexical,
            unmatched: UnmatchedPolicy::Warn,
        }
    }

    /// Look up a built-in profile by name.
    pub fn preset(name: &str, label: Option<&str>) -> Result<Self> {
        match name {
            "by-chapter" => Ok(Self::by_chapter(label.unwrap_or("21"))),
            "lecture" => {
                let mut profile = Self::lecture();
                if let Some(label) = label {
                    profile.label = label.to_string();
                }
                Ok(profile)
            }
            _ => Err(LectureKitError::invalid_config(format!(
                "Unknown preset: {name}. Must be one of: by-chapter, lecture"
            ))),
        }
    }

    /// Load a profile from a JSON file and validate it.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let invalid = |reason: String| LectureKitError::InvalidProfile {
            path: path.to_path_buf(),
            reason,
        };

        let text = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        let profile: Self = serde_json::from_str(&text).map_err(|e| invalid(e.to_string()))?;
        profile.validate().map_err(|e| invalid(format!("{e:#}")))?;

        Ok(profile)
    }

    /// Validate the template and every pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The pattern list is empty
    /// - The template is malformed (see [`NamingTemplate::parse`])
    /// - A pattern regex does not compile or lacks a `chapter` group
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.patterns.is_empty() {
            bail!("At least one chapter pattern is required");
        }

        let template = NamingTemplate::parse(&self.template)
            .with_context(|| format!("Invalid naming template: {}", self.template))?;

        if template.uses_label() && self.label.trim().is_empty() {
            bail!("Template uses {{label}} but no label is set");
        }

        PatternSet::compile(&self.patterns).context("Invalid chapter pattern")?;

        Ok(())
    }
}

impl Default for ChapterProfile {
    fn default() -> Self {
        Self::by_chapter("21")
    }
}

/// Settings for the external audio transcoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscodeSettings {
    /// Transcoder executable, a bare name is resolved through `PATH`.
    pub program: PathBuf,
    /// Extension of the source files (without the dot).
    pub source_extension: String,
    /// Extension of the produced files (without the dot).
    pub target_extension: String,
    /// Audio codec passed to `-c:a`.
    pub codec: String,
    /// Quality level passed to `-q:a`.
    pub quality: String,
}

impl Default for TranscodeSettings {
    fn default() -> Self {
        Self {
            program: PathBuf::from("ffmpeg"),
            source_extension: "webm".to_string(),
            target_extension: "mp3".to_string(),
            codec: "libmp3lame".to_string(),
            quality: "2".to_string(),
        }
    }
}

impl TranscodeSettings {
    /// Build the argument list for converting `input` into `output`.
    ///
    /// Drops the video stream, encodes audio with the configured codec and
    /// quality, and overwrites the output if the tool finds one.
    pub fn arguments(&self, input: &Path, output: &Path) -> Vec<OsString> {
        vec![
            "-i".into(),
            input.as_os_str().to_os_string(),
            "-vn".into(),
            "-c:a".into(),
            self.codec.clone().into(),
            "-q:a".into(),
            self.quality.clone().into(),
            "-y".into(),
            output.as_os_str().to_os_string(),
        ]
    }

    /// Path of the file produced for `source`: same stem, target extension.
    pub fn target_for(&self, source: &Path) -> PathBuf {
        source.with_extension(&self.target_extension)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.program.as_os_str().is_empty() {
            bail!("Transcoder program cannot be empty");
        }

        for (what, ext) in [
            ("source", &self.source_extension),
            ("target", &self.target_extension),
        ] {
            if ext.is_empty() || ext.contains(['.', '/', '\\', '*']) {
                bail!("Invalid {what} extension: {ext:?}");
            }
        }

        if self.source_extension.eq_ignore_ascii_case(&self.target_extension) {
            bail!("Source and target extensions must differ");
        }

        Ok(())
    }
}

/// Configuration for an audio extraction run.
#[derive(Debug, Clone)]
pub struct AudioConfig {
    /// Directory scanned for source files (not recursive).
    pub source_dir: PathBuf,
    /// Transcoder settings.
    pub settings: TranscodeSettings,
    /// Report what would be converted without running the transcoder.
    pub dry_run: bool,
}

impl AudioConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        self.settings.validate()?;
        Ok(())
    }
}

/// Configuration for a chapter-grouping merge run.
#[derive(Debug, Clone)]
pub struct ChapterConfig {
    /// Directory scanned for PDFs (not recursive).
    pub source_dir: PathBuf,
    /// Patterns, naming template, ordering and unmatched policy.
    pub profile: ChapterProfile,
    /// Extra glob patterns; matching file names are never treated as inputs.
    pub excludes: Vec<String>,
    /// Plan the groups and output names without loading or writing PDFs.
    pub dry_run: bool,
}

impl ChapterConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        self.profile.validate()?;
        Ok(())
    }
}

/// Where a flat merge takes its inputs from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlatInputs {
    /// Every PDF directly inside the directory, sorted by name.
    Directory(PathBuf),
    /// An explicit ordered list; missing paths are skipped with a warning.
    List(Vec<PathBuf>),
}

/// Configuration for a flat (single output) merge.
#[derive(Debug, Clone)]
pub struct FlatMergeConfig {
    /// Input source.
    pub inputs: FlatInputs,
    /// Output PDF file path.
    pub output: PathBuf,
    /// Show the merge plan without writing the output.
    pub dry_run: bool,
    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,
}

impl FlatMergeConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the input list is empty or names the output file.
    pub fn validate(&self) -> Result<()> {
        if self.output.as_os_str().is_empty() {
            return Err(LectureKitError::invalid_config("Output path cannot be empty"));
        }

        if let FlatInputs::List(paths) = &self.inputs {
            if paths.is_empty() {
                return Err(LectureKitError::NoFilesToMerge);
            }

            if paths.iter().any(|input| input == &self.output) {
                return Err(LectureKitError::invalid_config(format!(
                    "Output file cannot be the same as an input file: {}",
                    self.output.display()
                )));
            }
        }

        Ok(())
    }
}
