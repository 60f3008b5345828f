//! CLI argument parsing for lecturekit.
//!
//! Each subcommand has an argument struct with a `to_config` method that
//! turns it into the matching, validated library configuration.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

use lecturekit::config::{
    AudioConfig, ChapterConfig, ChapterOrder, ChapterProfile, FlatInputs, FlatMergeConfig,
    OverwriteMode, TranscodeSettings, UnmatchedPolicy,
};
use lecturekit::error::{LectureKitError, Result};
use lecturekit::flat::read_input_list;

/// Organize downloaded lecture material.
///
/// Extract audio from lecture videos, merge lecture PDFs by chapter, or
/// concatenate PDFs into one document.
#[derive(Parser, Debug)]
#[command(name = "lecturekit")]
#[command(version)]
#[command(about = "Extract lecture audio and merge lecture PDFs by chapter", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Command,

    /// Verbose output - show skipped files, exclusions and diagnostics
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all non-error output
    ///
    /// Only errors and warnings will be printed.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print the run report as JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert every video in a directory to audio with ffmpeg
    ///
    /// Files whose audio already exists are skipped.
    ///
    /// Example:
    ///   lecturekit audio ~/Downloads
    Audio(AudioArgs),

    /// Merge the PDFs of a directory into one PDF per chapter
    ///
    /// Example:
    ///   lecturekit chapters ~/Downloads --label 21
    Chapters(ChapterArgs),

    /// Merge PDFs into a single document
    ///
    /// Examples:
    ///   lecturekit merge a.pdf b.pdf -o out.pdf
    ///   lecturekit merge --dir ~/Downloads -o merged.pdf
    Merge(MergeArgs),
}

/// Arguments of `lecturekit audio`.
#[derive(Args, Debug, Clone)]
pub struct AudioArgs {
    /// Directory containing the source videos
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Transcoder executable
    #[arg(long, value_name = "PATH", env = "LECTUREKIT_FFMPEG", default_value = "ffmpeg")]
    pub ffmpeg: PathBuf,

    /// Extension of the source files
    #[arg(long, value_name = "EXT", default_value = "webm")]
    pub from: String,

    /// Extension of the produced audio files
    #[arg(long, value_name = "EXT", default_value = "mp3")]
    pub to: String,

    /// Audio codec passed to the transcoder
    #[arg(long, value_name = "CODEC", default_value = "libmp3lame")]
    pub codec: String,

    /// Audio quality level passed to the transcoder (0 best, 9 worst for MP3)
    #[arg(long, value_name = "LEVEL", default_value = "2")]
    pub quality: String,

    /// Dry run - list what would be converted without running the transcoder
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

impl AudioArgs {
    /// Convert the arguments into a validated [`AudioConfig`].
    pub fn to_config(&self) -> Result<AudioConfig> {
        let config = AudioConfig {
            source_dir: self.dir.clone(),
            settings: TranscodeSettings {
                program: self.ffmpeg.clone(),
                source_extension: trim_dot(&self.from),
                target_extension: trim_dot(&self.to),
                codec: self.codec.clone(),
                quality: self.quality.clone(),
            },
            dry_run: self.dry_run,
        };

        config.validate()?;
        Ok(config)
    }
}

/// Arguments of `lecturekit chapters`.
#[derive(Args, Debug, Clone)]
pub struct ChapterArgs {
    /// Directory containing the lecture PDFs
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Built-in profile
    ///
    /// - by-chapter: "18 - Ch 6 ...", "[Ch6-2 ...", "... Ch 6 ..." names,
    ///   output "{label} - {prefix} - Lecture Notes.pdf"
    /// - lecture: "Ch6 ..." names, output "Lecture Notes - Ch{chapter} - Merged.pdf"
    #[arg(long, value_name = "NAME", default_value = "by-chapter")]
    #[arg(value_parser = ["by-chapter", "lecture"])]
    pub preset: String,

    /// Load patterns and naming from a JSON profile instead of a preset
    #[arg(long, value_name = "FILE", conflicts_with = "preset")]
    pub profile: Option<PathBuf>,

    /// Label substituted for {label} in the output name (e.g. a course number)
    #[arg(long, value_name = "TEXT")]
    pub label: Option<String>,

    /// Output naming template using {label}, {prefix} and {chapter}
    #[arg(long, value_name = "TEMPLATE")]
    pub template: Option<String>,

    /// Chapter processing order
    #[arg(long, value_name = "ORDER")]
    #[arg(value_parser = ["lexical", "numeric"])]
    pub order: Option<String>,

    /// What to do with PDFs that match no chapter pattern
    #[arg(long, value_name = "POLICY")]
    #[arg(value_parser = ["skip", "warn", "fail"])]
    pub unmatched: Option<String>,

    /// Never treat files matching this glob as input (repeatable)
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Dry run - show the chapter groups and output names without writing
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

impl ChapterArgs {
    /// Convert the arguments into a validated [`ChapterConfig`].
    ///
    /// Explicit flags override values from the preset or profile file.
    pub fn to_config(&self) -> Result<ChapterConfig> {
        let mut profile = match &self.profile {
            Some(path) => ChapterProfile::from_json_file(path)?,
            None => ChapterProfile::preset(&self.preset, self.label.as_deref())?,
        };

        if let Some(label) = &self.label {
            profile.label = label.clone();
        }
        if let Some(template) = &self.template {
            profile.template = template.clone();
        }
        if let Some(order) = &self.order {
            profile.order = ChapterOrder::from_str(order)?;
        }
        if let Some(unmatched) = &self.unmatched {
            profile.unmatched = UnmatchedPolicy::from_str(unmatched)?;
        }

        let config = ChapterConfig {
            source_dir: self.dir.clone(),
            profile,
            excludes: self.exclude.clone(),
            dry_run: self.dry_run,
        };

        config.validate()?;
        Ok(config)
    }
}

/// Arguments of `lecturekit merge`.
#[derive(Args, Debug, Clone)]
pub struct MergeArgs {
    /// Input PDF files to merge (in order)
    #[arg(value_name = "FILE", conflicts_with = "dir")]
    pub inputs: Vec<PathBuf>,

    /// Merge every PDF in this directory, sorted by name
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Read input file list from a file (one path per line, '#' comments)
    #[arg(long, value_name = "FILE", conflicts_with = "dir")]
    pub input_list: Option<PathBuf>,

    /// Output PDF file path
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Dry run - list the inputs and page counts without creating output
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Force overwrite of existing output file without confirmation
    #[arg(short, long)]
    pub force: bool,

    /// Never overwrite existing output file
    #[arg(long, conflicts_with = "force")]
    pub no_clobber: bool,
}

impl MergeArgs {
    /// Convert the arguments into a validated [`FlatMergeConfig`].
    ///
    /// Paths from `--input-list` are appended after the positional inputs.
    pub async fn to_config(&self) -> Result<FlatMergeConfig> {
        let inputs = match &self.dir {
            Some(dir) => FlatInputs::Directory(dir.clone()),
            None => {
                let mut paths = self.inputs.clone();
                if let Some(list) = &self.input_list {
                    paths.extend(read_input_list(list).await?);
                }
                if paths.is_empty() {
                    return Err(LectureKitError::invalid_config(
                        "No input files specified; pass files, --input-list or --dir",
                    ));
                }
                FlatInputs::List(paths)
            }
        };

        let overwrite_mode = if self.force {
            OverwriteMode::Force
        } else if self.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Prompt
        };

        let config = FlatMergeConfig {
            inputs,
            output: self.output.clone(),
            dry_run: self.dry_run,
            overwrite_mode,
        };

        config.validate()?;
        Ok(config)
    }
}

fn trim_dot(extension: &str) -> String {
    extension.trim_start_matches('.').to_string()
}
