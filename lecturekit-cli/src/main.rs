//! lecturekit - Organize downloaded lecture material.
//!
//! Thin command-line front end: parses arguments, sets up logging, runs one
//! library command and prints its report.

mod cli;

use clap::Parser;
use serde::Serialize;
use std::process;

use crate::cli::{Cli, Command};
use lecturekit::audio::extract_audio;
use lecturekit::chapter::ChapterMerger;
use lecturekit::config::{FlatMergeConfig, OverwriteMode};
use lecturekit::error::LectureKitError;
use lecturekit::flat::FlatMerger;
use lecturekit::output::{
    OutputFormatter, display_audio_report, display_chapter_report, display_flat_report,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Route `tracing` output to stderr; `RUST_LOG` overrides the flags.
fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "off"
    } else if verbose {
        "lecturekit=debug,warn"
    } else {
        "error"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Main application logic.
async fn run(cli: Cli) -> Result<(), LectureKitError> {
    let formatter = OutputFormatter::new(cli.quiet || cli.json, cli.verbose);

    if formatter.is_verbose() {
        formatter.section(&format!("{} v{}", lecturekit::NAME, lecturekit::VERSION));
        formatter.blank_line();
    }

    match cli.command {
        Command::Audio(args) => {
            let config = args.to_config()?;
            formatter.debug(&format!("Transcoder: {}", config.settings.program.display()));

            let report = extract_audio(&config).await?;
            emit(cli.json, &report, || display_audio_report(&formatter, &report))
        }
        Command::Chapters(args) => {
            let config = args.to_config()?;
            let report = ChapterMerger::new().run(&config).await?;
            emit(cli.json, &report, || {
                display_chapter_report(&formatter, &report)
            })
        }
        Command::Merge(args) => {
            let config = args.to_config().await?;
            if !config.dry_run {
                handle_output_overwrite(&config, &formatter, cli.json)?;
            }

            let report = FlatMerger::new().run(&config).await?;
            emit(cli.json, &report, || display_flat_report(&formatter, &report))
        }
    }
}

/// Print `report` as JSON, or hand over to the human-readable display.
fn emit<T: Serialize>(
    json: bool,
    report: &T,
    display: impl FnOnce(),
) -> Result<(), LectureKitError> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        display();
    }
    Ok(())
}

/// Handle output file overwrite scenarios.
///
/// Without a terminal to ask on (quiet or JSON mode), `Prompt` behaves like
/// `NoClobber`.
fn handle_output_overwrite(
    config: &FlatMergeConfig,
    formatter: &OutputFormatter,
    json: bool,
) -> Result<(), LectureKitError> {
    if !config.output.exists() {
        return Ok(());
    }

    match config.overwrite_mode {
        OverwriteMode::Force => Ok(()),
        OverwriteMode::NoClobber => Err(LectureKitError::output_exists(config.output.clone())),
        OverwriteMode::Prompt => {
            if formatter.is_quiet() || json {
                return Err(LectureKitError::output_exists(config.output.clone()));
            }

            formatter.warning(&format!(
                "Output file already exists: {}",
                config.output.display()
            ));

            use std::io::{self, Write};
            print!("Overwrite? [y/N]: ");
            io::stdout().flush().ok();

            let mut response = String::new();
            io::stdin()
                .read_line(&mut response)
                .map_err(|err| LectureKitError::other(format!("Failed to read input: {err}")))?;

            let response = response.trim().to_lowercase();
            if response == "y" || response == "yes" {
                Ok(())
            } else {
                Err(LectureKitError::Cancelled)
            }
        }
    }
}
