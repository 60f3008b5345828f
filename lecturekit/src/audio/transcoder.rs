//! External transcoder invocation.

use serde::Serialize;
use std::future::Future;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::config::TranscodeSettings;
use crate::error::{LectureKitError, Result};

/// Lines of tool diagnostics kept for a failed conversion.
const DIAGNOSTIC_TAIL_LINES: usize = 20;

/// How a transcoder run ended, once the tool was started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum TranscodeStatus {
    /// The tool exited with status zero.
    Success,
    /// The tool exited with a non-zero status (or was killed by a signal).
    Exited {
        /// Exit code, `None` when terminated by a signal.
        code: Option<i32>,
        /// Tail of the tool's diagnostic output.
        diagnostics: String,
    },
}

impl TranscodeStatus {
    /// Whether the conversion succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Converts one source file into one target file.
pub trait Transcoder: Send + Sync {
    /// Convert `input` into `output`.
    ///
    /// # Errors
    ///
    /// Returns [`LectureKitError::ToolLaunchFailed`] if the tool could not
    /// be started. A tool that starts and fails is reported through
    /// [`TranscodeStatus::Exited`].
    fn transcode(
        &self,
        input: &Path,
        output: &Path,
    ) -> impl Future<Output = Result<TranscodeStatus>> + Send;
}

/// Runs ffmpeg (or a compatible tool) as a subprocess.
#[derive(Debug, Clone, Default)]
pub struct FfmpegTranscoder {
    settings: TranscodeSettings,
}

impl FfmpegTranscoder {
    /// Create a transcoder with the given settings.
    pub fn new(settings: TranscodeSettings) -> Self {
        Self { settings }
    }

    /// The settings this transcoder runs with.
    pub fn settings(&self) -> &TranscodeSettings {
        &self.settings
    }
}

impl Transcoder for FfmpegTranscoder {
    async fn transcode(&self, input: &Path, output: &Path) -> Result<TranscodeStatus> {
        let program = &self.settings.program;
        let args = self.settings.arguments(input, output);
        debug!(program = %program.display(), ?args, "running transcoder");

        let result = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| LectureKitError::ToolLaunchFailed {
                program: program.clone(),
                source,
            })?;

        if result.status.success() {
            return Ok(TranscodeStatus::Success);
        }

        let stderr = String::from_utf8_lossy(&result.stderr);
        debug!(status = %result.status, stderr = %stderr, "transcoder failed");

        Ok(TranscodeStatus::Exited {
            code: result.status.code(),
            diagnostics: tail_lines(&stderr, DIAGNOSTIC_TAIL_LINES),
        })
    }
}

fn tail_lines(text: &str, count: usize) -> String {
    let lines: Vec<&str> = text.trim_end().lines().collect();
    let start = lines.len().saturating_sub(count);
    lines[start..].join("\n")
}
