//! Capability and result types shared by every backend.

use semver::Version;
use serde::{Deserialize, Serialize};

/// Exit code reported when no process exit status exists: the command could
/// not be spawned, or it was killed after the timeout.
pub const EXIT_CODE_UNAVAILABLE: i32 = -1;

/// What a backend claims to support.
///
/// Purely descriptive. These flags are hardcoded per backend and are never
/// checked against what the CLI actually does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendCapabilities {
    /// The CLI reads the surrounding codebase on its own.
    pub codebase_context: bool,
    /// The CLI can run non-interactively.
    pub headless: bool,
    /// The CLI can emit parseable (JSON) output.
    pub structured_output: bool,
}

/// Outcome of one prompt execution.
///
/// Execution failures (spawn errors, non-zero exits, timeouts) are carried
/// here as data with `success == false`; they are never returned as errors.
/// `error` is `Some` exactly when `success` is `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub success: bool,
    /// Name of the backend that produced this result.
    pub backend: String,
    /// Extracted response text. Always empty on failure.
    pub output: String,
    pub raw_stdout: String,
    pub raw_stderr: String,
    /// Process exit code, or [`EXIT_CODE_UNAVAILABLE`].
    pub exit_code: i32,
    pub error: Option<String>,
}

impl ExecutionResult {
    /// Build a successful result.
    pub fn succeeded(
        backend: impl Into<String>,
        output: impl Into<String>,
        raw_stdout: impl Into<String>,
        raw_stderr: impl Into<String>,
        exit_code: i32,
    ) -> Self {
        Self {
            success: true,
            backend: backend.into(),
            output: output.into(),
            raw_stdout: raw_stdout.into(),
            raw_stderr: raw_stderr.into(),
            exit_code,
            error: None,
        }
    }

    /// Build a failed result. `output` is left empty.
    pub fn failed(
        backend: impl Into<String>,
        error: impl Into<String>,
        raw_stdout: impl Into<String>,
        raw_stderr: impl Into<String>,
        exit_code: i32,
    ) -> Self {
        Self {
            success: false,
            backend: backend.into(),
            output: String::new(),
            raw_stdout: raw_stdout.into(),
            raw_stderr: raw_stderr.into(),
            exit_code,
            error: Some(error.into()),
        }
    }

    /// Exit code a CLI should terminate with for this result.
    ///
    /// Zero on success; the process exit code when it is positive; otherwise 1.
    pub fn process_exit_code(&self) -> i32 {
        if self.success {
            0
        } else if self.exit_code > 0 {
            self.exit_code
        } else {
            1
        }
    }
}

/// One row of a detection report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionReport {
    pub name: String,
    pub installed: bool,
    pub capabilities: BackendCapabilities,
    /// Best-effort version of an installed backend.
    pub version: Option<Version>,
}
