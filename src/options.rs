//! Execution options.
//!
//! This module provides the [`ExecuteOptions`] struct passed to a backend for
//! a single prompt execution.

use crate::config::LaunchSpec;
use std::path::PathBuf;

/// Options for one prompt execution.
///
/// The prompt is opaque: it is passed to the CLI as a single trailing
/// argument and never interpreted.
///
/// # Example
///
/// ```rust
/// use agent_bridge::ExecuteOptions;
///
/// let opts = ExecuteOptions::new("What is 2+2?", ".").with_timeout_ms(30_000);
/// assert_eq!(opts.timeout_ms, Some(30_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecuteOptions {
    /// Prompt text handed to the CLI.
    pub prompt: String,

    /// Working directory for the spawned process. May be relative.
    pub working_dir: PathBuf,

    /// Timeout override in milliseconds.
    ///
    /// When `None` the backend falls back to
    /// [`DEFAULT_TIMEOUT_MS`](crate::DEFAULT_TIMEOUT_MS).
    pub timeout_ms: Option<u64>,

    /// Launch spec from the configuration file.
    ///
    /// When present, its command and arguments replace the backend's
    /// defaults for this call. The prompt is still appended last.
    pub launch: Option<LaunchSpec>,
}

impl ExecuteOptions {
    pub fn new(prompt: impl Into<String>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            prompt: prompt.into(),
            working_dir: working_dir.into(),
            timeout_ms: None,
            launch: None,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn with_launch(mut self, launch: LaunchSpec) -> Self {
        self.launch = Some(launch);
        self
    }
}
