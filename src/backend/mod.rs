//! Backend abstraction.
//!
//! A [`Backend`] wraps one AI agent CLI: it can tell whether the CLI is
//! present, describe what the CLI supports, and run a prompt through it.
//! [`CliBackend`] is the implementation for every [`BackendKind`](crate::BackendKind);
//! tests and embedders can supply their own.

mod cli;
mod output;
mod process;

pub use cli::CliBackend;
pub use output::RESPONSE_FIELDS;

use crate::{BackendCapabilities, ExecuteOptions, ExecutionResult};
use async_trait::async_trait;
use semver::Version;

/// One AI agent CLI integration.
///
/// None of these methods fail. Detection problems collapse to `false`, and
/// execution problems are reported inside the returned [`ExecutionResult`].
#[async_trait]
pub trait Backend: Send + Sync {
    /// Registry name, matched exactly and case-sensitively.
    fn name(&self) -> &str;

    /// Whether the underlying command is resolvable.
    ///
    /// Says nothing about whether the CLI actually works.
    async fn detect(&self) -> bool;

    /// Static capability flags.
    fn capabilities(&self) -> BackendCapabilities;

    /// Run one prompt and wait for it to finish or time out.
    async fn execute(&self, options: ExecuteOptions) -> ExecutionResult;

    /// Best-effort version of the installed CLI.
    async fn version(&self) -> Option<Version> {
        None
    }
}
