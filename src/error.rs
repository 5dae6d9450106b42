//! Error types for pre-flight failures.
//!
//! These errors are raised before any backend process is spawned. Outcomes of
//! an actual execution are never errors; see [`ExecutionResult`](crate::ExecutionResult).

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading configuration or resolving a backend.
///
/// Each variant has an actionable fix available through [`remediation`].
///
/// # Example
///
/// ```rust
/// use agent_bridge::BridgeError;
///
/// fn report(error: &BridgeError) {
///     eprintln!("error: {}", error);
///     eprintln!("hint: {}", error.remediation());
/// }
/// ```
///
/// [`remediation`]: BridgeError::remediation
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BridgeError {
    /// No configuration file exists.
    #[error("Not initialized: no configuration at {}", path.display())]
    NotInitialized {
        /// Where the configuration was expected.
        path: PathBuf,
    },

    /// The resolved backend name has no registered adapter.
    #[error("Backend not found: {name}")]
    BackendNotFound {
        /// The requested backend name, verbatim.
        name: String,
    },

    /// The configuration file exists but is malformed.
    #[error("Invalid configuration at {}: {detail}", path.display())]
    InvalidConfiguration {
        path: PathBuf,
        /// Underlying parse or validation detail.
        detail: String,
    },

    /// The per-user home directory could not be determined.
    #[error("Could not determine the home directory")]
    HomeDirectoryUnavailable,

    /// Reading or writing the configuration file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BridgeError {
    /// An actionable suggestion for fixing this error.
    pub fn remediation(&self) -> &'static str {
        match self {
            Self::NotInitialized { .. } => "Run `agent-bridge init` to create a configuration",
            Self::BackendNotFound { .. } => {
                "Pick one of the backends listed by `agent-bridge backends`, or re-run `agent-bridge init`"
            }
            Self::InvalidConfiguration { .. } => {
                "Fix the configuration file by hand, or re-run `agent-bridge init` to regenerate it"
            }
            Self::HomeDirectoryUnavailable => "Set the HOME environment variable",
            Self::Io { .. } => "Check permissions on the configuration file and its directory",
        }
    }
}
