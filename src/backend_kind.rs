//! Backend kind enum identifying the supported AI agent CLIs.

use crate::config::LaunchSpec;
use crate::model::BackendCapabilities;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// The kind of AI agent CLI a backend drives.
///
/// Each variant carries the four facts that distinguish one backend from
/// another: its command name, its fixed argument list, whether its output is
/// parsed as JSON, and its capability flags. Adding a backend means adding a
/// variant here; nothing else in the crate needs to change.
///
/// # Example
///
/// ```rust
/// use agent_bridge::BackendKind;
///
/// for kind in BackendKind::all() {
///     println!("{}: {}", kind.display_name(), kind.name());
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// Anthropic's Claude Code (claude CLI)
    Claude,
    /// OpenAI's Codex (codex CLI)
    Codex,
    /// Cursor's headless agent (cursor-agent CLI)
    CursorAgent,
}

impl BackendKind {
    /// Registry name of the backend. Also the executable searched for in PATH.
    ///
    /// ```rust
    /// use agent_bridge::BackendKind;
    ///
    /// assert_eq!(BackendKind::Claude.name(), "claude");
    /// assert_eq!(BackendKind::CursorAgent.name(), "cursor-agent");
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            Self::Claude => "claude",
            Self::Codex => "codex",
            Self::CursorAgent => "cursor-agent",
        }
    }

    /// Human-readable display name for the backend.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Claude => "Claude Code",
            Self::Codex => "Codex",
            Self::CursorAgent => "Cursor Agent",
        }
    }

    /// Fixed arguments placed before the prompt.
    pub fn default_args(&self) -> &'static [&'static str] {
        match self {
            Self::Claude => &["-p", "--output-format", "json"],
            Self::Codex => &["exec"],
            Self::CursorAgent => &["-p", "--output-format", "json"],
        }
    }

    /// Whether stdout is parsed as JSON before falling back to raw text.
    pub fn parses_structured_output(&self) -> bool {
        match self {
            Self::Claude | Self::CursorAgent => true,
            Self::Codex => false,
        }
    }

    /// Static capability flags. Never derived from detection.
    pub fn capabilities(&self) -> BackendCapabilities {
        match self {
            Self::Claude | Self::CursorAgent => BackendCapabilities {
                codebase_context: true,
                headless: true,
                structured_output: true,
            },
            Self::Codex => BackendCapabilities {
                codebase_context: true,
                headless: true,
                structured_output: false,
            },
        }
    }

    /// The launch spec seeded into a fresh configuration.
    pub fn launch_spec(&self) -> LaunchSpec {
        LaunchSpec {
            command: self.name().to_string(),
            args: self.default_args().iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Parse a registry name. Matching is exact and case-sensitive.
    ///
    /// ```rust
    /// use agent_bridge::BackendKind;
    ///
    /// assert_eq!(BackendKind::from_name("codex"), Some(BackendKind::Codex));
    /// assert_eq!(BackendKind::from_name("Codex"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().find(|kind| kind.name() == name)
    }

    /// Iterator over all known backend kinds, in registry order.
    pub fn all() -> impl Iterator<Item = Self> {
        <Self as IntoEnumIterator>::iter()
    }
}
