//! Version output parsing with regex extraction.

use regex::Regex;
use semver::Version;
use std::sync::OnceLock;

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d+\.\d+\.\d+").expect("version pattern is valid"))
}

/// Extract the first `major.minor.patch` version from CLI output.
///
/// Leading zeros in each component are stripped before parsing, since semver
/// rejects them and date-style versions use them.
///
/// # Arguments
///
/// * `output` - Raw text printed by `<cli> --version`
///
/// # Returns
///
/// The parsed [`Version`], or `None` if no triple is present.
///
/// - `2.1.12 (Claude Code)` -> 2.1.12
/// - `codex-cli 0.87.0` -> 0.87.0
/// - `2025.09.18-7ae6800` -> 2025.9.18
pub(crate) fn parse_version(output: &str) -> Option<Version> {
    let matched = version_pattern().find(output)?;
    let normalized = matched
        .as_str()
        .split('.')
        .map(|part| part.trim_start_matches('0'))
        .map(|part| if part.is_empty() { "0" } else { part })
        .collect::<Vec<_>>()
        .join(".");
    Version::parse(&normalized).ok()
}
