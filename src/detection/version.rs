//! `--version` probe with timeout.

use super::parse_version;
use semver::Version;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// Upper bound on a version probe.
pub(crate) const VERSION_TIMEOUT: Duration = Duration::from_secs(2);

/// Run `<path> --version` and parse the result.
///
/// The probe is bounded by [`VERSION_TIMEOUT`] and the child is killed if it
/// overruns. Stdout is preferred; stderr is used when stdout is empty.
///
/// # Arguments
///
/// * `path` - Path to the executable to probe
///
/// # Returns
///
/// `Some(version)` parsed with [`parse_version`], or `None` when:
/// - the probe takes longer than [`VERSION_TIMEOUT`]
/// - the executable cannot be spawned
/// - it exits with a non-zero status
/// - the output contains no `major.minor.patch` triple
pub(crate) async fn check_version(path: &Path) -> Option<Version> {
    let mut command = Command::new(path);
    command
        .arg("--version")
        .stdin(Stdio::null())
        .kill_on_drop(true);

    let output = match timeout(VERSION_TIMEOUT, command.output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            debug!(path = %path.display(), error = %e, "version probe failed to run");
            return None;
        }
        Err(_) => {
            debug!(path = %path.display(), "version probe timed out");
            return None;
        }
    };

    if !output.status.success() {
        return None;
    }

    let out = if output.stdout.is_empty() {
        output.stderr
    } else {
        output.stdout
    };
    parse_version(&String::from_utf8_lossy(&out))
}
