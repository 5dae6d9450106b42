//! PATH-based executable lookup with fallback locations.

use std::path::{Path, PathBuf};

/// System directories checked when PATH lookup fails.
const FALLBACK_DIRS: &[&str] = &["/usr/local/bin", "/usr/bin"];

/// Directories under the home directory where user installs usually land.
const HOME_FALLBACK_DIRS: &[&str] = &[".local/bin", "bin", ".npm-global/bin", ".cargo/bin"];

/// Resolve a command to an executable path.
///
/// A command containing a path separator is treated as a path and only
/// checked for existence. A bare name is looked up in PATH via the `which`
/// crate, then in a few common install locations that are not always on PATH:
/// `/usr/local/bin`, `/usr/bin`, then `~/.local/bin`, `~/bin`,
/// `~/.npm-global/bin` and `~/.cargo/bin`.
///
/// # Arguments
///
/// * `command` - Bare command name (e.g. `"claude"`) or a path to an executable
///
/// # Returns
///
/// `Some(path)` to the first existing file found, or `None` when the command
/// is empty or cannot be located. Lookup errors from `which` are treated as
/// "not found".
pub(crate) fn find_executable(command: &str) -> Option<PathBuf> {
    if command.is_empty() {
        return None;
    }

    let as_path = Path::new(command);
    if as_path.components().count() > 1 {
        return as_path.is_file().then(|| as_path.to_path_buf());
    }

    if let Ok(path) = which::which(command) {
        return Some(path);
    }

    let home_dirs = dirs::home_dir()
        .map(|home| {
            HOME_FALLBACK_DIRS
                .iter()
                .map(|dir| home.join(dir))
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    FALLBACK_DIRS
        .iter()
        .map(PathBuf::from)
        .chain(home_dirs)
        .map(|dir| dir.join(command))
        .find(|candidate| candidate.is_file())
}
