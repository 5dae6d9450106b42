//! Configuration file persistence.
//!
//! The configuration is the only durable state: a single JSON document at a
//! fixed per-user path (`$HOME/.agent-bridge.json`). It is read on every
//! execution and only ever replaced in full.

use crate::BridgeError;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the configuration, relative to the home directory.
pub const CONFIG_FILE_NAME: &str = ".agent-bridge.json";

/// Timeout written by initialization, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 120_000;

/// Top-level fields that must be present for a configuration to load.
const REQUIRED_FIELDS: &[&str] = &["defaultBackend", "backends", "timeout"];

/// How to launch one backend: a command plus the arguments placed before the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchSpec {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Persisted configuration.
///
/// ```json
/// {
///   "defaultBackend": "claude",
///   "backends": { "claude": { "command": "claude", "args": ["-p"] } },
///   "timeout": 120000
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Backend used when neither the caller nor the environment picks one.
    pub default_backend: String,
    /// Launch specs keyed by backend name.
    pub backends: BTreeMap<String, LaunchSpec>,
    /// Default execution timeout in milliseconds.
    ///
    /// Any non-negative JSON number is accepted; fractional values are
    /// rounded to the nearest millisecond.
    #[serde(deserialize_with = "deserialize_millis")]
    pub timeout: u64,
}

fn deserialize_millis<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let millis = f64::deserialize(deserializer)?;
    if !millis.is_finite() || millis < 0.0 || millis.round() > u64::MAX as f64 {
        return Err(serde::de::Error::custom(format!(
            "timeout must be a non-negative number of milliseconds, got {}",
            millis
        )));
    }
    Ok(millis.round() as u64)
}

/// Reads and writes the configuration file at one path.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store at the fixed per-user location, `$HOME/.agent-bridge.json`.
    pub fn user_default() -> Result<Self, BridgeError> {
        let home = dirs::home_dir().ok_or(BridgeError::HomeDirectoryUnavailable)?;
        Ok(Self::at(home.join(CONFIG_FILE_NAME)))
    }

    /// Store at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the configuration.
    ///
    /// Returns `Ok(None)` when no file exists, and
    /// [`BridgeError::InvalidConfiguration`] when the file exists but is not
    /// valid JSON or lacks one of the required top-level fields.
    pub fn load(&self) -> Result<Option<Config>, BridgeError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no configuration file");
                return Ok(None);
            }
            Err(e) => {
                return Err(BridgeError::Io {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        parse_config(&contents)
            .map(Some)
            .map_err(|detail| BridgeError::InvalidConfiguration {
                path: self.path.clone(),
                detail,
            })
    }

    /// Write the configuration as pretty-printed JSON, replacing the file.
    pub fn save(&self, config: &Config) -> Result<(), BridgeError> {
        let mut json = serde_json::to_string_pretty(config).map_err(|e| {
            BridgeError::InvalidConfiguration {
                path: self.path.clone(),
                detail: e.to_string(),
            }
        })?;
        json.push('\n');

        std::fs::write(&self.path, json).map_err(|e| BridgeError::Io {
            path: self.path.clone(),
            source: e,
        })?;
        debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    /// Whether a valid configuration exists.
    ///
    /// Unlike [`load`](Self::load), a malformed file is reported as `false`
    /// rather than as an error.
    pub fn is_initialized(&self) -> bool {
        matches!(self.load(), Ok(Some(_)))
    }
}

fn parse_config(contents: &str) -> Result<Config, String> {
    let value: serde_json::Value = serde_json::from_str(contents).map_err(|e| e.to_string())?;

    let object = value
        .as_object()
        .ok_or_else(|| "expected a JSON object at the top level".to_string())?;
    for field in REQUIRED_FIELDS {
        if !object.contains_key(*field) {
            return Err(format!("missing required field `{}`", field));
        }
    }

    serde_json::from_value(value).map_err(|e| e.to_string())
}
