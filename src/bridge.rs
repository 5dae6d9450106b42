//! Prompt execution façade.
//!
//! [`Bridge::execute`] is the single entry point: it loads the configuration,
//! picks a backend, and hands the prompt to it.

use crate::{BridgeError, ConfigStore, ExecuteOptions, ExecutionResult, Registry};
use std::path::PathBuf;
use tracing::debug;

/// Environment variable that overrides the configured default backend.
pub const BACKEND_ENV_VAR: &str = "AGENT_BRIDGE_BACKEND";

/// One prompt to execute, with optional per-call overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub prompt: String,
    pub working_dir: PathBuf,
    /// Backend name; beats the environment and the configured default.
    pub backend: Option<String>,
    /// Timeout in milliseconds; beats the configured timeout.
    pub timeout_ms: Option<u64>,
}

impl PromptRequest {
    pub fn new(prompt: impl Into<String>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            prompt: prompt.into(),
            working_dir: working_dir.into(),
            backend: None,
            timeout_ms: None,
        }
    }

    pub fn with_backend(mut self, backend: impl Into<String>) -> Self {
        self.backend = Some(backend.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }
}

/// Resolves configuration and backend selection, then delegates to a backend.
///
/// # Example
///
/// ```rust,no_run
/// use agent_bridge::{Bridge, ConfigStore, PromptRequest, Registry};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), agent_bridge::BridgeError> {
///     let bridge = Bridge::new(Registry::default(), ConfigStore::user_default()?);
///     let result = bridge.execute(PromptRequest::new("What is 2+2?", ".")).await?;
///     if result.success {
///         println!("{}", result.output);
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Bridge {
    registry: Registry,
    store: ConfigStore,
    env_var: String,
}

impl Bridge {
    pub fn new(registry: Registry, store: ConfigStore) -> Self {
        Self {
            registry,
            store,
            env_var: BACKEND_ENV_VAR.to_string(),
        }
    }

    /// Read the backend override from a different environment variable.
    pub fn with_env_var(mut self, name: impl Into<String>) -> Self {
        self.env_var = name.into();
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Execute a prompt.
    ///
    /// Only pre-flight problems are errors: [`BridgeError::NotInitialized`]
    /// when there is no configuration, [`BridgeError::InvalidConfiguration`]
    /// when it is malformed, and [`BridgeError::BackendNotFound`] when the
    /// resolved name is not registered. In all three cases no backend is
    /// touched. Whatever the backend returns, failures included, is passed
    /// back unchanged as `Ok`.
    pub async fn execute(&self, request: PromptRequest) -> Result<ExecutionResult, BridgeError> {
        let config = self
            .store
            .load()?
            .ok_or_else(|| BridgeError::NotInitialized {
                path: self.store.path().to_path_buf(),
            })?;

        let env_backend = std::env::var(&self.env_var).ok();
        let name = resolve_backend_name(
            request.backend.as_deref(),
            env_backend.as_deref(),
            &config.default_backend,
        );

        let backend = self
            .registry
            .lookup(name)
            .ok_or_else(|| BridgeError::BackendNotFound {
                name: name.to_string(),
            })?;

        let timeout_ms = request.timeout_ms.unwrap_or(config.timeout);
        debug!(backend = name, timeout_ms, "dispatching prompt");

        let mut options =
            ExecuteOptions::new(request.prompt, request.working_dir).with_timeout_ms(timeout_ms);
        if let Some(launch) = config.backends.get(name) {
            options = options.with_launch(launch.clone());
        }

        Ok(backend.execute(options).await)
    }
}

/// Pick the backend name: explicit, then environment, then configured default.
///
/// The first non-empty value wins.
pub fn resolve_backend_name<'a>(
    explicit: Option<&'a str>,
    environment: Option<&'a str>,
    configured: &'a str,
) -> &'a str {
    [explicit, environment]
        .into_iter()
        .flatten()
        .find(|name| !name.is_empty())
        .unwrap_or(configured)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_wins() {
        assert_eq!(
            resolve_backend_name(Some("codex"), Some("cursor-agent"), "claude"),
            "codex"
        );
    }

    #[test]
    fn test_environment_beats_default() {
        assert_eq!(
            resolve_backend_name(None, Some("cursor-agent"), "claude"),
            "cursor-agent"
        );
    }

    #[test]
    fn test_default_when_nothing_else() {
        assert_eq!(resolve_backend_name(None, None, "claude"), "claude");
    }

    #[test]
    fn test_empty_values_are_skipped() {
        assert_eq!(resolve_backend_name(Some(""), Some(""), "claude"), "claude");
        assert_eq!(resolve_backend_name(Some(""), Some("codex"), "claude"), "codex");
    }

    #[test]
    fn test_request_builders() {
        let request = PromptRequest::new("hi", ".")
            .with_backend("codex")
            .with_timeout_ms(10);
        assert_eq!(request.backend.as_deref(), Some("codex"));
        assert_eq!(request.timeout_ms, Some(10));
    }
}
