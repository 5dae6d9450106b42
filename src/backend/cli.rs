//! Backend implementation that shells out to an agent CLI.

use super::output::normalize_output;
use super::process::{self, Exit};
use super::Backend;
use crate::detection::{check_version, find_executable};
use crate::{
    BackendCapabilities, BackendKind, ExecuteOptions, ExecutionResult, DEFAULT_TIMEOUT_MS,
    EXIT_CODE_UNAVAILABLE,
};
use async_trait::async_trait;
use semver::Version;
use std::time::Duration;
use tracing::debug;

/// A [`Backend`] that runs one of the known agent CLIs.
///
/// The invocation is `<command> <fixed args...> <prompt>`, where command and
/// fixed args come from [`BackendKind`] unless the call carries a configured
/// [`LaunchSpec`](crate::LaunchSpec).
///
/// # Example
///
/// ```rust,no_run
/// use agent_bridge::{Backend, BackendKind, CliBackend, ExecuteOptions};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let claude = CliBackend::new(BackendKind::Claude);
///     if claude.detect().await {
///         let result = claude.execute(ExecuteOptions::new("What is 2+2?", ".")).await;
///         println!("{}", result.output);
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CliBackend {
    kind: BackendKind,
}

impl CliBackend {
    pub fn new(kind: BackendKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> BackendKind {
        self.kind
    }

    fn result_from(
        &self,
        outcome: process::ProcessOutcome,
        command: &str,
        timeout_ms: u64,
    ) -> ExecutionResult {
        let name = self.kind.name();
        let process::ProcessOutcome {
            exit,
            stdout,
            stderr,
        } = outcome;

        match exit {
            Exit::Code(0) => {
                let output = normalize_output(&stdout, self.kind.parses_structured_output());
                ExecutionResult::succeeded(name, output, stdout, stderr, 0)
            }
            Exit::Code(code) => {
                let error = failure_message(&stderr)
                    .unwrap_or_else(|| format!("{} exited with code {}", command, code));
                ExecutionResult::failed(name, error, stdout, stderr, code)
            }
            Exit::Signaled => {
                let error = failure_message(&stderr)
                    .unwrap_or_else(|| format!("{} was terminated by a signal", command));
                ExecutionResult::failed(name, error, stdout, stderr, EXIT_CODE_UNAVAILABLE)
            }
            Exit::TimedOut => ExecutionResult::failed(
                name,
                format!("{} timed out after {}ms", command, timeout_ms),
                stdout,
                stderr,
                EXIT_CODE_UNAVAILABLE,
            ),
            Exit::Failed(reason) => ExecutionResult::failed(
                name,
                format!("Failed to start {}: {}", command, reason),
                stdout,
                stderr,
                EXIT_CODE_UNAVAILABLE,
            ),
        }
    }
}

fn failure_message(stderr: &str) -> Option<String> {
    let trimmed = stderr.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[async_trait]
impl Backend for CliBackend {
    fn name(&self) -> &str {
        self.kind.name()
    }

    async fn detect(&self) -> bool {
        let found = find_executable(self.kind.name());
        debug!(backend = self.kind.name(), path = ?found, "detection");
        found.is_some()
    }

    fn capabilities(&self) -> BackendCapabilities {
        self.kind.capabilities()
    }

    async fn execute(&self, options: ExecuteOptions) -> ExecutionResult {
        let launch = options.launch.unwrap_or_else(|| self.kind.launch_spec());
        let timeout_ms = options.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS);

        let mut args = launch.args;
        args.push(options.prompt);

        let outcome = process::run(
            &launch.command,
            &args,
            &options.working_dir,
            Duration::from_millis(timeout_ms),
        )
        .await;
        self.result_from(outcome, &launch.command, timeout_ms)
    }

    async fn version(&self) -> Option<Version> {
        let path = find_executable(self.kind.name())?;
        check_version(&path).await
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::LaunchSpec;
    use std::time::Instant;

    /// Launch spec running `script` under sh; the prompt arrives as `$1`.
    fn sh(script: &str) -> LaunchSpec {
        LaunchSpec {
            command: "sh".to_string(),
            args: vec!["-c".to_string(), script.to_string(), "sh".to_string()],
        }
    }

    #[tokio::test]
    async fn test_structured_output_is_unwrapped() {
        let backend = CliBackend::new(BackendKind::Claude);
        let options = ExecuteOptions::new("2+2 = 4", ".")
            .with_launch(sh(r#"printf '{"type":"result","result":"%s"}' "$1""#));

        let result = backend.execute(options).await;
        assert!(result.success, "{:?}", result);
        assert_eq!(result.backend, "claude");
        assert_eq!(result.output, "2+2 = 4");
        assert_eq!(result.exit_code, 0);
        assert!(result.raw_stdout.contains("\"result\""));
    }

    #[tokio::test]
    async fn test_unstructured_backend_returns_raw_stdout() {
        let backend = CliBackend::new(BackendKind::Codex);
        let options =
            ExecuteOptions::new("ignored", ".").with_launch(sh(r#"printf '{"result":"4"}'"#));

        let result = backend.execute(options).await;
        assert!(result.success);
        assert_eq!(result.output, r#"{"result":"4"}"#);
    }

    #[tokio::test]
    async fn test_prompt_is_passed_verbatim_as_last_argument() {
        let backend = CliBackend::new(BackendKind::Codex);
        let prompt = "it's a \"quoted\" $HOME prompt";
        let options = ExecuteOptions::new(prompt, ".").with_launch(sh(r#"printf '%s' "$1""#));

        let result = backend.execute(options).await;
        assert_eq!(result.output, prompt);
    }

    #[tokio::test]
    async fn test_non_zero_exit_uses_stderr() {
        let backend = CliBackend::new(BackendKind::Claude);
        let options = ExecuteOptions::new("bad prompt", ".")
            .with_launch(sh("echo partial; echo 'Execution failed' >&2; exit 3"));

        let result = backend.execute(options).await;
        assert!(!result.success);
        assert_eq!(result.exit_code, 3);
        assert_eq!(result.output, "");
        assert_eq!(result.raw_stdout, "partial\n");
        assert_eq!(result.error.as_deref(), Some("Execution failed"));
    }

    #[tokio::test]
    async fn test_non_zero_exit_with_empty_stderr_has_generic_error() {
        let backend = CliBackend::new(BackendKind::Claude);
        let options = ExecuteOptions::new("x", ".").with_launch(sh("exit 2"));

        let result = backend.execute(options).await;
        assert!(!result.success);
        assert_eq!(result.exit_code, 2);
        assert_eq!(result.error.as_deref(), Some("sh exited with code 2"));
    }

    #[tokio::test]
    async fn test_spawn_failure_is_a_result() {
        let backend = CliBackend::new(BackendKind::CursorAgent);
        let options = ExecuteOptions::new("x", ".").with_launch(LaunchSpec {
            command: "/nonexistent/cursor-agent".to_string(),
            args: vec![],
        });

        let result = backend.execute(options).await;
        assert!(!result.success);
        assert_eq!(result.exit_code, EXIT_CODE_UNAVAILABLE);
        assert!(result
            .error
            .as_deref()
            .is_some_and(|e| e.starts_with("Failed to start")));
    }

    #[tokio::test]
    async fn test_timeout_returns_failure_within_grace() {
        let backend = CliBackend::new(BackendKind::Claude);
        let options = ExecuteOptions::new("x", ".")
            .with_launch(sh("echo thinking; exec sleep 30"))
            .with_timeout_ms(250);

        let start = Instant::now();
        let result = backend.execute(options).await;
        assert!(start.elapsed() < Duration::from_secs(5));
        assert!(!result.success);
        assert_eq!(result.exit_code, EXIT_CODE_UNAVAILABLE);
        assert_eq!(result.raw_stdout, "thinking\n");
        assert!(result.error.as_deref().is_some_and(|e| e.contains("250ms")));
    }

    #[tokio::test]
    async fn test_runs_in_working_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let backend = CliBackend::new(BackendKind::Codex);
        let options = ExecuteOptions::new("x", dir.path()).with_launch(sh("pwd"));

        let result = backend.execute(options).await;
        assert!(result.success);
        let dir_name = dir.path().file_name().unwrap().to_string_lossy();
        assert!(result.output.trim_end().ends_with(dir_name.as_ref()));
    }

    #[tokio::test]
    async fn test_missing_cli_is_not_detected() {
        // None of the known agent CLIs is guaranteed to be installed, so only
        // check consistency between detect() and version().
        for kind in BackendKind::all() {
            let backend = CliBackend::new(kind);
            if !backend.detect().await {
                assert!(backend.version().await.is_none());
            }
        }
    }
}
