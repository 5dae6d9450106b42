//! Timeout-guarded subprocess execution.

use std::path::Path;
use std::process::Stdio;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, warn};

/// How long stream readers may keep draining after the process is gone.
///
/// A killed process can leave descendants holding its pipes open; past this
/// grace period whatever has been captured so far is returned.
const DRAIN_GRACE: Duration = Duration::from_secs(2);

/// How a process run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Exit {
    /// Normal exit with a status code.
    Code(i32),
    /// Terminated by a signal it did not get from us.
    Signaled,
    /// Killed after exceeding the timeout.
    TimedOut,
    /// Could not be started, or could not be waited on.
    Failed(String),
}

/// Captured output of one process run.
#[derive(Debug, Clone)]
pub(crate) struct ProcessOutcome {
    pub exit: Exit,
    pub stdout: String,
    pub stderr: String,
}

type Sink = Arc<Mutex<Vec<u8>>>;

/// Spawn `program args...` in `working_dir` and wait for it, at most `limit`.
///
/// Stdout and stderr are captured in full. On timeout the process is killed
/// and whatever it wrote up to that point is kept.
pub(crate) async fn run(
    program: &str,
    args: &[String],
    working_dir: &Path,
    limit: Duration,
) -> ProcessOutcome {
    let mut command = Command::new(program);
    command
        .args(args)
        .current_dir(working_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    debug!(program, ?args, cwd = %working_dir.display(), "spawning");

    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(e) => {
            return ProcessOutcome {
                exit: Exit::Failed(e.to_string()),
                stdout: String::new(),
                stderr: String::new(),
            }
        }
    };

    let stdout_sink = Sink::default();
    let stderr_sink = Sink::default();
    let stdout_task = child
        .stdout
        .take()
        .map(|out| tokio::spawn(drain(out, stdout_sink.clone())));
    let stderr_task = child
        .stderr
        .take()
        .map(|err| tokio::spawn(drain(err, stderr_sink.clone())));

    let exit = match timeout(limit, child.wait()).await {
        Ok(Ok(status)) => status.code().map_or(Exit::Signaled, Exit::Code),
        Ok(Err(e)) => Exit::Failed(e.to_string()),
        Err(_) => {
            warn!(program, timeout_ms = limit.as_millis() as u64, "timed out, killing");
            if let Err(e) = child.kill().await {
                debug!(program, error = %e, "kill after timeout failed");
            }
            Exit::TimedOut
        }
    };

    ProcessOutcome {
        exit,
        stdout: collect(stdout_task, &stdout_sink).await,
        stderr: collect(stderr_task, &stderr_sink).await,
    }
}

async fn drain<R: AsyncRead + Unpin>(mut reader: R, sink: Sink) {
    let mut chunk = [0u8; 8192];
    loop {
        match reader.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                if let Ok(mut buf) = sink.lock() {
                    buf.extend_from_slice(&chunk[..n]);
                }
            }
        }
    }
}

async fn collect(task: Option<JoinHandle<()>>, sink: &Sink) -> String {
    if let Some(mut task) = task {
        if timeout(DRAIN_GRACE, &mut task).await.is_err() {
            task.abort();
        }
    }
    let bytes = sink.lock().map(|buf| buf.clone()).unwrap_or_default();
    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::Instant;

    fn sh(script: &str) -> Vec<String> {
        vec!["-c".to_string(), script.to_string()]
    }

    #[tokio::test]
    async fn test_captures_both_streams() {
        let outcome = run(
            "sh",
            &sh("echo out; echo err >&2"),
            Path::new("."),
            Duration::from_secs(10),
        )
        .await;
        assert_eq!(outcome.exit, Exit::Code(0));
        assert_eq!(outcome.stdout, "out\n");
        assert_eq!(outcome.stderr, "err\n");
    }

    #[tokio::test]
    async fn test_reports_exit_code() {
        let outcome = run("sh", &sh("exit 7"), Path::new("."), Duration::from_secs(10)).await;
        assert_eq!(outcome.exit, Exit::Code(7));
    }

    #[tokio::test]
    async fn test_spawn_failure() {
        let outcome = run(
            "/nonexistent/agent-cli",
            &[],
            Path::new("."),
            Duration::from_secs(10),
        )
        .await;
        assert!(matches!(outcome.exit, Exit::Failed(_)));
    }

    #[tokio::test]
    async fn test_timeout_kills_and_keeps_partial_output() {
        let start = Instant::now();
        let outcome = run(
            "sh",
            &sh("echo partial; exec sleep 30"),
            Path::new("."),
            Duration::from_millis(300),
        )
        .await;
        assert_eq!(outcome.exit, Exit::TimedOut);
        assert_eq!(outcome.stdout, "partial\n");
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_timeout_with_orphaned_descendant_is_bounded() {
        // sleep runs as a child of sh and keeps the pipes open after sh dies
        let start = Instant::now();
        let outcome = run(
            "sh",
            &sh("sleep 30; echo never"),
            Path::new("."),
            Duration::from_millis(300),
        )
        .await;
        assert_eq!(outcome.exit, Exit::TimedOut);
        assert!(start.elapsed() < Duration::from_secs(8));
    }
}
