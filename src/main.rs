//! # agent-bridge CLI
//!
//! Binary entry point. Runs a prompt through the configured AI agent CLI,
//! or manages configuration via `init` and `backends`.
//!
//! Standard output carries only the agent's response; every diagnostic goes
//! to standard error.

use agent_bridge::{
    initialize, Bridge, BridgeError, ConfigStore, DetectionReport, ExecutionResult, PromptRequest,
    Registry,
};
use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Run a prompt through a locally installed AI agent CLI.
#[derive(Parser, Debug)]
#[command(
    name = "agent-bridge",
    version,
    about,
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Prompt passed verbatim to the backend; quote it if it has spaces
    #[arg(value_name = "PROMPT")]
    prompt: Vec<String>,

    /// Backend to use for this call (overrides AGENT_BRIDGE_BACKEND and the configured default)
    #[arg(long, value_name = "NAME")]
    backend: Option<String>,

    /// Timeout in milliseconds (overrides the configured timeout)
    #[arg(long, value_name = "MS")]
    timeout: Option<u64>,

    /// Working directory for the backend process
    #[arg(long, value_name = "DIR", default_value = ".")]
    cwd: PathBuf,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Detect installed backends and write ~/.agent-bridge.json
    Init,

    /// Show which backends are installed and what they support
    Backends,

    /// Print usage
    Help,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            if let Some(bridge_error) = e.downcast_ref::<BridgeError>() {
                eprintln!("hint: {}", bridge_error.remediation());
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "agent_bridge=debug"
    } else {
        "agent_bridge=warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// What a parsed command line asks for.
#[derive(Debug, PartialEq, Eq)]
enum Action {
    Init,
    Backends,
    Help,
    Prompt(String),
    Usage,
}

impl Cli {
    /// The first non-flag argument is the prompt and wins over any
    /// subcommand name that follows it.
    fn action(&self) -> Action {
        if let Some((prompt, rest)) = self.prompt.split_first() {
            if !rest.is_empty() || self.command.is_some() {
                warn!(
                    ignored = ?rest,
                    command = ?self.command,
                    "only the first argument is sent as the prompt; quote prompts containing spaces"
                );
            }
            return Action::Prompt(prompt.clone());
        }

        match self.command {
            Some(Commands::Init) => Action::Init,
            Some(Commands::Backends) => Action::Backends,
            Some(Commands::Help) => Action::Help,
            None => Action::Usage,
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let registry = Registry::default();

    match cli.action() {
        Action::Init => run_init(&registry, &ConfigStore::user_default()?).await,
        Action::Backends => run_backends(&registry, &ConfigStore::user_default()?).await,
        Action::Help => {
            print_usage();
            Ok(ExitCode::SUCCESS)
        }
        Action::Prompt(prompt) => {
            let mut request = PromptRequest::new(prompt, cli.cwd);
            request.backend = cli.backend;
            request.timeout_ms = cli.timeout;
            let bridge = Bridge::new(registry, ConfigStore::user_default()?);
            run_prompt(bridge, request).await
        }
        Action::Usage => {
            print_usage();
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run_init(registry: &Registry, store: &ConfigStore) -> Result<ExitCode> {
    let report = initialize(registry, store)
        .await
        .context("Failed to initialize configuration")?;

    eprintln!("Wrote {}", store.path().display());
    print_detections(&report.detections, Some(&report.config.default_backend));
    if !report.detections.iter().any(|d| d.installed) {
        eprintln!(
            "\nNo backend detected; defaulting to {}. Install one and re-run `agent-bridge init`.",
            report.config.default_backend
        );
    }
    Ok(ExitCode::SUCCESS)
}

async fn run_backends(registry: &Registry, store: &ConfigStore) -> Result<ExitCode> {
    // A broken config should not stop the listing.
    let default_backend = match store.load() {
        Ok(config) => config.map(|c| c.default_backend),
        Err(e) => {
            eprintln!("warning: {}", e);
            None
        }
    };

    let detections = registry.detect_all().await;
    print_detections(&detections, default_backend.as_deref());
    Ok(ExitCode::SUCCESS)
}

async fn run_prompt(bridge: Bridge, request: PromptRequest) -> Result<ExitCode> {
    debug!(backend = ?request.backend, cwd = %request.working_dir.display(), "running prompt");
    let result = bridge.execute(request).await?;
    report_result(&result)
}

fn report_result(result: &ExecutionResult) -> Result<ExitCode> {
    if result.success {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(result.output.as_bytes())
            .context("Failed to write response")?;
        if !result.output.ends_with('\n') {
            writeln!(stdout).context("Failed to write response")?;
        }
        return Ok(ExitCode::SUCCESS);
    }

    eprintln!(
        "{} failed: {}",
        result.backend,
        result.error.as_deref().unwrap_or("unknown error")
    );
    let code = u8::try_from(result.process_exit_code()).unwrap_or(1);
    Ok(ExitCode::from(code))
}

fn print_detections(detections: &[DetectionReport], default_backend: Option<&str>) {
    eprintln!(
        "{:<2} {:<14} {:<10} {:<10} {:<9} {:<9} {}",
        "", "BACKEND", "INSTALLED", "VERSION", "CODEBASE", "HEADLESS", "STRUCTURED"
    );
    for report in detections {
        let marker = if Some(report.name.as_str()) == default_backend {
            "*"
        } else {
            ""
        };
        let version = report
            .version
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string());
        eprintln!(
            "{:<2} {:<14} {:<10} {:<10} {:<9} {:<9} {}",
            marker,
            report.name,
            yes_no(report.installed),
            version,
            yes_no(report.capabilities.codebase_context),
            yes_no(report.capabilities.headless),
            yes_no(report.capabilities.structured_output),
        );
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn print_usage() {
    eprintln!("{}", Cli::command().render_help());
}
