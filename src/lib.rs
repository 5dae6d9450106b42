//! # agent-bridge
//!
//! A thin layer over locally installed AI agent CLIs (Claude Code, Codex,
//! Cursor Agent): detect which ones are present, keep a small JSON
//! configuration, and run a prompt through one of them with a timeout.
//!
//! ## Features
//!
//! - `Backend` trait with one `CliBackend` per `BackendKind`
//! - `Registry` for lookup by name and parallel detection
//! - `ConfigStore` for the `~/.agent-bridge.json` configuration
//! - `Bridge` façade resolving the backend (explicit > environment > default)
//! - `initialize()` to detect backends and write a fresh configuration
//!
//! Pre-flight problems (no configuration, unknown backend) are returned as
//! [`BridgeError`]. Execution problems (spawn failure, non-zero exit,
//! timeout) are data in [`ExecutionResult`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use agent_bridge::{initialize, Bridge, ConfigStore, PromptRequest, Registry};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), agent_bridge::BridgeError> {
//!     let registry = Registry::default();
//!     let store = ConfigStore::user_default()?;
//!
//!     if !store.is_initialized() {
//!         initialize(&registry, &store).await?;
//!     }
//!
//!     let bridge = Bridge::new(registry, store);
//!     let result = bridge
//!         .execute(PromptRequest::new("What is 2+2?", ".").with_backend("claude"))
//!         .await?;
//!     println!("{}", result.output);
//!     Ok(())
//! }
//! ```

mod backend;
mod backend_kind;
mod bridge;
mod config;
mod detection;
mod error;
mod init;
mod model;
mod options;
mod registry;

pub use backend::{Backend, CliBackend, RESPONSE_FIELDS};
pub use backend_kind::BackendKind;
pub use bridge::{resolve_backend_name, Bridge, PromptRequest, BACKEND_ENV_VAR};
pub use config::{Config, ConfigStore, LaunchSpec, CONFIG_FILE_NAME, DEFAULT_TIMEOUT_MS};
pub use error::BridgeError;
pub use init::{initialize, InitReport};
pub use model::{BackendCapabilities, DetectionReport, ExecutionResult, EXIT_CODE_UNAVAILABLE};
pub use options::ExecuteOptions;
pub use registry::Registry;
