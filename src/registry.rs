//! Backend registry and bulk detection.

use crate::backend::{Backend, CliBackend};
use crate::{BackendKind, DetectionReport};
use futures::future::join_all;
use std::sync::Arc;

/// An ordered list of backends.
///
/// Order is insertion order and is the order of every detection report.
/// The registry is passed explicitly to the code that needs it; there is no
/// process-wide instance.
///
/// # Example
///
/// ```rust,no_run
/// use agent_bridge::Registry;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let registry = Registry::default();
///     for report in registry.detect_all().await {
///         println!("{}: installed={}", report.name, report.installed);
///     }
/// }
/// ```
#[derive(Clone)]
pub struct Registry {
    backends: Vec<Arc<dyn Backend>>,
}

impl Registry {
    /// An empty registry.
    pub fn empty() -> Self {
        Self {
            backends: Vec::new(),
        }
    }

    /// A registry holding one [`CliBackend`] per [`BackendKind`], in kind order.
    pub fn with_known_backends() -> Self {
        BackendKind::all().fold(Self::empty(), |registry, kind| {
            registry.with(CliBackend::new(kind))
        })
    }

    /// Append a backend, builder style.
    pub fn with(mut self, backend: impl Backend + 'static) -> Self {
        self.register(Arc::new(backend));
        self
    }

    /// Append a backend.
    pub fn register(&mut self, backend: Arc<dyn Backend>) {
        self.backends.push(backend);
    }

    /// Find a backend by exact, case-sensitive name.
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Backend>> {
        self.backends
            .iter()
            .find(|backend| backend.name() == name)
            .cloned()
    }

    /// Backend names in registry order.
    pub fn names(&self) -> Vec<&str> {
        self.backends.iter().map(|backend| backend.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    /// Detect every backend concurrently.
    ///
    /// Probes run in parallel with `join_all`, so the total time is roughly
    /// that of the slowest probe. Reports come back in registry order no
    /// matter which probe finishes first. A backend that is not detected is
    /// reported with `installed: false`; this never fails.
    pub async fn detect_all(&self) -> Vec<DetectionReport> {
        let probes = self.backends.iter().map(|backend| async move {
            let installed = backend.detect().await;
            let version = if installed {
                backend.version().await
            } else {
                None
            };
            DetectionReport {
                name: backend.name().to_string(),
                installed,
                capabilities: backend.capabilities(),
                version,
            }
        });

        join_all(probes).await
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_known_backends()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("backends", &self.names())
            .finish()
    }
}
