//! Configuration initialization.

use crate::{
    BackendKind, BridgeError, Config, ConfigStore, DetectionReport, Registry, DEFAULT_TIMEOUT_MS,
};
use tracing::{info, warn};

/// What [`initialize`] found and wrote.
#[derive(Debug, Clone)]
pub struct InitReport {
    /// The configuration that was saved.
    pub config: Config,
    /// Detection results the default was picked from, in registry order.
    pub detections: Vec<DetectionReport>,
}

/// Detect backends and write a fresh configuration.
///
/// The default backend is the first detected one in registry order. When
/// nothing is detected the first registered backend is used instead. Launch
/// specs for every known [`BackendKind`] are written whether detected or not.
/// Any existing configuration is replaced.
pub async fn initialize(registry: &Registry, store: &ConfigStore) -> Result<InitReport, BridgeError> {
    let detections = registry.detect_all().await;

    let default_backend = match detections.iter().find(|report| report.installed) {
        Some(report) => report.name.clone(),
        None => {
            let fallback = registry
                .names()
                .first()
                .map(|name| name.to_string())
                .unwrap_or_else(|| BackendKind::Claude.name().to_string());
            warn!(backend = %fallback, "no backend detected, defaulting anyway");
            fallback
        }
    };

    let config = Config {
        default_backend,
        backends: BackendKind::all()
            .map(|kind| (kind.name().to_string(), kind.launch_spec()))
            .collect(),
        timeout: DEFAULT_TIMEOUT_MS,
    };

    store.save(&config)?;
    info!(
        path = %store.path().display(),
        default_backend = %config.default_backend,
        "configuration initialized"
    );

    Ok(InitReport { config, detections })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Backend, BackendCapabilities, ExecuteOptions, ExecutionResult};
    use async_trait::async_trait;
    use tempfile::TempDir;

    struct Fixed {
        name: &'static str,
        installed: bool,
    }

    #[async_trait]
    impl Backend for Fixed {
        fn name(&self) -> &str {
            self.name
        }

        async fn detect(&self) -> bool {
            self.installed
        }

        fn capabilities(&self) -> BackendCapabilities {
            BackendCapabilities::default()
        }

        async fn execute(&self, _options: ExecuteOptions) -> ExecutionResult {
            ExecutionResult::succeeded(self.name, "", "", "", 0)
        }
    }

    fn store(dir: &TempDir) -> ConfigStore {
        ConfigStore::at(dir.path().join("config.json"))
    }

    #[tokio::test]
    async fn test_first_detected_backend_is_default() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let registry = Registry::empty()
            .with(Fixed {
                name: "first",
                installed: false,
            })
            .with(Fixed {
                name: "second",
                installed: true,
            })
            .with(Fixed {
                name: "third",
                installed: true,
            });

        let report = initialize(&registry, &store).await.unwrap();
        assert_eq!(report.config.default_backend, "second");
        assert_eq!(report.detections.len(), 3);
        assert_eq!(store.load().unwrap(), Some(report.config));
    }

    #[tokio::test]
    async fn test_falls_back_to_first_registered() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let registry = Registry::empty().with(Fixed {
            name: "only",
            installed: false,
        });

        let report = initialize(&registry, &store).await.unwrap();
        assert_eq!(report.config.default_backend, "only");
    }

    #[tokio::test]
    async fn test_seeds_every_known_backend() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let registry = Registry::empty().with(Fixed {
            name: "mock",
            installed: true,
        });

        let report = initialize(&registry, &store).await.unwrap();
        assert_eq!(report.config.timeout, DEFAULT_TIMEOUT_MS);
        for kind in BackendKind::all() {
            assert_eq!(
                report.config.backends.get(kind.name()),
                Some(&kind.launch_spec())
            );
        }
    }

    #[tokio::test]
    async fn test_replaces_existing_configuration() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        std::fs::write(store.path(), "not json at all").unwrap();
        assert!(!store.is_initialized());

        let registry = Registry::empty().with(Fixed {
            name: "mock",
            installed: true,
        });
        initialize(&registry, &store).await.unwrap();
        assert!(store.is_initialized());
    }
}
