//! Integration tests for backend detection.
//!
//! These run against whatever agent CLIs happen to be installed and are
//! written to pass either way.

use agent_bridge::{initialize, Backend, BackendKind, CliBackend, ConfigStore, Registry};
use std::time::{Duration, Instant};

#[tokio::test]
async fn test_detect_all_covers_every_known_backend() {
    let reports = Registry::default().detect_all().await;

    assert_eq!(reports.len(), 3);
    for (report, kind) in reports.iter().zip(BackendKind::all()) {
        assert_eq!(report.name, kind.name());
        assert_eq!(report.capabilities, kind.capabilities());
        if !report.installed {
            assert!(report.version.is_none(), "{} has a version but is not installed", kind.name());
        }
        println!(
            "{}: installed={} version={:?}",
            kind.display_name(),
            report.installed,
            report.version
        );
    }
}

#[tokio::test]
async fn test_detection_is_deterministic() {
    let backend = CliBackend::new(BackendKind::Claude);
    assert_eq!(backend.detect().await, backend.detect().await);
}

#[tokio::test]
async fn test_detect_all_is_fast() {
    // Version probes are capped at 2s each and run in parallel.
    let start = Instant::now();
    let _ = Registry::default().detect_all().await;
    assert!(
        start.elapsed() < Duration::from_secs(10),
        "detect_all() took {:?}",
        start.elapsed()
    );
}

#[tokio::test]
async fn test_initialize_with_real_registry() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = ConfigStore::at(dir.path().join("agent-bridge.json"));

    let report = initialize(&Registry::default(), &store).await.unwrap();

    let expected_default = report
        .detections
        .iter()
        .find(|d| d.installed)
        .map(|d| d.name.as_str())
        .unwrap_or("claude");
    assert_eq!(report.config.default_backend, expected_default);
    assert_eq!(report.config.backends.len(), 3);
    assert!(store.is_initialized());
}
