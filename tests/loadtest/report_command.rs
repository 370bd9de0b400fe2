//! `report` command integration tests.

use docstore_loadtest::{run_report, ReportArgs};
use tempfile::TempDir;

const LEGACY_METRICS: &str = r#"{
  "params": {
    "users": 2400,
    "iterations_per_user": 20,
    "collection_pool": 100,
    "use_shared_doc_prob": 0.1
  },
  "errors": { "write": 2 },
  "latencies": {
    "write": [0.05, 0.2],
    "read": [0.01, 0.02, 0.5],
    "write_first": [0.9],
    "read_first": []
  }
}"#;

#[test]
fn test_report_renders_legacy_metrics_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("metrics.json");
    std::fs::write(&input, LEGACY_METRICS).unwrap();

    let output = run_report(&ReportArgs {
        input,
        outlier_threshold: 0.12,
    })
    .unwrap();

    assert!(output.contains("Users: 2400"));
    assert!(output.contains("Writes: 3 OK / 2 errors"));
    assert!(output.contains("Mean read latency: 0.1767s"));
    assert!(output.contains("First iteration: 0 OK, mean no data"));
    assert!(output.contains("> 0.12s"));
}

#[test]
fn test_report_missing_file() {
    let dir = TempDir::new().unwrap();

    let err = run_report(&ReportArgs {
        input: dir.path().join("nope.json"),
        outlier_threshold: 0.12,
    })
    .unwrap_err();

    assert!(format!("{err:#}").contains("Failed to load metrics"));
}

#[test]
fn test_report_rejects_negative_threshold() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("metrics.json");
    std::fs::write(&input, LEGACY_METRICS).unwrap();

    assert!(run_report(&ReportArgs {
        input,
        outlier_threshold: -1.0,
    })
    .is_err());
}
