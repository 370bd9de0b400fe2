//! `run` command integration tests.

use docstore_loadtest::{run_load_test, BackendArgs, RunArgs};
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

fn args(output: PathBuf) -> RunArgs {
    RunArgs {
        config: None,
        users: Some(3),
        iterations_per_user: Some(5),
        delay_range: Some((0.0, 0.0)),
        collection_pool_size: Some(2),
        shared_doc_probability: Some(0.0),
        seed: Some(42),
        output,
        backend: BackendArgs {
            backend_latency: None,
            write_failure_rate: 0.0,
            read_failure_rate: 0.0,
        },
    }
}

#[tokio::test]
async fn test_run_writes_metrics_file() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("metrics.json");

    let report = run_load_test(args(output.clone())).await.unwrap();

    assert_eq!(report.latencies.read.len() + report.latencies.read_first.len(), 15);
    assert_eq!(
        report.latencies.write.len() + report.latencies.write_first.len(),
        6
    );

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(raw["params"]["users"], 3);
    assert_eq!(raw["params"]["iterations_per_user"], 5);
    assert_eq!(raw["params"]["collection_pool_size"], 2);
    assert_eq!(raw["params"]["seed"], 42);
    assert_eq!(raw["errors"], serde_json::json!({}));
    for key in ["write", "read", "write_first", "read_first"] {
        assert!(raw["latencies"][key].is_array());
    }
}

#[tokio::test]
async fn test_run_with_failing_writes_still_reports() {
    let dir = TempDir::new().unwrap();
    let mut run_args = args(dir.path().join("metrics.json"));
    run_args.backend.write_failure_rate = 1.0;

    let report = run_load_test(run_args).await.unwrap();

    assert_eq!(report.errors.write, 6);
    assert_eq!(report.errors.read, 0);
    assert!(dir.path().join("metrics.json").exists());
}

#[tokio::test]
async fn test_config_file_is_overridden_by_flags() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("loadtest.toml");
    let mut file = std::fs::File::create(&config_path).unwrap();
    writeln!(file, "users = 7\niterations_per_user = 2\ndelay_range = [0.0, 0.0]").unwrap();

    let mut run_args = args(dir.path().join("metrics.json"));
    run_args.config = Some(config_path);
    run_args.users = None;
    run_args.delay_range = None;

    let params = run_args.resolve_params().unwrap();

    assert_eq!(params.users, 7);
    assert_eq!(params.iterations_per_user, 5);
    assert_eq!(params.delay_range.max_secs, 0.0);
}

#[tokio::test]
async fn test_invalid_parameters_are_rejected() {
    let dir = TempDir::new().unwrap();
    let mut run_args = args(dir.path().join("metrics.json"));
    run_args.shared_doc_probability = Some(2.0);

    let err = run_load_test(run_args).await.unwrap_err();

    assert!(format!("{err:#}").contains("shared_doc_probability"));
    assert!(!dir.path().join("metrics.json").exists());
}

#[tokio::test]
async fn test_unwritable_output_surfaces_error() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("missing-dir").join("metrics.json");

    let err = run_load_test(args(output)).await.unwrap_err();

    assert!(format!("{err:#}").contains("Load test completed"));
}

#[test]
fn test_invalid_failure_rate_rejected() {
    let backend = BackendArgs {
        backend_latency: None,
        write_failure_rate: 1.5,
        read_failure_rate: 0.0,
    };

    assert!(backend.build().is_err());
}

#[test]
fn test_oversized_backend_latency_rejected() {
    let backend = BackendArgs {
        backend_latency: Some((1e30, 1e30)),
        write_failure_rate: 0.0,
        read_failure_rate: 0.0,
    };

    let err = backend.build().unwrap_err();

    assert!(format!("{err:#}").contains("out of range"));
}

#[tokio::test]
async fn test_oversized_delay_from_config_rejected() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("loadtest.yaml");
    std::fs::write(&config_path, "delay_range: [1.0e30, 1.0e30]\n").unwrap();

    let mut run_args = args(dir.path().join("metrics.json"));
    run_args.config = Some(config_path);
    run_args.delay_range = None;

    let err = run_load_test(run_args).await.unwrap_err();

    assert!(format!("{err:#}").contains("out of range"));
    assert!(!dir.path().join("metrics.json").exists());
}
