//! Load test run command.

use anyhow::Context;
use loadtest_engine::LoadTestDriver;
use loadtest_metrics::{format_summary, save_report, MetricsReport};
use std::sync::Arc;

use super::RunArgs;

/// Run a load test, print its summary and persist the metrics file.
///
/// The summary is printed before persisting, so a failed save still leaves
/// the operator with the results of the completed run.
pub async fn run_load_test(args: RunArgs) -> anyhow::Result<MetricsReport> {
    let params = args.resolve_params()?;
    let backend = args.backend.build()?;

    tracing::info!(
        "Resolved parameters: users={} iterations_per_user={} delay_range=({}, {}) collection_pool_size={} shared_doc_probability={} seed={:?}",
        params.users,
        params.iterations_per_user,
        params.delay_range.min_secs,
        params.delay_range.max_secs,
        params.collection_pool_size,
        params.shared_doc_probability,
        params.seed
    );

    let driver = LoadTestDriver::new(params, Arc::new(backend))?;
    let outcome = driver.run().await;

    println!("{}", format_summary(&outcome.report));

    if let Err(e) = save_report(&args.output, &outcome.report) {
        tracing::error!("Failed to save metrics: {}", e);
        return Err(e).with_context(|| {
            format!(
                "Load test completed but metrics could not be written to {:?}",
                args.output
            )
        });
    }
    println!("Metrics saved to {}", args.output.display());

    Ok(outcome.report)
}
