//! Report command: render a persisted metrics file.

use anyhow::Context;
use loadtest_metrics::{format_summary, format_table, load_report};

use super::ReportArgs;

/// Load a metrics file and print its summary and latency table.
pub fn run_report(args: &ReportArgs) -> anyhow::Result<String> {
    if !args.outlier_threshold.is_finite() || args.outlier_threshold < 0.0 {
        anyhow::bail!(
            "--outlier-threshold must be finite and non-negative, got {}",
            args.outlier_threshold
        );
    }

    let report = load_report(&args.input)
        .with_context(|| format!("Failed to load metrics from {:?}", args.input))?;

    let mut output = format_summary(&report);
    output.push('\n');
    output.push_str(&format_table(&report, args.outlier_threshold));

    println!("{output}");
    Ok(output)
}
