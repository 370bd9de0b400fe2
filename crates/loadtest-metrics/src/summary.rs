//! Human-readable end-of-run summary.

use crate::record::{OperationKind, Phase};
use crate::report::MetricsReport;

/// Count and mean of a latency bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketStats {
    pub count: usize,
    /// `None` when the bucket is empty.
    pub mean: Option<f64>,
}

impl BucketStats {
    pub fn from_samples<I: IntoIterator<Item = f64>>(samples: I) -> Self {
        let (count, sum) = samples
            .into_iter()
            .fold((0usize, 0.0f64), |(n, s), v| (n + 1, s + v));
        let mean = if count > 0 {
            Some(sum / count as f64)
        } else {
            None
        };
        Self { count, mean }
    }
}

/// Format a mean latency in seconds, or `no data` for an empty bucket.
pub fn format_mean(mean: Option<f64>) -> String {
    match mean {
        Some(secs) => format!("{secs:.4}s"),
        None => "no data".to_string(),
    }
}

/// Render the console summary of a finished run.
pub fn format_summary(report: &MetricsReport) -> String {
    let params = &report.params;
    let mut output = String::new();

    output.push_str("\n===== DOCUMENT STORE LOAD TEST REPORT =====\n");
    output.push_str(&format!("Users: {}\n", params.users));
    output.push_str(&format!(
        "Iterations per user: {}\n",
        params.iterations_per_user
    ));
    output.push_str(&format!("Collections: {}\n", params.collection_pool_size));
    output.push_str(&format!(
        "Shared documents: {:.0}%\n",
        params.shared_doc_probability * 100.0
    ));
    output.push_str(&format!("Total time: {:.2}s\n", report.elapsed_secs));

    for (label, kind) in [("Writes", OperationKind::Write), ("Reads", OperationKind::Read)] {
        let normal = BucketStats::from_samples(
            report.latencies.bucket(kind, Phase::Normal).iter().copied(),
        );
        let first = BucketStats::from_samples(
            report
                .latencies
                .bucket(kind, Phase::FirstIteration)
                .iter()
                .copied(),
        );

        // Errors are counted across both phases, so the OK count is too.
        output.push_str(&format!(
            "\n{label}: {} OK / {} errors\n",
            normal.count + first.count,
            report.errors.get(kind)
        ));
        output.push_str(&format!("  Mean {kind} latency: {}\n", format_mean(normal.mean)));
        output.push_str(&format!(
            "  First iteration: {} OK, mean {}\n",
            first.count,
            format_mean(first.mean)
        ));
    }

    output
}
