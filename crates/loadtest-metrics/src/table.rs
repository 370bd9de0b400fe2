//! Tabular view of a persisted report.

use crate::record::OperationKind;
use crate::report::MetricsReport;
use crate::summary::{format_mean, BucketStats};
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};

/// Latencies above this many seconds are counted as outliers.
pub const DEFAULT_OUTLIER_THRESHOLD_SECS: f64 = 0.12;

/// Format a report as a per-kind table.
///
/// First-iteration samples are folded into their kind here; the split is
/// only kept in the persisted buckets and the console summary.
pub fn format_table(report: &MetricsReport, outlier_threshold_secs: f64) -> String {
    let mut output = String::new();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "Operation".to_string(),
        "Samples".to_string(),
        "Mean".to_string(),
        format!("> {outlier_threshold_secs}s"),
        "Errors".to_string(),
    ]);

    for kind in [OperationKind::Write, OperationKind::Read] {
        let stats = BucketStats::from_samples(report.latencies.all_of(kind));
        let outliers = report
            .latencies
            .all_of(kind)
            .filter(|&secs| secs > outlier_threshold_secs)
            .count();
        let errors = report.errors.get(kind);

        let error_cell = if errors > 0 {
            Cell::new(format_number(errors)).fg(Color::Red)
        } else {
            Cell::new("0").fg(Color::Green)
        };

        table.add_row(vec![
            Cell::new(kind.to_string()),
            Cell::new(format_number(stats.count as u64)),
            Cell::new(format_mean(stats.mean)),
            Cell::new(format_number(outliers as u64)),
            error_cell,
        ]);
    }

    output.push_str(&table.to_string());
    output.push_str(&format!(
        "\n{} users x {} iterations in {}\n",
        report.params.users,
        report.params.iterations_per_user,
        format_duration(report.elapsed_secs)
    ));

    output
}

/// Format duration in human-readable format.
fn format_duration(secs: f64) -> String {
    if secs < 59.95 {
        return format!("{secs:.1}s");
    }

    // Round once, then split, so carries propagate into the larger unit.
    let total = secs.round() as u64;
    if total < 3600 {
        format!("{}m {:02}s", total / 60, total % 60)
    } else {
        format!("{}h {:02}m", total / 3600, (total % 3600) / 60)
    }
}

/// Format number with thousands separators.
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}
