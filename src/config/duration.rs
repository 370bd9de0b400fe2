//! Duration and range parsing utilities.

use anyhow::Context;
use std::time::Duration;

/// Parse a duration string like "0.05", "50ms", "2s", "1m" into seconds.
/// Supports:
/// - Plain numbers (interpreted as seconds): "0.3"
/// - Milliseconds suffix: "50ms"
/// - Seconds suffix: "2s"
/// - Minutes suffix: "1m"
pub fn parse_duration_secs(s: &str) -> anyhow::Result<f64> {
    let s = s.trim();
    if s.is_empty() {
        anyhow::bail!("Empty duration string");
    }

    // "ms" must be checked before "s" and "m"
    let secs = if let Some(num_str) = s.strip_suffix("ms") {
        parse_number(num_str, "milliseconds")? / 1000.0
    } else if let Some(num_str) = s.strip_suffix('s') {
        parse_number(num_str, "seconds")?
    } else if let Some(num_str) = s.strip_suffix('m') {
        parse_number(num_str, "minutes")? * 60.0
    } else {
        parse_number(s, "duration")?
    };

    if !secs.is_finite() || secs < 0.0 {
        anyhow::bail!("Duration must be finite and non-negative: {s}");
    }
    if Duration::try_from_secs_f64(secs).is_err() {
        anyhow::bail!("Duration is out of range: {s}");
    }
    Ok(secs)
}

fn parse_number(num_str: &str, unit: &str) -> anyhow::Result<f64> {
    num_str
        .trim()
        .parse::<f64>()
        .with_context(|| format!("Invalid {unit} value: {num_str}"))
}

/// Parse a `MIN,MAX` range of durations into seconds.
///
/// A single value stands for a fixed duration (`MIN == MAX`).
pub fn parse_duration_range(s: &str) -> anyhow::Result<(f64, f64)> {
    let (min, max) = match s.split_once(',') {
        Some((min, max)) => (parse_duration_secs(min)?, parse_duration_secs(max)?),
        None => {
            let fixed = parse_duration_secs(s)?;
            (fixed, fixed)
        }
    };

    if min > max {
        anyhow::bail!("Range minimum exceeds maximum: {s}");
    }
    Ok((min, max))
}
