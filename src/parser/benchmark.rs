//! Parser for Google Benchmark JSON output.
//!
//! Benchmark data is optional enrichment. An absent or malformed document,
//! or one without a `benchmarks` array, is treated as an empty data source.
//! Entries lacking `name` or `cpu_time` are dropped one by one.

use super::schema::BenchmarkResult;
use log::{debug, warn};
use serde::Deserialize;
use std::path::Path;

/// Raw benchmark entry as emitted by `--benchmark_format=json`
#[derive(Debug, Deserialize)]
struct RawBenchmark {
    name: String,
    cpu_time: f64,

    /// "ns" (default), "us", "ms" or "s"
    #[serde(default)]
    time_unit: Option<String>,

    /// Set on aggregate rows; only "time" aggregates carry a timing
    #[serde(default)]
    aggregate_unit: Option<String>,
}

/// Aggregate unit of timing rows
const TIME_AGGREGATE_UNIT: &str = "time";

/// Parse a benchmark JSON file
///
/// **Public** - main entry point for benchmark parsing
///
/// Never fails: unreadable files yield an empty list.
pub fn parse_benchmarks(path: &Path) -> Vec<BenchmarkResult> {
    debug!("Parsing benchmarks from: {}", path.display());

    match std::fs::read_to_string(path) {
        Ok(content) => parse_benchmarks_str(&content),
        Err(e) => {
            warn!(
                "Benchmark file {} unreadable ({}), using empty data",
                path.display(),
                e
            );
            Vec::new()
        }
    }
}

/// Parse benchmark JSON already in memory
pub fn parse_benchmarks_str(content: &str) -> Vec<BenchmarkResult> {
    let document: serde_json::Value = match serde_json::from_str(content) {
        Ok(value) => value,
        Err(e) => {
            warn!("Malformed benchmark JSON ({}), using empty data", e);
            return Vec::new();
        }
    };

    let Some(entries) = document.get("benchmarks").and_then(|b| b.as_array()) else {
        warn!("Benchmark JSON has no `benchmarks` array, using empty data");
        return Vec::new();
    };

    let results: Vec<BenchmarkResult> = entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            match RawBenchmark::deserialize(entry) {
                Ok(raw)
                    if raw
                        .aggregate_unit
                        .as_deref()
                        .is_some_and(|unit| unit != TIME_AGGREGATE_UNIT) =>
                {
                    debug!("Skipping non-timing aggregate {}", raw.name);
                    None
                }
                Ok(raw) => Some(BenchmarkResult {
                    cpu_time_ns: to_nanoseconds(raw.cpu_time, raw.time_unit.as_deref()),
                    name: raw.name,
                }),
                Err(e) => {
                    // Log but don't fail - partial entries are expected
                    debug!("Skipping benchmark entry {}: {}", index, e);
                    None
                }
            }
        })
        .collect();

    debug!(
        "Parsed {} of {} benchmark entries",
        results.len(),
        entries.len()
    );

    results
}

/// Convert a timing in `unit` to nanoseconds
///
/// **Private** - unknown units keep the raw value
fn to_nanoseconds(value: f64, unit: Option<&str>) -> f64 {
    match unit {
        None | Some("ns") => value,
        Some("us") => value * 1e3,
        Some("ms") => value * 1e6,
        Some("s") => value * 1e9,
        Some(other) => {
            debug!("Unknown benchmark time unit '{}', keeping raw value", other);
            value
        }
    }
}
