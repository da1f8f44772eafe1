//! Tabular records produced by the parsers and the aggregator.
//!
//! Every record is a plain row. Collections keep input order unless the
//! producing function documents otherwise.

use serde::{Deserialize, Serialize};

/// One hardware counter from a perf-stat dump
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    /// Counter name (second token of the line, e.g. "cache-misses")
    pub name: String,

    /// Counter value with thousands separators removed
    pub value: f64,
}

/// Samples attributed to one function across all collapsed stacks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSample {
    pub function_name: String,
    pub sample_count: u64,
}

/// One micro-benchmark timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub name: String,

    /// CPU time normalised to nanoseconds
    pub cpu_time_ns: f64,
}

/// One heap-size sample from a massif log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeapSnapshot {
    /// Position among accepted samples, starting at 0
    pub snapshot_index: usize,
    pub heap_bytes: u64,
}
