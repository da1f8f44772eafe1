//! Input parsers and record schema.
//!
//! This module handles:
//! - perf-stat counter dumps
//! - Google Benchmark JSON
//! - valgrind massif heap logs
//!
//! Every parser is a pure function of its input. Malformed lines or entries
//! are skipped, never reported as errors.

pub mod benchmark;
pub mod counter_stat;
pub mod heap;
pub mod schema;

// Re-export main types
pub use benchmark::parse_benchmarks;
pub use counter_stat::parse_counter_stats;
pub use heap::parse_heap_snapshots;
pub use schema::{BenchmarkResult, FunctionSample, HeapSnapshot, MetricRecord};
