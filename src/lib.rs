//! Perf Report
//!
//! Turns raw profiling artifacts (perf-stat counter dumps, collapsed
//! call stacks, Google Benchmark JSON, massif heap logs) into a single
//! self-contained HTML report per release.
//!
//! This crate provides the core implementation for the
//! `perf-report` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! perf-report --ver v1.2.0 --dst . --config cfg/project.json
//! ```

pub mod aggregator;
pub mod artifacts;
pub mod commands;
pub mod output;
pub mod parser;
pub mod report;
pub mod utils;
