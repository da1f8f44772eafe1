//! Aggregation of collapsed stacks into per-function totals.
//!
//! This module transforms collapsed-stack files into:
//! - Per-function sample counts (hot functions table)
//! - Per-stack totals (hot stacks)
//! - Sample distribution statistics

pub mod collapse;
pub mod metrics;

// Re-export main types and functions
pub use collapse::{aggregate_stacks, CollapsedStack, StackAggregate};
pub use metrics::{calculate_sample_distribution, SampleDistribution};
