//! Summary statistics over aggregated stack samples.
//!
//! Logged after aggregation so a CI log shows at a glance how concentrated
//! the profile is.

use super::collapse::{CollapsedStack, StackAggregate};

/// Sample distribution statistics
///
/// **Public** - returned from calculate_sample_distribution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleDistribution {
    /// Total samples across all stacks
    pub total_samples: u64,

    /// Number of unique stacks
    pub stack_count: usize,

    /// Number of unique function names
    pub function_count: usize,

    /// The single hottest exact stack
    pub hottest_stack: Option<CollapsedStack>,

    /// Share of all samples taken in the hottest stack
    pub hottest_stack_percentage: f64,
}

/// Calculate sample distribution statistics
///
/// **Public** - provides summary statistics
pub fn calculate_sample_distribution(aggregate: &StackAggregate) -> SampleDistribution {
    let total_samples = aggregate.total_samples();
    let hottest_stack = aggregate.top_stacks(1).into_iter().next();

    let hottest_stack_percentage = match &hottest_stack {
        Some(stack) if total_samples > 0 => {
            (stack.weight as f64 / total_samples as f64) * 100.0
        }
        _ => 0.0,
    };

    SampleDistribution {
        total_samples,
        stack_count: aggregate.unique_stacks(),
        function_count: aggregate.unique_functions(),
        hottest_stack,
        hottest_stack_percentage,
    }
}

impl SampleDistribution {
    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        let hottest = self
            .hottest_stack
            .as_ref()
            .map(|s| s.stack.as_str())
            .unwrap_or("-");

        format!(
            "Samples: {} | Stacks: {} | Functions: {} | Hottest: {} ({:.1}%)",
            self.total_samples,
            self.stack_count,
            self.function_count,
            hottest,
            self.hottest_stack_percentage
        )
    }
}
