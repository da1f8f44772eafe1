//! Aggregate collapsed-stack files into per-function sample counts.
//!
//! Collapsed stacks are the interchange format for flamegraph generation.
//! Format: "frame;frame;frame count"
//!
//! Example: "main;execute_tx;storage_read 1000"
//! This means 1000 samples were taken with exactly that call stack.
//!
//! Each valid line adds its count to a per-stack total and, once per unique
//! frame name in the stack, to a per-function total. A function that appears
//! three times in one stack (recursion) is credited once for that line. The
//! per-function total therefore answers "how many samples had this function
//! anywhere on the stack".

use crate::parser::schema::FunctionSample;
use crate::utils::error::ParseError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// A single collapsed stack entry
///
/// **Public** - per-stack totals exposed by `StackAggregate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollapsedStack {
    /// Stack trace as semicolon-separated string
    pub stack: String,

    /// Samples recorded for this exact stack
    pub weight: u64,
}

impl CollapsedStack {
    /// Create a new collapsed stack
    ///
    /// **Public** - constructor
    pub fn new(stack: String, weight: u64) -> Self {
        Self { stack, weight }
    }
}

/// Counters keyed by name, remembering first-appearance order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct OrderedCounts {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl OrderedCounts {
    fn add(&mut self, key: &str, count: u64) {
        match self.index.get(key) {
            Some(&slot) => {
                let total = &mut self.entries[slot].1;
                *total = total.saturating_add(count);
            }
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), count));
            }
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries sorted by count descending; ties keep first-appearance order
    fn ranked(&self) -> Vec<(String, u64)> {
        let mut ranked = self.entries.clone();
        // sort_by is stable, which is what keeps ties in insertion order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

/// Running per-stack and per-function totals
///
/// **Public** - aggregation is commutative over counts and associative:
/// merging the aggregates of two files equals aggregating their concatenation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackAggregate {
    stacks: OrderedCounts,
    functions: OrderedCounts,
    skipped_lines: usize,
}

impl StackAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate collapsed-stack text already in memory
    pub fn from_text(content: &str) -> Self {
        let mut aggregate = Self::new();
        for line in content.lines() {
            aggregate.add_line(line);
        }
        aggregate
    }

    /// Aggregate a collapsed-stack file
    ///
    /// # Errors
    /// * `ParseError::Io` - the file cannot be read. Bad lines never fail.
    pub fn from_file(path: &Path) -> Result<Self, ParseError> {
        debug!("Aggregating collapsed stacks from: {}", path.display());

        let bytes = std::fs::read(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let aggregate = Self::from_text(&String::from_utf8_lossy(&bytes));

        debug!(
            "Aggregated {} unique stacks, {} functions ({} lines skipped)",
            aggregate.stacks.len(),
            aggregate.functions.len(),
            aggregate.skipped_lines
        );

        Ok(aggregate)
    }

    /// Fold one collapsed-stack line into the totals
    ///
    /// Returns false (and counts the line as skipped) when the line has no
    /// whitespace-separated trailing count, the count is not a non-negative
    /// integer, or the stack part is empty. Blank lines are ignored silently.
    pub fn add_line(&mut self, line: &str) -> bool {
        let line = line.trim();
        if line.is_empty() {
            return false;
        }

        let Some((stack, count)) = split_count(line) else {
            self.skipped_lines += 1;
            return false;
        };

        self.stacks.add(stack, count);

        let mut seen: HashSet<&str> = HashSet::new();
        for frame in stack.split(';').filter(|f| !f.is_empty()) {
            if seen.insert(frame) {
                self.functions.add(frame, count);
            }
        }

        true
    }

    /// Merge another aggregate into this one
    ///
    /// Entries new to `self` are appended in `other`'s first-appearance order.
    pub fn merge(&mut self, other: &StackAggregate) {
        for (stack, count) in &other.stacks.entries {
            self.stacks.add(stack, *count);
        }
        for (function, count) in &other.functions.entries {
            self.functions.add(function, *count);
        }
        self.skipped_lines += other.skipped_lines;
    }

    /// Top `top_n` functions by sample count, descending
    pub fn top_functions(&self, top_n: usize) -> Vec<FunctionSample> {
        self.functions
            .ranked()
            .into_iter()
            .take(top_n)
            .map(|(function_name, sample_count)| FunctionSample {
                function_name,
                sample_count,
            })
            .collect()
    }

    /// Top `top_n` exact stacks by sample count, descending
    pub fn top_stacks(&self, top_n: usize) -> Vec<CollapsedStack> {
        self.stacks
            .ranked()
            .into_iter()
            .take(top_n)
            .map(|(stack, weight)| CollapsedStack::new(stack, weight))
            .collect()
    }

    /// Sum of all accepted line counts
    pub fn total_samples(&self) -> u64 {
        self.stacks
            .entries
            .iter()
            .fold(0u64, |acc, (_, count)| acc.saturating_add(*count))
    }

    pub fn unique_stacks(&self) -> usize {
        self.stacks.len()
    }

    pub fn unique_functions(&self) -> usize {
        self.functions.len()
    }

    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }
}

/// Split "stack count" on the last whitespace run
///
/// **Private** - internal parsing helper
fn split_count(line: &str) -> Option<(&str, u64)> {
    let (stack, count) = line.rsplit_once(char::is_whitespace)?;
    let stack = stack.trim();
    if stack.is_empty() {
        return None;
    }
    let count = count.parse::<u64>().ok()?;
    Some((stack, count))
}

/// Aggregate a collapsed-stack file and return its hottest functions
///
/// **Public** - main entry point for stack aggregation
///
/// # Arguments
/// * `path` - Collapsed-stack text file
/// * `top_n` - Number of functions to keep (the report uses 15)
///
/// # Returns
/// Functions sorted by sample count descending, ties in first-appearance order
pub fn aggregate_stacks(path: &Path, top_n: usize) -> Result<Vec<FunctionSample>, ParseError> {
    Ok(StackAggregate::from_file(path)?.top_functions(top_n))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(samples: &[FunctionSample]) -> Vec<(&str, u64)> {
        samples
            .iter()
            .map(|s| (s.function_name.as_str(), s.sample_count))
            .collect()
    }

    #[test]
    fn test_basic_aggregation() {
        let aggregate = StackAggregate::from_text("main;foo;bar 5\nmain;foo;baz 3\n");
        let top = aggregate.top_functions(15);
        assert_eq!(
            counts(&top),
            vec![("main", 8), ("foo", 8), ("bar", 5), ("baz", 3)]
        );
        assert_eq!(aggregate.total_samples(), 8);
        assert_eq!(aggregate.unique_stacks(), 2);
    }

    #[test]
    fn test_recursive_frames_counted_once_per_line() {
        let aggregate = StackAggregate::from_text("main;fib;fib;fib 4\n");
        let top = aggregate.top_functions(15);
        assert_eq!(counts(&top), vec![("main", 4), ("fib", 4)]);
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let aggregate = StackAggregate::from_text(
            "nospace\nmain;foo x\nmain;foo -3\n 7\n\nmain;ok 2\nmain;tab\t6\n",
        );
        let top = aggregate.top_functions(15);
        assert_eq!(counts(&top), vec![("main", 8), ("tab", 6), ("ok", 2)]);
        assert_eq!(aggregate.skipped_lines(), 4);
    }

    #[test]
    fn test_split_on_last_whitespace() {
        // Frame names may contain spaces, e.g. C++ signatures
        let aggregate = StackAggregate::from_text("main;operator new(unsigned long) 9\n");
        let top = aggregate.top_functions(15);
        assert_eq!(
            counts(&top),
            vec![("main", 9), ("operator new(unsigned long)", 9)]
        );
    }

    #[test]
    fn test_top_n_truncates_and_keeps_tie_order() {
        let aggregate = StackAggregate::from_text("a 1\nb 3\nc 1\nd 3\n");
        let top = aggregate.top_functions(3);
        assert_eq!(counts(&top), vec![("b", 3), ("d", 3), ("a", 1)]);
    }

    #[test]
    fn test_top_stacks() {
        let aggregate = StackAggregate::from_text("a;b 1\na;c 4\na;b 2\n");
        let stacks = aggregate.top_stacks(1);
        assert_eq!(stacks, vec![CollapsedStack::new("a;c".to_string(), 4)]);
    }
}
