//! Parser for `perf stat` text dumps.
//!
//! The format is human-oriented tool output, not a grammar. A line counts as
//! a metric when its first token is a number (thousands separators allowed)
//! and it has a second token naming the counter. Everything else (headers,
//! separators, `<not counted>` rows, blank lines) is skipped. Only the first
//! two tokens are consumed so extra trailing columns never break parsing.
//!
//! Example accepted line:
//! `     1,234,567      cache-misses              #    3.21 % of all cache refs`

use super::schema::MetricRecord;
use crate::utils::config::NOT_COUNTED_MARKER;
use crate::utils::error::ParseError;
use log::debug;
use std::path::Path;

/// Parse a perf-stat file into metric records, in file order
///
/// **Public** - main entry point for counter parsing
///
/// # Errors
/// * `ParseError::Io` - the file cannot be read. Bad lines never fail.
pub fn parse_counter_stats(path: &Path) -> Result<Vec<MetricRecord>, ParseError> {
    debug!("Parsing counter stats from: {}", path.display());

    let bytes = std::fs::read(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(parse_counter_stats_str(&String::from_utf8_lossy(&bytes)))
}

/// Parse perf-stat text already in memory
pub fn parse_counter_stats_str(content: &str) -> Vec<MetricRecord> {
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for line in content.lines() {
        match parse_line(line) {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }

    debug!(
        "Parsed {} counter records ({} lines skipped)",
        records.len(),
        skipped
    );

    records
}

/// Parse one line, `None` if it is not a metric row
///
/// **Private** - internal helper
fn parse_line(line: &str) -> Option<MetricRecord> {
    let mut tokens = line.split_whitespace();
    let raw_value = tokens.next()?;
    let name = tokens.next()?;

    if raw_value.contains(NOT_COUNTED_MARKER) {
        return None;
    }

    let value = raw_value.replace(',', "");
    if !is_plain_number(&value) {
        return None;
    }

    Some(MetricRecord {
        name: name.to_string(),
        value: value.parse().ok()?,
    })
}

/// Digits with at most one decimal point, and at least one digit
///
/// **Private** - rejects signs, exponents, `nan` and friends that
/// `f64::from_str` would otherwise accept
fn is_plain_number(token: &str) -> bool {
    let mut seen_digit = false;
    let mut seen_dot = false;

    for c in token.chars() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }

    seen_digit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_with_commas() {
        let record = parse_line("     1,234,567      cache-misses   #  3.2 %").unwrap();
        assert_eq!(record.name, "cache-misses");
        assert_eq!(record.value, 1_234_567.0);
    }

    #[test]
    fn test_parse_line_decimal() {
        let record = parse_line("  2,015.33 msec task-clock").unwrap();
        assert_eq!(record.name, "msec");
        assert_eq!(record.value, 2015.33);
    }

    #[test]
    fn test_parse_line_rejects_non_metrics() {
        assert!(parse_line("").is_none());
        assert!(parse_line(" Performance counter stats for './app':").is_none());
        assert!(parse_line("   <not counted>      branch-misses").is_none());
        assert!(parse_line("   <not supported>    L1-icache-loads").is_none());
        assert!(parse_line("12345").is_none());
        assert!(parse_line("-5 cycles").is_none());
        assert!(parse_line("1e5 cycles").is_none());
        assert!(parse_line("1.2.3 cycles").is_none());
        assert!(parse_line(". cycles").is_none());
    }

    #[test]
    fn test_is_plain_number() {
        assert!(is_plain_number("42"));
        assert!(is_plain_number("0.5"));
        assert!(is_plain_number("7."));
        assert!(!is_plain_number(""));
        assert!(!is_plain_number("nan"));
        assert!(!is_plain_number("inf"));
    }
}
