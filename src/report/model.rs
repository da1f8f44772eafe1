//! Report input and output structures.
//!
//! `ReportContext` collects everything one run produced; it has no behavior.
//! `RenderableDocument` is what the renderer consumes: plain strings and
//! chart-ready tables, with every path already turned into a relative link.

use crate::artifacts::ArtifactSet;
use crate::parser::schema::{BenchmarkResult, FunctionSample, HeapSnapshot, MetricRecord};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Everything parsed and resolved for one report build
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub project_name: String,
    pub version: String,

    /// Already formatted generation time
    pub generated_at: String,

    /// Directory `report.html` will be written to
    pub report_dir: PathBuf,

    pub artifacts: ArtifactSet,
    pub counter_stats: Vec<MetricRecord>,
    pub top_functions: Vec<FunctionSample>,
    pub benchmarks: Vec<BenchmarkResult>,

    /// `None` when heap collection is disabled, `Some(vec![])` when enabled
    /// but nothing was found
    pub heap: Option<Vec<HeapSnapshot>>,
}

/// Input structure for the HTML renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderableDocument {
    pub project_name: String,
    pub version: String,
    pub timestamp: String,
    pub flamegraph_links: Vec<FlamegraphLink>,

    /// One table per data source, in display order
    pub tables: Vec<ChartTable>,
}

/// Link to a flamegraph SVG, relative to the report directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlamegraphLink {
    pub label: String,
    pub href: String,
}

/// A chart-ready two-column table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartTable {
    /// Stable identifier, used as the HTML section id
    pub key: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub rows: Vec<ChartRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRow {
    pub label: String,
    pub value: f64,
}

impl ChartTable {
    pub fn new(key: &str, title: &str, x_label: &str, y_label: &str, rows: Vec<ChartRow>) -> Self {
        Self {
            key: key.to_string(),
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
