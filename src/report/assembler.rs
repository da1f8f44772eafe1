//! Turn a `ReportContext` into a `RenderableDocument`.
//!
//! Pure transformation: no I/O, no clock. Flamegraph paths become links
//! relative to the report directory so the output can be moved together with
//! the input tree.

use super::model::{ChartRow, ChartTable, FlamegraphLink, RenderableDocument, ReportContext};
use crate::utils::config::{FLAMEGRAPH_LABEL_PREFIX, FLAMEGRAPH_SUFFIX};
use log::debug;
use std::path::{Component, Path};

pub const COUNTER_STATS_KEY: &str = "counter_stats";
pub const TOP_FUNCTIONS_KEY: &str = "top_functions";
pub const BENCHMARKS_KEY: &str = "benchmarks";
pub const HEAP_KEY: &str = "heap";

/// Assemble the renderer input
///
/// **Public** - main entry point for report assembly
///
/// Empty data sources still produce a (row-less) table so the renderer can
/// show an explicit "no data" state. The heap table is only present when
/// heap collection was enabled.
pub fn assemble(context: &ReportContext) -> RenderableDocument {
    let flamegraph_links: Vec<FlamegraphLink> = context
        .artifacts
        .flamegraphs
        .iter()
        .map(|path| FlamegraphLink {
            label: flamegraph_label(path),
            href: relative_link(path, &context.report_dir),
        })
        .collect();

    let mut tables = vec![
        ChartTable::new(
            COUNTER_STATS_KEY,
            "Cache / Branch / CPU Stats",
            "Metric",
            "Value",
            context
                .counter_stats
                .iter()
                .map(|m| ChartRow {
                    label: m.name.clone(),
                    value: m.value,
                })
                .collect(),
        ),
        ChartTable::new(
            TOP_FUNCTIONS_KEY,
            "Top Hot Functions",
            "Function",
            "Samples",
            context
                .top_functions
                .iter()
                .map(|f| ChartRow {
                    label: f.function_name.clone(),
                    value: f.sample_count as f64,
                })
                .collect(),
        ),
        ChartTable::new(
            BENCHMARKS_KEY,
            "Google Benchmark Results",
            "Benchmark",
            "CPU Time (ns)",
            context
                .benchmarks
                .iter()
                .map(|b| ChartRow {
                    label: b.name.clone(),
                    value: b.cpu_time_ns,
                })
                .collect(),
        ),
    ];

    if let Some(heap) = &context.heap {
        tables.push(ChartTable::new(
            HEAP_KEY,
            "Heap Allocation Over Time",
            "Snapshot",
            "Heap Size (Bytes)",
            heap.iter()
                .map(|s| ChartRow {
                    label: s.snapshot_index.to_string(),
                    value: s.heap_bytes as f64,
                })
                .collect(),
        ));
    }

    debug!(
        "Assembled document: {} flamegraph links, {} tables",
        flamegraph_links.len(),
        tables.len()
    );

    RenderableDocument {
        project_name: context.project_name.clone(),
        version: context.version.clone(),
        timestamp: context.generated_at.clone(),
        flamegraph_links,
        tables,
    }
}

/// Display label for a flamegraph file
///
/// `flamegraph-main.svg` becomes `main`. Names not following the convention
/// only lose what matches.
pub fn flamegraph_label(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let name = name.strip_prefix(FLAMEGRAPH_LABEL_PREFIX).unwrap_or(&name);
    let name = name.strip_suffix(FLAMEGRAPH_SUFFIX).unwrap_or(name);
    name.to_string()
}

/// Path of `target` relative to the directory `base`, with `/` separators
///
/// Both paths are expected to be absolute and normalised. When they share
/// no prefix at all (different drive on Windows) `target` is returned as is.
pub fn relative_link(target: &Path, base: &Path) -> String {
    let target_parts: Vec<Component> = target.components().collect();
    let base_parts: Vec<Component> = base.components().collect();

    let common = target_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();

    if common == 0 {
        return target.to_string_lossy().replace('\\', "/");
    }

    let ups = std::iter::repeat("..".to_string()).take(base_parts.len() - common);
    let downs = target_parts[common..]
        .iter()
        .map(|c| c.as_os_str().to_string_lossy().into_owned());

    ups.chain(downs).collect::<Vec<_>>().join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_flamegraph_label() {
        assert_eq!(
            flamegraph_label(Path::new("/x/flamegraph-cpu.svg")),
            "cpu"
        );
        assert_eq!(flamegraph_label(Path::new("/x/alloc.svg")), "alloc");
        assert_eq!(flamegraph_label(Path::new("/x/flamegraph-.svg")), "");
    }

    #[test]
    fn test_relative_link_sibling_trees() {
        let target = PathBuf::from("/data/prf/out/flamegraph/flamegraph-main.svg");
        let base = PathBuf::from("/dst/reports/v1");
        assert_eq!(
            relative_link(&target, &base),
            "../../../data/prf/out/flamegraph/flamegraph-main.svg"
        );
    }

    #[test]
    fn test_relative_link_inside_base() {
        let target = PathBuf::from("/dst/reports/v1/fg/a.svg");
        let base = PathBuf::from("/dst/reports/v1");
        assert_eq!(relative_link(&target, &base), "fg/a.svg");
    }
}
