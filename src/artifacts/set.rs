//! Resolve the full set of inputs for one report run.
//!
//! The counter-stat and collapsed-stack files are required. Flamegraphs,
//! benchmark and heap data are optional and degrade to "absent".

use super::selector::{select_all, select_latest, ArtifactKind};
use crate::utils::config::ProjectConfig;
use crate::utils::error::ArtifactError;
use log::{debug, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Input files chosen for one report generation run
///
/// Chosen once per invocation and not modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactSet {
    pub counter_stat: PathBuf,
    pub collapsed_stack: PathBuf,

    /// Sorted by file name
    pub flamegraphs: Vec<PathBuf>,

    pub benchmark: Option<PathBuf>,
    pub heap: Option<PathBuf>,
}

/// Locate every input artifact under `data_root`
///
/// **Public** - main entry point for artifact resolution
///
/// # Arguments
/// * `config` - Project configuration (directory overrides)
/// * `data_root` - Base directory for relative config paths
/// * `include_heap` - Collect massif data when it is configured
///
/// # Errors
/// Only the required artifacts (counter-stat, collapsed-stack) can fail.
pub fn resolve_artifacts(
    config: &ProjectConfig,
    data_root: &Path,
    include_heap: bool,
) -> Result<ArtifactSet, ArtifactError> {
    let counter_stat = select_latest(
        &data_root.join(config.perf_stat_dir()),
        ArtifactKind::CounterStat,
    )?;

    let collapsed_stack = select_latest(
        &data_root.join(config.collapsed_dir()),
        ArtifactKind::CollapsedStack,
    )?;

    let flamegraph_dir = data_root.join(config.flamegraph_dir());
    let flamegraphs = select_all(&flamegraph_dir, ArtifactKind::Flamegraph).unwrap_or_else(|e| {
        warn!("No flamegraphs linked: {}", e);
        Vec::new()
    });

    let benchmark = resolve_optional(
        &data_root.join(config.benchmark_path()),
        ArtifactKind::Benchmark,
    );

    let heap = if include_heap {
        config
            .massif_path()
            .and_then(|p| resolve_optional(&data_root.join(p), ArtifactKind::HeapSnapshot))
    } else {
        None
    };

    let set = ArtifactSet {
        counter_stat,
        collapsed_stack,
        flamegraphs,
        benchmark,
        heap,
    };

    debug!("Resolved artifacts: {:?}", set);
    Ok(set)
}

/// Resolve an optional artifact location that may be a file or a directory
///
/// **Private** - directories select their newest matching file
fn resolve_optional(location: &Path, kind: ArtifactKind) -> Option<PathBuf> {
    if location.is_file() {
        return Some(location.to_path_buf());
    }

    if location.is_dir() {
        return select_latest(location, kind)
            .map_err(|e| warn!("Skipping {} data: {}", kind, e))
            .ok();
    }

    warn!(
        "Skipping {} data: {} does not exist",
        kind,
        location.display()
    );
    None
}
