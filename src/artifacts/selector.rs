//! Pick input artifacts out of tool output directories.
//!
//! "Newest" means greatest modification time. Equal modification times are
//! broken by the lexicographically greatest file name, so the choice only
//! depends on the directory snapshot and never on listing order.

use crate::utils::config::{
    BENCHMARK_SUFFIX, COLLAPSED_SUFFIX, FLAMEGRAPH_SUFFIX, MASSIF_PREFIX, PERF_STAT_PREFIX,
};
use crate::utils::error::ArtifactError;
use log::debug;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Kinds of profiling artifacts and their naming conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// `perf-stat*`
    CounterStat,
    /// `*.txt`
    CollapsedStack,
    /// `*.svg`
    Flamegraph,
    /// `*.json`
    Benchmark,
    /// `massif.out*`
    HeapSnapshot,
}

impl ArtifactKind {
    /// Naming predicate for this kind
    pub fn matches(self, file_name: &str) -> bool {
        match self {
            ArtifactKind::CounterStat => file_name.starts_with(PERF_STAT_PREFIX),
            ArtifactKind::CollapsedStack => file_name.ends_with(COLLAPSED_SUFFIX),
            ArtifactKind::Flamegraph => file_name.ends_with(FLAMEGRAPH_SUFFIX),
            ArtifactKind::Benchmark => file_name.ends_with(BENCHMARK_SUFFIX),
            ArtifactKind::HeapSnapshot => file_name.starts_with(MASSIF_PREFIX),
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ArtifactKind::CounterStat => "perf-stat",
            ArtifactKind::CollapsedStack => "collapsed-stack",
            ArtifactKind::Flamegraph => "flamegraph",
            ArtifactKind::Benchmark => "benchmark",
            ArtifactKind::HeapSnapshot => "massif",
        };
        f.write_str(label)
    }
}

/// A directory entry that passed the naming predicate
struct Candidate {
    path: PathBuf,
    file_name: String,
    modified: SystemTime,
}

/// Select the newest artifact of `kind` in `dir`
///
/// **Public** - main entry point for artifact selection
///
/// # Errors
/// * `ArtifactError::NotFound` - no regular file matches
/// * `ArtifactError::UnreadableDir` - `dir` cannot be listed
pub fn select_latest(dir: &Path, kind: ArtifactKind) -> Result<PathBuf, ArtifactError> {
    select_latest_matching(dir, &kind.to_string(), |name| kind.matches(name))
}

/// Select the newest file in `dir` accepted by `predicate`
///
/// `description` names the artifact in the error message.
pub fn select_latest_matching(
    dir: &Path,
    description: &str,
    predicate: impl Fn(&str) -> bool,
) -> Result<PathBuf, ArtifactError> {
    let latest = list_candidates(dir, predicate)?
        .into_iter()
        .max_by(|a, b| {
            a.modified
                .cmp(&b.modified)
                .then_with(|| a.file_name.cmp(&b.file_name))
        })
        .ok_or_else(|| ArtifactError::NotFound {
            kind: description.to_string(),
            dir: dir.to_path_buf(),
        })?;

    debug!("Selected {} artifact: {}", description, latest.path.display());
    Ok(latest.path)
}

/// All artifacts of `kind` in `dir`, sorted by file name
pub fn select_all(dir: &Path, kind: ArtifactKind) -> Result<Vec<PathBuf>, ArtifactError> {
    let mut candidates = list_candidates(dir, |name| kind.matches(name))?;
    candidates.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(candidates.into_iter().map(|c| c.path).collect())
}

/// List regular files in `dir` whose UTF-8 name passes `predicate`
///
/// **Private** - entries that cannot be stat'ed are skipped
fn list_candidates(
    dir: &Path,
    predicate: impl Fn(&str) -> bool,
) -> Result<Vec<Candidate>, ArtifactError> {
    let unreadable = |source: std::io::Error| ArtifactError::UnreadableDir {
        dir: dir.to_path_buf(),
        source,
    };

    let mut candidates = Vec::new();

    for entry in std::fs::read_dir(dir).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;

        let Ok(file_name) = entry.file_name().into_string() else {
            continue;
        };
        if !predicate(&file_name) {
            continue;
        }

        let path = entry.path();
        // Follow symlinks so linked artifacts are treated like the real file
        let metadata = match std::fs::metadata(&path) {
            Ok(m) if m.is_file() => m,
            Ok(_) => continue,
            Err(e) => {
                debug!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };

        candidates.push(Candidate {
            path,
            file_name,
            modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
        });
    }

    Ok(candidates)
}
