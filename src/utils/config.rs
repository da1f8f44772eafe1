//! Configuration and constants for the report pipeline.
//!
//! The project configuration is a JSON document. Two layouts are accepted:
//! flat `*_path` keys and a nested `paths` object. When both name the same
//! artifact the nested value wins.

use super::error::ConfigError;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Project name used when the config does not provide one
pub const DEFAULT_PROJECT_NAME: &str = "UnnamedProject";

/// Report output directory (relative to the destination root)
pub const DEFAULT_REPORT_OUTPUT: &str = "reports";

/// Number of hot functions shown in the report
pub const DEFAULT_TOP_N: usize = 15;
pub const MAX_TOP_N: usize = 1000;

// Default input locations, relative to the data root
pub const DEFAULT_PERF_STAT_DIR: &str = "prf/out/stat";
pub const DEFAULT_COLLAPSED_DIR: &str = "prf/out/collapsed";
pub const DEFAULT_FLAMEGRAPH_DIR: &str = "prf/out/flamegraph";
pub const DEFAULT_BENCHMARK_PATH: &str = "benchmarks/benchmark.json";

// Artifact naming conventions
pub const PERF_STAT_PREFIX: &str = "perf-stat";
pub const COLLAPSED_SUFFIX: &str = ".txt";
pub const FLAMEGRAPH_SUFFIX: &str = ".svg";
pub const FLAMEGRAPH_LABEL_PREFIX: &str = "flamegraph-";
pub const BENCHMARK_SUFFIX: &str = ".json";
pub const MASSIF_PREFIX: &str = "massif.out";

/// perf prints `<not counted>` / `<not supported>` for counters it could not sample
pub const NOT_COUNTED_MARKER: &str = "<not";

/// Key marking a heap-size sample in massif output
pub const MASSIF_HEAP_KEY: &str = "mem_heap_B";

pub const REPORT_FILE_NAME: &str = "report.html";
pub const REPORT_DATA_FILE_NAME: &str = "report.json";

/// Suffix appended to a colliding report directory name
pub const DIR_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Generation timestamp shown in the report header
pub const REPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Project configuration as read from JSON
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub project_name: Option<String>,

    #[serde(default)]
    pub project_root: Option<PathBuf>,

    #[serde(default)]
    pub data_root: Option<PathBuf>,

    #[serde(default)]
    pub report_output: Option<String>,

    #[serde(default)]
    pub perf_stat_path: Option<PathBuf>,

    #[serde(default)]
    pub collapsed_path: Option<PathBuf>,

    #[serde(default)]
    pub flamegraph_path: Option<PathBuf>,

    #[serde(default)]
    pub google_benchmark_path: Option<PathBuf>,

    #[serde(default)]
    pub valgrind_massif_path: Option<PathBuf>,

    /// Nested per-artifact overrides
    #[serde(default)]
    pub paths: Option<PathOverrides>,

    /// Optional HTML template replacing the built-in one
    #[serde(default)]
    pub template: Option<PathBuf>,
}

/// Nested `paths.*` section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathOverrides {
    #[serde(default)]
    pub perf_stat: Option<PathBuf>,

    #[serde(default)]
    pub collapsed: Option<PathBuf>,

    #[serde(default)]
    pub flamegraph: Option<PathBuf>,

    #[serde(default)]
    pub google_benchmark: Option<PathBuf>,

    #[serde(default)]
    pub valgrind_massif: Option<PathBuf>,

    #[serde(default)]
    pub report_output: Option<String>,
}

impl ProjectConfig {
    pub fn project_name(&self) -> &str {
        self.project_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(DEFAULT_PROJECT_NAME)
    }

    /// Base directory for all inputs
    ///
    /// The CLI override wins, then `data_root`, then `project_root`.
    pub fn data_root(&self, cli_override: Option<&Path>) -> Result<PathBuf, ConfigError> {
        let root = cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.data_root.clone())
            .or_else(|| self.project_root.clone())
            .ok_or(ConfigError::MissingDataRoot)?;

        Ok(expand_home(&root))
    }

    pub fn report_output(&self) -> &str {
        self.nested(|p| p.report_output.as_deref())
            .or(self.report_output.as_deref())
            .unwrap_or(DEFAULT_REPORT_OUTPUT)
    }

    pub fn perf_stat_dir(&self) -> PathBuf {
        self.nested(|p| p.perf_stat.as_deref())
            .or(self.perf_stat_path.as_deref())
            .map(expand_home)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PERF_STAT_DIR))
    }

    pub fn collapsed_dir(&self) -> PathBuf {
        self.nested(|p| p.collapsed.as_deref())
            .or(self.collapsed_path.as_deref())
            .map(expand_home)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_COLLAPSED_DIR))
    }

    pub fn flamegraph_dir(&self) -> PathBuf {
        self.nested(|p| p.flamegraph.as_deref())
            .or(self.flamegraph_path.as_deref())
            .map(expand_home)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FLAMEGRAPH_DIR))
    }

    pub fn benchmark_path(&self) -> PathBuf {
        self.nested(|p| p.google_benchmark.as_deref())
            .or(self.google_benchmark_path.as_deref())
            .map(expand_home)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BENCHMARK_PATH))
    }

    /// Heap data is only collected when a massif location is configured
    pub fn massif_path(&self) -> Option<PathBuf> {
        self.nested(|p| p.valgrind_massif.as_deref())
            .or(self.valgrind_massif_path.as_deref())
            .map(expand_home)
    }

    fn nested<'a, T: ?Sized>(
        &'a self,
        pick: impl Fn(&'a PathOverrides) -> Option<&'a T>,
    ) -> Option<&'a T> {
        self.paths.as_ref().and_then(pick)
    }
}

/// Load the project configuration from a JSON file
pub fn load_config(path: &Path) -> Result<ProjectConfig, ConfigError> {
    debug!("Loading config from: {}", path.display());

    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&raw).map_err(|source| ConfigError::Invalid {
        path: path.to_path_buf(),
        source,
    })
}

/// Expand a leading `~/` to `$HOME`
pub fn expand_home(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    path.to_path_buf()
}
