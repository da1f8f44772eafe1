use crate::utils::config::DEFAULT_TOP_N;
use std::path::PathBuf;

/// Arguments for the generate command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    /// Release tag shown in the report
    pub version: String,

    /// Destination root; reports go to `<dst_root>/<report_output>/<name>`
    pub dst_root: PathBuf,

    /// Report directory name (defaults to the version tag)
    pub report_name: Option<String>,

    /// Project configuration JSON (defaults apply when absent)
    pub config_path: Option<PathBuf>,

    /// Overrides `data_root`/`project_root` from the config
    pub data_root: Option<PathBuf>,

    /// Overrides the config `template` and the built-in template
    pub template_path: Option<PathBuf>,

    /// Number of hot functions to include
    pub top_n: usize,

    /// Collect massif heap data when configured
    pub include_heap: bool,

    /// Also write `report.json`
    pub write_json: bool,
}

impl Default for GenerateArgs {
    fn default() -> Self {
        Self {
            version: String::new(),
            dst_root: PathBuf::from("."),
            report_name: None,
            config_path: None,
            data_root: None,
            template_path: None,
            top_n: DEFAULT_TOP_N,
            include_heap: true,
            write_json: false,
        }
    }
}

impl GenerateArgs {
    /// Directory name for this report
    pub fn report_name(&self) -> &str {
        self.report_name.as_deref().unwrap_or(&self.version)
    }
}
