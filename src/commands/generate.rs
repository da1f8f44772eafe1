//! Generate command implementation.
//!
//! The generate command:
//! 1. Loads the project configuration
//! 2. Selects the newest input artifacts
//! 3. Parses counters, stacks, benchmarks and heap data
//! 4. Resolves a fresh report directory
//! 5. Assembles and renders the report
//! 6. Writes the output files
//!
//! Every fatal input problem surfaces before step 4, so a failed run leaves
//! no report directory behind.

use super::models::GenerateArgs;
use crate::aggregator::{calculate_sample_distribution, StackAggregate};
use crate::artifacts::{resolve_artifacts, resolve_report_dir};
use crate::output::{write_report, write_report_data};
use crate::parser::{parse_benchmarks, parse_counter_stats, parse_heap_snapshots};
use crate::report::{assemble, render_document, ChartConfig, ReportContext, ReportTemplate};
use crate::utils::config::{
    load_config, ProjectConfig, MAX_TOP_N, REPORT_DATA_FILE_NAME, REPORT_TIMESTAMP_FORMAT,
};
use anyhow::{Context, Result};
use chrono::Local;
use log::{debug, info, warn};
use std::path::PathBuf;
use std::time::Instant;

/// Execute the generate command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// Absolute path of the written `report.html`
///
/// # Errors
/// * Unreadable or invalid configuration, missing data root
/// * Missing counter-stat or collapsed-stack artifacts
/// * Unreadable template, unwritable output directory
pub fn execute_generate(args: GenerateArgs) -> Result<PathBuf> {
    let start_time = Instant::now();

    info!("Generating report for version: {}", args.version);

    // Step 1: Configuration
    info!("Step 1/6: Loading configuration...");
    let config = match &args.config_path {
        Some(path) => load_config(path).context("Failed to load project configuration")?,
        None => {
            debug!("No config file given, using defaults");
            ProjectConfig::default()
        }
    };

    let data_root = config.data_root(args.data_root.as_deref())?;
    let data_root = std::fs::canonicalize(&data_root)
        .with_context(|| format!("Data root {} is not accessible", data_root.display()))?;
    debug!("Data root: {}", data_root.display());

    let template = match args.template_path.as_ref().or(config.template.as_ref()) {
        Some(path) => ReportTemplate::load(path).context("Failed to load report template")?,
        None => ReportTemplate::builtin(),
    };

    // Step 2: Artifacts
    info!("Step 2/6: Selecting input artifacts...");
    let include_heap = args.include_heap && config.massif_path().is_some();
    let artifacts = resolve_artifacts(&config, &data_root, include_heap)
        .context("Failed to locate required profiling artifacts")?;

    info!("Counter stats: {}", artifacts.counter_stat.display());
    info!("Collapsed stacks: {}", artifacts.collapsed_stack.display());

    // Step 3: Parsing
    info!("Step 3/6: Parsing profiling data...");
    let counter_stats = parse_counter_stats(&artifacts.counter_stat)
        .context("Failed to read counter-stat file")?;

    let aggregate = StackAggregate::from_file(&artifacts.collapsed_stack)
        .context("Failed to read collapsed-stack file")?;
    info!(
        "Sample distribution: {}",
        calculate_sample_distribution(&aggregate).summary()
    );
    let top_functions = aggregate.top_functions(args.top_n);

    let benchmarks = match &artifacts.benchmark {
        Some(path) => parse_benchmarks(path),
        None => Vec::new(),
    };

    let heap = if include_heap {
        Some(match &artifacts.heap {
            Some(path) => parse_heap_snapshots(path),
            None => Vec::new(),
        })
    } else {
        None
    };

    debug!(
        "Parsed {} counters, {} functions, {} benchmarks, {} heap snapshots",
        counter_stats.len(),
        top_functions.len(),
        benchmarks.len(),
        heap.as_ref().map_or(0, Vec::len)
    );

    // Step 4: Output directory
    info!("Step 4/6: Resolving report directory...");
    let base_dir = args.dst_root.join(config.report_output());
    let report_dir = resolve_report_dir(&base_dir, args.report_name())
        .context("Failed to create report directory")?;
    let report_dir = std::fs::canonicalize(&report_dir)
        .with_context(|| format!("Report directory {} vanished", report_dir.display()))?;

    // Step 5: Assemble and render
    info!("Step 5/6: Rendering report...");
    let context = ReportContext {
        project_name: config.project_name().to_string(),
        version: args.version.clone(),
        generated_at: Local::now().format(REPORT_TIMESTAMP_FORMAT).to_string(),
        report_dir: report_dir.clone(),
        artifacts,
        counter_stats,
        top_functions,
        benchmarks,
        heap,
    };

    let document = assemble(&context);
    let html = render_document(&template, &document, &ChartConfig::default());

    // Step 6: Write outputs
    info!("Step 6/6: Writing output files...");
    let report_path = write_report(&html, &report_dir).context("Failed to write report")?;

    if args.write_json {
        write_report_data(&document, report_dir.join(REPORT_DATA_FILE_NAME))
            .context("Failed to write report data JSON")?;
    }

    if document.tables.iter().any(|t| t.is_empty()) {
        warn!("Some report sections have no data");
    }

    let elapsed = start_time.elapsed();
    info!("Report generated in {:.2}s", elapsed.as_secs_f64());

    Ok(report_path)
}

/// Validate generate arguments
///
/// **Public** - can be called before execute_generate for early validation
pub fn validate_args(args: &GenerateArgs) -> Result<()> {
    if args.version.trim().is_empty() {
        anyhow::bail!("Version tag cannot be empty");
    }

    if args.dst_root.as_os_str().is_empty() {
        anyhow::bail!("Destination root cannot be empty");
    }

    let name = args.report_name();
    if name.trim().is_empty() {
        anyhow::bail!("Report name cannot be empty");
    }

    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        anyhow::bail!("Report name must be a single directory name, got '{}'", name);
    }

    if args.top_n == 0 {
        anyhow::bail!("top_n must be greater than 0");
    }

    if args.top_n > MAX_TOP_N {
        anyhow::bail!("top_n is too large (max {})", MAX_TOP_N);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_args() -> GenerateArgs {
        GenerateArgs {
            version: "v1.4.0".to_string(),
            dst_root: PathBuf::from("/tmp/out"),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_args_valid() {
        assert!(validate_args(&valid_args()).is_ok());
    }

    #[test]
    fn test_validate_args_empty_version() {
        let args = GenerateArgs {
            version: "  ".to_string(),
            ..valid_args()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_report_name_with_separator() {
        let args = GenerateArgs {
            report_name: Some("../escape".to_string()),
            ..valid_args()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_version_with_separator_used_as_name() {
        let args = GenerateArgs {
            version: "release/1.0".to_string(),
            ..valid_args()
        };
        assert!(validate_args(&args).is_err());

        let renamed = GenerateArgs {
            report_name: Some("release-1.0".to_string()),
            ..args
        };
        assert!(validate_args(&renamed).is_ok());
    }

    #[test]
    fn test_validate_args_top_n_bounds() {
        let zero = GenerateArgs {
            top_n: 0,
            ..valid_args()
        };
        assert!(validate_args(&zero).is_err());

        let huge = GenerateArgs {
            top_n: 2000,
            ..valid_args()
        };
        assert!(validate_args(&huge).is_err());
    }
}
