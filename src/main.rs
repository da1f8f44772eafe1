//! Perf Report CLI
//!
//! Builds an HTML performance report from the newest profiling artifacts.
//! On success the only thing printed to stdout is the report path.

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;

use perf_report::commands::{execute_generate, validate_args, GenerateArgs};
use perf_report::utils::config::DEFAULT_TOP_N;

/// Perf Report - release performance reports from profiling artifacts
#[derive(Parser, Debug)]
#[command(name = "perf-report")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Release tag shown in the report
    #[arg(short = 'v', long = "ver", value_name = "TAG")]
    version_tag: String,

    /// Destination root (reports land in <DST>/<report_output>/<name>)
    #[arg(short = 't', long)]
    dst: PathBuf,

    /// Report directory name (defaults to the release tag)
    #[arg(short = 'n', long)]
    report_name: Option<String>,

    /// Project configuration JSON
    #[arg(short, long, env = "PERF_REPORT_CONFIG")]
    config: Option<PathBuf>,

    /// Data root containing the profiling outputs (overrides the config)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// HTML template replacing the built-in one
    #[arg(long)]
    template: Option<PathBuf>,

    /// Number of hot functions to include
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    top_n: usize,

    /// Skip massif heap data even when configured
    #[arg(long)]
    no_heap: bool,

    /// Also write report.json next to report.html
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging (stderr only; stdout carries the report path)
    let log_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let args = GenerateArgs {
        version: cli.version_tag,
        dst_root: cli.dst,
        report_name: cli.report_name,
        config_path: cli.config,
        data_root: cli.data,
        template_path: cli.template,
        top_n: cli.top_n,
        include_heap: !cli.no_heap,
        write_json: cli.json,
    };

    // Validate args first
    validate_args(&args)?;

    let report_path = execute_generate(args)?;

    println!("{}", report_path.display());

    Ok(())
}
