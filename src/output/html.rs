//! HTML report writer.
//!
//! The document is written to a temporary file inside the report directory
//! and then renamed over `report.html`, so an interrupted run never leaves a
//! truncated report behind.

use crate::utils::config::REPORT_FILE_NAME;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Write the rendered report into `report_dir`
///
/// **Public** - main entry point for HTML output
///
/// # Returns
/// Path of the written `report.html`
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write or rename
/// * `OutputError::InvalidPath` - `report.html` exists as a directory
pub fn write_report(html: &str, report_dir: &Path) -> Result<PathBuf, OutputError> {
    let output_path = report_dir.join(REPORT_FILE_NAME);

    info!("Writing report to: {}", output_path.display());

    super::validate_path(&output_path)?;

    let write_failed = |source: std::io::Error| OutputError::WriteFailed {
        path: output_path.clone(),
        source,
    };

    let mut staged = NamedTempFile::new_in(report_dir).map_err(write_failed)?;
    debug!("Staging report in: {}", staged.path().display());

    // Temp files are created owner-only; a published report should not be
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        staged
            .as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .map_err(write_failed)?;
    }

    staged.write_all(html.as_bytes()).map_err(write_failed)?;
    staged.flush().map_err(write_failed)?;

    staged
        .persist(&output_path)
        .map_err(|e| write_failed(e.error))?;

    info!(
        "Report written successfully ({} bytes, {:.2} KB)",
        html.len(),
        html.len() as f64 / 1024.0
    );

    Ok(output_path)
}
