//! Output writers for the report.
//!
//! This module handles writing data to disk:
//! - The HTML report (written once, atomically)
//! - The optional JSON copy of the assembled document

pub mod html;
pub mod json;

// Re-export main functions
pub use html::write_report;
pub use json::{read_report_data, write_report_data};

use crate::utils::error::OutputError;
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
