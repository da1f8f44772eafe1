//! JSON copy of the assembled report.
//!
//! Lets CI jobs consume the same tables the HTML shows without scraping it.

use crate::report::model::RenderableDocument;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write the assembled document to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path is empty or a directory
pub fn write_report_data(
    document: &RenderableDocument,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing report data to: {}", output_path.display());

    super::validate_path(output_path)?;

    let file = File::create(output_path).map_err(|source| OutputError::WriteFailed {
        path: output_path.to_path_buf(),
        source,
    })?;

    let mut writer = BufWriter::new(file);

    // Serialize to JSON with pretty printing
    serde_json::to_writer_pretty(&mut writer, document)
        .map_err(OutputError::SerializationFailed)?;

    // Surface a failed final flush instead of losing it on drop
    writer.flush().map_err(|source| OutputError::WriteFailed {
        path: output_path.to_path_buf(),
        source,
    })?;

    info!(
        "Report data written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Read an assembled document back from JSON
///
/// **Public** - useful for tooling and tests
pub fn read_report_data(input_path: impl AsRef<Path>) -> Result<RenderableDocument, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading report data from: {}", input_path.display());

    let file = File::open(input_path).map_err(|source| OutputError::WriteFailed {
        path: input_path.to_path_buf(),
        source,
    })?;

    let document: RenderableDocument =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Report data loaded: {} {} ({} tables)",
        document.project_name,
        document.version,
        document.tables.len()
    );

    Ok(document)
}
