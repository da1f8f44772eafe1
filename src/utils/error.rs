//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.
//!
//! Malformed individual input lines are never represented here: parsers
//! recover from them inline and keep going.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the project configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON in {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No data root configured (set `data_root`/`project_root` or pass --data)")]
    MissingDataRoot,
}

/// Errors that can occur while locating input artifacts
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("No {kind} artifact found in {dir}")]
    NotFound { kind: String, dir: PathBuf },

    #[error("Cannot list artifact directory {dir}: {source}")]
    UnreadableDir {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while reading a required input file
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while loading the HTML template
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Cannot read template {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template is missing required placeholder {{{{{0}}}}}")]
    MissingPlaceholder(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
