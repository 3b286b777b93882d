//! Error types for artifact and config I/O.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing pipeline files.
#[derive(Debug, Error)]
pub enum IoError {
    // === File System Errors ===
    /// File does not exist.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to create a parent directory.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file.
    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Tabular Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Failed to serialize a DataFrame as CSV.
    #[error("failed to write CSV {path}: {message}")]
    CsvWrite { path: PathBuf, message: String },

    // === Structured Errors ===
    /// YAML could not be parsed or produced.
    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// JSON could not be parsed or produced.
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // === Object Errors ===
    /// Stored object was written by an incompatible format version.
    #[error("unsupported object format version {found} in {path} (expected {expected})")]
    ObjectVersion {
        path: PathBuf,
        found: u32,
        expected: u32,
    },

    /// Stored object holds a different type than requested.
    #[error("object in {path} has kind '{found}', expected '{expected}'")]
    ObjectKind {
        path: PathBuf,
        found: String,
        expected: String,
    },
}

impl IoError {
    /// Map a read failure, distinguishing a missing file.
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::FileRead { path, source }
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }
}

/// Result type for I/O operations.
pub type Result<T> = std::result::Result<T, IoError>;
