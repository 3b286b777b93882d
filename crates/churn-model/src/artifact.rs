//! Immutable records describing what a stage produced.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArtifactError {
    #[error("a failed validation must carry a non-empty message")]
    MissingFailureMessage,
}

/// Output of the ingestion stage: the cleaned table on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataIngestionArtifact {
    data_file_path: PathBuf,
}

impl DataIngestionArtifact {
    pub fn new(data_file_path: impl Into<PathBuf>) -> Self {
        Self {
            data_file_path: data_file_path.into(),
        }
    }

    pub fn data_file_path(&self) -> &Path {
        &self.data_file_path
    }
}

/// Output of the validation stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataValidationArtifact {
    validation_status: bool,
    message: String,
    validation_report_file_path: PathBuf,
}

impl DataValidationArtifact {
    /// Build a validation record.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::MissingFailureMessage`] when `validation_status`
    /// is false and `message` is blank.
    pub fn new(
        validation_status: bool,
        message: impl Into<String>,
        validation_report_file_path: impl Into<PathBuf>,
    ) -> Result<Self, ArtifactError> {
        let message = message.into();
        if !validation_status && message.trim().is_empty() {
            return Err(ArtifactError::MissingFailureMessage);
        }
        Ok(Self {
            validation_status,
            message,
            validation_report_file_path: validation_report_file_path.into(),
        })
    }

    pub fn validation_status(&self) -> bool {
        self.validation_status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn validation_report_file_path(&self) -> &Path {
        &self.validation_report_file_path
    }
}
