//! Resolved path bundles for each stage.
//!
//! Both configs are derived once per run from the project root and the naming
//! constants in [`crate::constants`]; they carry no behavior.

use std::path::{Path, PathBuf};

use crate::constants::{
    ARTIFACTS_DIR, DATA_DIR, DATA_INGESTION_DATA_FILE, DATA_INGESTION_RAW_FILE,
    DATA_VALIDATION_REPORT, INTERIM_DATA_DIR, RAW_DATA_DIR, REPORTS_DIR, VALIDATION_REPORT_DIR,
};

/// Paths used by the ingestion stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataIngestionConfig {
    raw_data_dir: PathBuf,
    interim_data_dir: PathBuf,
    raw_file_path: PathBuf,
    data_file_path: PathBuf,
}

impl DataIngestionConfig {
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        let data_root = project_root.as_ref().join(ARTIFACTS_DIR).join(DATA_DIR);
        let raw_data_dir = data_root.join(RAW_DATA_DIR);
        let interim_data_dir = data_root.join(INTERIM_DATA_DIR);
        Self {
            raw_file_path: raw_data_dir.join(DATA_INGESTION_RAW_FILE),
            data_file_path: interim_data_dir.join(DATA_INGESTION_DATA_FILE),
            raw_data_dir,
            interim_data_dir,
        }
    }

    pub fn raw_data_dir(&self) -> &Path {
        &self.raw_data_dir
    }

    pub fn interim_data_dir(&self) -> &Path {
        &self.interim_data_dir
    }

    /// Raw checkpoint written before any cleaning.
    pub fn raw_file_path(&self) -> &Path {
        &self.raw_file_path
    }

    /// Cleaned (interim) table handed to the next stage.
    pub fn data_file_path(&self) -> &Path {
        &self.data_file_path
    }
}

/// Paths used by the validation stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataValidationConfig {
    validation_report_dir: PathBuf,
    validation_report_file_path: PathBuf,
}

impl DataValidationConfig {
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        let validation_report_dir = project_root
            .as_ref()
            .join(ARTIFACTS_DIR)
            .join(REPORTS_DIR)
            .join(VALIDATION_REPORT_DIR);
        Self {
            validation_report_file_path: validation_report_dir.join(DATA_VALIDATION_REPORT),
            validation_report_dir,
        }
    }

    pub fn validation_report_dir(&self) -> &Path {
        &self.validation_report_dir
    }

    pub fn validation_report_file_path(&self) -> &Path {
        &self.validation_report_file_path
    }
}
