use std::path::PathBuf;

use crate::constants::{DEFAULT_DATASET_NAME, DEFAULT_TARGET_COLUMN, SCHEMA_FILE_PATH};

/// Which dataset a run ingests and how it is described.
///
/// The dataset name and target column are parameters rather than constants so
/// the same pipeline serves both the bank-churn and hotel-booking datasets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSpec {
    /// Table name in the relational source.
    pub name: String,
    /// Label column expected to survive cleaning, when known.
    pub target_column: Option<String>,
    /// Schema file location (YAML).
    pub schema_file: PathBuf,
}

impl DatasetSpec {
    pub fn new(name: impl Into<String>, schema_file: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            target_column: None,
            schema_file: schema_file.into(),
        }
    }

    pub fn with_target_column(mut self, target_column: impl Into<String>) -> Self {
        self.target_column = Some(target_column.into());
        self
    }
}

impl Default for DatasetSpec {
    fn default() -> Self {
        Self::new(DEFAULT_DATASET_NAME, SCHEMA_FILE_PATH).with_target_column(DEFAULT_TARGET_COLUMN)
    }
}
