//! Directory and file naming conventions for pipeline artifacts.
//!
//! Every artifact path is `<project root>/<ARTIFACTS_DIR>/...`, so one run's
//! outputs stay co-located under a single root.

/// Top-level artifact directory under the project root.
pub const ARTIFACTS_DIR: &str = "artifacts";

/// Data artifacts (raw and interim tables).
pub const DATA_DIR: &str = "data";
pub const RAW_DATA_DIR: &str = "raw";
pub const INTERIM_DATA_DIR: &str = "interim";

/// Report artifacts (validation and evaluation reports).
pub const REPORTS_DIR: &str = "reports";
pub const VALIDATION_REPORT_DIR: &str = "validation";

pub const DATA_INGESTION_RAW_FILE: &str = "raw_data.csv";
pub const DATA_INGESTION_DATA_FILE: &str = "ingested_data.csv";
pub const DATA_VALIDATION_REPORT: &str = "validation_report.json";

/// Schema file, relative to the project root.
pub const SCHEMA_FILE_PATH: &str = "settings/schema.yaml";

/// Optional settings file, relative to the project root.
pub const SETTINGS_FILE_PATH: &str = "settings/pipeline.toml";

/// Default relational source, relative to the project root.
pub const DATABASE_PATH: &str = "data/projects_db.sqlite";

pub const DEFAULT_DATASET_NAME: &str = "bank_churn";
pub const DEFAULT_TARGET_COLUMN: &str = "Exited";

/// Schema key listing the columns dropped during ingestion.
pub const INSIGNIFICANT_COLUMNS_KEY: &str = "insignificant_columns";
