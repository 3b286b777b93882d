//! Schema file loading.

use std::path::Path;

use churn_io::ConfigReader;
use churn_model::{PipelineError, SchemaConfig, StageKind};
use tracing::{debug, error};

/// Reads and parses the dataset schema through `reader`.
///
/// An empty document yields the default schema (nothing to drop). A missing
/// file, malformed YAML, or a key with the wrong shape is a schema error.
pub fn load_schema(reader: &dyn ConfigReader, path: &Path) -> Result<SchemaConfig, PipelineError> {
    let value = reader.read_config(path).map_err(|e| {
        error!(path = %path.display(), error = %e, "failed to read schema");
        PipelineError::schema(StageKind::DataIngestion, "load_schema", e)
    })?;

    if value.is_null() {
        debug!(path = %path.display(), "schema file is empty");
        return Ok(SchemaConfig::default());
    }

    let schema: SchemaConfig = serde_yaml::from_value(value).map_err(|e| {
        error!(path = %path.display(), error = %e, "schema has unexpected shape");
        PipelineError::schema(StageKind::DataIngestion, "load_schema", e)
    })?;

    debug!(
        path = %path.display(),
        insignificant_columns = schema.insignificant_columns().len(),
        "loaded schema"
    );
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use churn_io::FsConfigReader;
    use std::fs;
    use tempfile::TempDir;

    fn load(contents: &str) -> Result<SchemaConfig, PipelineError> {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("schema.yaml");
        fs::write(&path, contents).unwrap();
        load_schema(&FsConfigReader, &path)
    }

    #[test]
    fn test_reads_insignificant_columns() {
        let schema = load("insignificant_columns:\n  - RowNumber\n  - Surname\n").unwrap();
        assert_eq!(schema.insignificant_columns(), ["RowNumber", "Surname"]);
    }

    #[test]
    fn test_missing_key_means_nothing_to_drop() {
        let schema = load("columns:\n  - id: int\n").unwrap();
        assert!(!schema.declares_insignificant_columns());
        assert!(schema.insignificant_columns().is_empty());
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(load("").unwrap(), SchemaConfig::default());
    }

    #[test]
    fn test_wrong_shape_is_schema_error() {
        let err = load("insignificant_columns: 42\n").unwrap_err();
        assert!(matches!(err, PipelineError::Schema { .. }));
        assert_eq!(err.operation(), Some("load_schema"));
    }

    #[test]
    fn test_missing_file_is_schema_error() {
        let dir = TempDir::new().unwrap();
        let err = load_schema(&FsConfigReader, &dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, PipelineError::Schema { .. }));
        assert_eq!(err.stage(), StageKind::DataIngestion);
    }
}
