//! YAML and JSON helpers for configuration files and reports.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::ensure_parent_dir;
use crate::error::{IoError, Result};

/// Reads and deserializes a YAML file.
///
/// An empty document deserializes from YAML `null`, so `Option<T>` or
/// `serde_yaml::Value` targets accept empty files.
pub fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path).map_err(|e| IoError::read(path, e))?;
    let document = if contents.trim().is_empty() {
        "null"
    } else {
        contents.as_str()
    };
    serde_yaml::from_str(document).map_err(|source| IoError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Serializes `value` as YAML, replacing any existing file.
pub fn write_yaml<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let contents = serde_yaml::to_string(value).map_err(|source| IoError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;
    ensure_parent_dir(path)?;
    fs::write(path, contents).map_err(|e| IoError::write(path, e))
}

/// Reads and deserializes a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path).map_err(|e| IoError::read(path, e))?;
    serde_json::from_str(&contents).map_err(|source| IoError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Serializes `value` as pretty JSON, replacing any existing file.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|source| IoError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    ensure_parent_dir(path)?;
    fs::write(path, format!("{json}\n")).map_err(|e| IoError::write(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[test]
    fn test_yaml_round_trip_through_nested_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings").join("schema.yaml");
        let mut value = BTreeMap::new();
        value.insert("insignificant_columns".to_string(), vec!["RowNumber"]);

        write_yaml(&path, &value).unwrap();
        let loaded: BTreeMap<String, Vec<String>> = read_yaml(&path).unwrap();

        assert_eq!(loaded["insignificant_columns"], vec!["RowNumber"]);
    }

    #[test]
    fn test_empty_yaml_is_null() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.yaml");
        fs::write(&path, "").unwrap();

        let value: serde_yaml::Value = read_yaml(&path).unwrap();
        assert!(value.is_null());
    }

    #[test]
    fn test_invalid_yaml_names_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.yaml");
        fs::write(&path, "key: [unclosed").unwrap();

        let err = read_yaml::<serde_yaml::Value>(&path).unwrap_err();
        assert!(matches!(err, IoError::Yaml { .. }));
        assert!(err.to_string().contains("broken.yaml"));
    }

    #[test]
    fn test_write_json_replaces_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        write_json(&path, &serde_json::json!({"status": false, "extra": 1})).unwrap();
        write_json(&path, &serde_json::json!({"status": true})).unwrap();

        let loaded: serde_json::Value = read_json(&path).unwrap();
        assert_eq!(loaded, serde_json::json!({"status": true}));
    }
}
