//! CSV persistence for tabular artifacts.
//!
//! Files are written with a header row, comma separator and no index column.
//! Writing always truncates, so re-running a stage replaces the previous
//! artifact instead of appending to it.

use std::fs::File;
use std::path::Path;

use polars::prelude::*;
use tracing::debug;

use crate::ensure_parent_dir;
use crate::error::{IoError, Result};

/// Reads a CSV artifact into a Polars DataFrame.
pub fn read_csv(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IoError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IoError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "read csv"
    );
    Ok(df)
}

/// Writes a DataFrame to `path`, creating parent directories as needed.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut file = File::create(path).map_err(|e| IoError::write(path, e))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .finish(df)
        .map_err(|e| IoError::CsvWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "wrote csv"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_df() -> DataFrame {
        polars::df!(
            "id" => [1i64, 2, 3],
            "age" => [42i64, 35, 51],
            "Exited" => [0i64, 1, 0],
        )
        .unwrap()
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("table.csv");
        let mut df = sample_df();

        write_csv(&mut df, &path).unwrap();

        assert!(path.is_file());
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().next(), Some("id,age,Exited"));
        assert_eq!(contents.lines().count(), 4);
    }

    #[test]
    fn test_read_back_keeps_columns_and_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("table.csv");
        let mut df = sample_df();
        write_csv(&mut df, &path).unwrap();

        let loaded = read_csv(&path).unwrap();

        let names: Vec<&str> = loaded
            .get_column_names()
            .into_iter()
            .map(|name| name.as_str())
            .collect();
        assert_eq!(names, vec!["id", "age", "Exited"]);
        assert_eq!(loaded.height(), 3);
    }

    #[test]
    fn test_write_truncates_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("table.csv");
        let mut first = sample_df();
        write_csv(&mut first, &path).unwrap();

        let mut second = polars::df!("id" => [9i64]).unwrap();
        write_csv(&mut second, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "id\n9\n");
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_csv(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, IoError::FileNotFound { .. }));
    }
}
