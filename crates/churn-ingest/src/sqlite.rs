//! `SQLite`-backed [`SourceConnector`].
//!
//! The connection is opened read-only on each fetch, so the connector holds no
//! handle between runs and stays `Send + Sync` without a lock.

use std::path::{Path, PathBuf};

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use tracing::{debug, info, warn};

use crate::connector::SourceConnector;
use crate::error::{ConnectorError, Result};

/// Reads whole tables from a `SQLite` database file.
#[derive(Debug, Clone)]
pub struct SqliteConnector {
    path: PathBuf,
}

impl SqliteConnector {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<Connection> {
        Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|source| ConnectorError::Open {
            path: self.path.clone(),
            source,
        })
    }
}

impl SourceConnector for SqliteConnector {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self, dataset_name: &str) -> Result<DataFrame> {
        if dataset_name.trim().is_empty() || dataset_name.contains('\0') {
            return Err(ConnectorError::InvalidDatasetName {
                dataset: dataset_name.to_string(),
            });
        }

        let conn = self.open()?;
        if !dataset_exists(&conn, dataset_name)? {
            return Err(ConnectorError::DatasetNotFound {
                dataset: dataset_name.to_string(),
                location: self.location(),
            });
        }

        let query_err = |source| ConnectorError::Query {
            dataset: dataset_name.to_string(),
            source,
        };
        let sql = format!("SELECT * FROM {}", quote_identifier(dataset_name));
        let mut stmt = conn.prepare(&sql).map_err(query_err)?;
        let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let mut buffers: Vec<ColumnBuffer> = names.iter().map(|_| ColumnBuffer::default()).collect();

        let mut rows = stmt.query([]).map_err(query_err)?;
        while let Some(row) = rows.next().map_err(query_err)? {
            for (idx, buffer) in buffers.iter_mut().enumerate() {
                let value = row.get_ref(idx).map_err(query_err)?;
                buffer.push(value);
            }
        }

        let height = buffers.first().map_or(0, |b| b.cells.len());
        if names.is_empty() || height == 0 {
            return Err(ConnectorError::EmptyDataset {
                dataset: dataset_name.to_string(),
            });
        }

        let columns: Vec<Column> = names
            .iter()
            .zip(buffers)
            .map(|(name, buffer)| buffer.into_column(name))
            .collect();
        let df = DataFrame::new(columns)?;

        info!(
            dataset = dataset_name,
            location = %self.path.display(),
            rows = df.height(),
            columns = df.width(),
            "fetched dataset"
        );
        Ok(df)
    }
}

fn dataset_exists(conn: &Connection, dataset_name: &str) -> Result<bool> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1",
            [dataset_name],
            |row| row.get(0),
        )
        .map_err(|source| ConnectorError::Query {
            dataset: dataset_name.to_string(),
            source,
        })?;
    Ok(count > 0)
}

/// Wraps a name in double quotes, doubling any embedded quote.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Cell {
    fn as_text(&self) -> Option<String> {
        match self {
            Cell::Null => None,
            Cell::Integer(v) => Some(v.to_string()),
            Cell::Real(v) => Some(v.to_string()),
            Cell::Text(v) => Some(v.clone()),
        }
    }
}

/// Values of one result column, plus the narrowest type that holds them all.
#[derive(Debug, Default)]
struct ColumnBuffer {
    cells: Vec<Cell>,
    has_real: bool,
    has_text: bool,
    has_blob: bool,
}

impl ColumnBuffer {
    fn push(&mut self, value: ValueRef<'_>) {
        let cell = match value {
            ValueRef::Null => Cell::Null,
            ValueRef::Integer(v) => Cell::Integer(v),
            ValueRef::Real(v) => {
                self.has_real = true;
                Cell::Real(v)
            }
            ValueRef::Text(bytes) => {
                self.has_text = true;
                Cell::Text(String::from_utf8_lossy(bytes).into_owned())
            }
            ValueRef::Blob(bytes) => {
                self.has_text = true;
                self.has_blob = true;
                Cell::Text(String::from_utf8_lossy(bytes).into_owned())
            }
        };
        self.cells.push(cell);
    }

    fn has_values(&self) -> bool {
        self.cells.iter().any(|cell| *cell != Cell::Null)
    }

    /// Integers stay `Int64`, any real widens to `Float64`, any text (or an
    /// all-null column) falls back to `String`.
    fn into_column(self, name: &str) -> Column {
        if self.has_blob {
            warn!(
                column = name,
                "blob values read as lossy UTF-8 text; binary content may not survive"
            );
        }
        let series = if self.has_text || !self.has_values() {
            let values: Vec<Option<String>> = self.cells.iter().map(Cell::as_text).collect();
            Series::new(name.into(), values)
        } else if self.has_real {
            let values: Vec<Option<f64>> = self
                .cells
                .iter()
                .map(|cell| match cell {
                    Cell::Integer(v) => Some(*v as f64),
                    Cell::Real(v) => Some(*v),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values)
        } else {
            let values: Vec<Option<i64>> = self
                .cells
                .iter()
                .map(|cell| match cell {
                    Cell::Integer(v) => Some(*v),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values)
        };
        debug!(column = name, dtype = %series.dtype(), "built column");
        series.into_column()
    }
}
