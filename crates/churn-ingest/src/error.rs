//! Errors raised by source connectors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while fetching a dataset from a relational source.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// Could not open the database.
    #[error("failed to open database {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Dataset name cannot be used as a table identifier.
    #[error("invalid dataset name '{dataset}'")]
    InvalidDatasetName { dataset: String },

    /// No table or view with this name exists.
    #[error("dataset '{dataset}' not found in {location}")]
    DatasetNotFound { dataset: String, location: String },

    /// The query failed after the connection was established.
    #[error("failed to query dataset '{dataset}': {source}")]
    Query {
        dataset: String,
        #[source]
        source: rusqlite::Error,
    },

    /// The dataset has no rows or no columns.
    #[error("dataset '{dataset}' is empty")]
    EmptyDataset { dataset: String },

    /// The fetched rows could not be assembled into a DataFrame.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for ConnectorError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for connector operations.
pub type Result<T> = std::result::Result<T, ConnectorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConnectorError::DatasetNotFound {
            dataset: "bank_churn".to_string(),
            location: "data/projects_db.sqlite".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "dataset 'bank_churn' not found in data/projects_db.sqlite"
        );
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("test".into());
        let err: ConnectorError = polars_err.into();
        assert!(matches!(err, ConnectorError::DataFrame { .. }));
    }
}
