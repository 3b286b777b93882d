//! Source connector contract.

use polars::prelude::DataFrame;

use crate::error::Result;

/// Fetches a named dataset from a relational store.
///
/// Implementations return the full table with a stable column order and fail
/// with a [`ConnectorError`](crate::ConnectorError) when the store is
/// unreachable or the dataset does not exist. Any retry policy belongs here,
/// not in the stages calling it.
pub trait SourceConnector: Send + Sync {
    /// Short description of where data comes from, for logs.
    fn location(&self) -> String;

    /// Fetches every row of `dataset_name`.
    fn fetch(&self, dataset_name: &str) -> Result<DataFrame>;
}
