//! Data ingestion for the churn pipeline.
//!
//! - [`SourceConnector`]: fetches a named dataset as a DataFrame
//! - [`SqliteConnector`]: the connector used by the binary
//! - [`load_schema`]: reads the dataset schema through a `ConfigReader`
//! - [`DataIngestion`]: the stage itself

pub mod connector;
pub mod error;
pub mod ingestion;
pub mod schema;
pub mod sqlite;

pub use connector::SourceConnector;
pub use error::ConnectorError;
pub use ingestion::{DataIngestion, drop_insignificant_columns};
pub use schema::load_schema;
pub use sqlite::{SqliteConnector, quote_identifier};
