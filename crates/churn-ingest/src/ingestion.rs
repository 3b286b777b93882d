//! The data ingestion stage.
//!
//! Fetches the configured dataset, checkpoints it unchanged to the raw path,
//! drops the schema's insignificant columns and persists the result to the
//! interim path. Every failure is logged where it happens and returned as one
//! [`PipelineError`] tagged with the operation that failed.

use std::collections::BTreeSet;
use std::time::Instant;

use churn_io::{ArtifactStore, ConfigReader};
use churn_model::{
    DataIngestionArtifact, DataIngestionConfig, DatasetSpec, PipelineError, SchemaConfig,
    StageKind,
};
use polars::prelude::{DataFrame, PlSmallStr};
use tracing::{debug, error, info, warn};

use crate::connector::SourceConnector;
use crate::error::ConnectorError;
use crate::schema::load_schema;

const STAGE: StageKind = StageKind::DataIngestion;

/// Ingestion stage bound to its collaborators.
///
/// The schema is loaded once at construction, so a broken schema file fails
/// before anything is fetched.
pub struct DataIngestion<'a> {
    config: DataIngestionConfig,
    dataset: DatasetSpec,
    schema: SchemaConfig,
    connector: &'a dyn SourceConnector,
    store: &'a dyn ArtifactStore,
}

impl<'a> DataIngestion<'a> {
    pub fn new(
        config: DataIngestionConfig,
        dataset: DatasetSpec,
        connector: &'a dyn SourceConnector,
        reader: &dyn ConfigReader,
        store: &'a dyn ArtifactStore,
    ) -> Result<Self, PipelineError> {
        let schema = load_schema(reader, &dataset.schema_file)?;
        Ok(Self {
            config,
            dataset,
            schema,
            connector,
            store,
        })
    }

    pub fn config(&self) -> &DataIngestionConfig {
        &self.config
    }

    pub fn dataset(&self) -> &DatasetSpec {
        &self.dataset
    }

    pub fn schema(&self) -> &SchemaConfig {
        &self.schema
    }

    /// Fetches `dataset_name` and writes it unchanged to the raw checkpoint.
    pub fn export_raw(&self, dataset_name: &str) -> Result<DataFrame, PipelineError> {
        debug!(
            dataset = dataset_name,
            source = %self.connector.location(),
            "exporting dataset"
        );
        let mut df = self.connector.fetch(dataset_name).map_err(|e| {
            error!(dataset = dataset_name, error = %e, "failed to fetch dataset");
            PipelineError::connector(STAGE, "export_raw", e)
        })?;
        if df.width() == 0 || df.height() == 0 {
            error!(
                dataset = dataset_name,
                rows = df.height(),
                columns = df.width(),
                "fetched dataset is empty"
            );
            return Err(PipelineError::connector(
                STAGE,
                "export_raw",
                ConnectorError::EmptyDataset {
                    dataset: dataset_name.to_string(),
                },
            ));
        }

        let raw_path = self.config.raw_file_path();
        self.store.write_table(&mut df, raw_path).map_err(|e| {
            error!(path = %raw_path.display(), error = %e, "failed to write raw data");
            PipelineError::persistence(STAGE, "export_raw", e)
        })?;

        info!(
            dataset = dataset_name,
            path = %raw_path.display(),
            rows = df.height(),
            columns = df.width(),
            "raw data saved"
        );
        Ok(df)
    }

    /// Runs the stage and returns a pointer to the cleaned table.
    pub fn run(&self) -> Result<DataIngestionArtifact, PipelineError> {
        let start = Instant::now();
        info!(dataset = %self.dataset.name, "starting data ingestion");

        let raw = self.export_raw(&self.dataset.name)?;
        let mut cleaned = drop_insignificant_columns(&raw, &self.schema)?;
        self.check_target_column(&cleaned);

        let data_path = self.config.data_file_path();
        self.store.write_table(&mut cleaned, data_path).map_err(|e| {
            error!(path = %data_path.display(), error = %e, "failed to write interim data");
            PipelineError::persistence(STAGE, "run", e)
        })?;

        info!(
            path = %data_path.display(),
            rows = cleaned.height(),
            columns = cleaned.width(),
            duration_ms = start.elapsed().as_millis(),
            "data ingestion complete"
        );
        Ok(DataIngestionArtifact::new(data_path))
    }

    fn check_target_column(&self, cleaned: &DataFrame) {
        let Some(target) = self.dataset.target_column.as_deref() else {
            return;
        };
        if self
            .schema
            .insignificant_columns()
            .iter()
            .any(|name| name == target)
        {
            warn!(target_column = target, "target column is listed as insignificant");
        } else if cleaned.column(target).is_err() {
            warn!(target_column = target, "target column missing from ingested data");
        }
    }
}

/// Removes the schema's insignificant columns from `df`.
///
/// Names not present in the table are ignored. The remaining columns keep
/// their relative order. Dropping every column is an error, since an empty
/// table is not a usable artifact.
pub fn drop_insignificant_columns(
    df: &DataFrame,
    schema: &SchemaConfig,
) -> Result<DataFrame, PipelineError> {
    let drop: BTreeSet<&str> = schema
        .insignificant_columns()
        .iter()
        .map(String::as_str)
        .collect();
    if drop.is_empty() {
        return Ok(df.clone());
    }

    let kept: Vec<PlSmallStr> = df
        .get_column_names()
        .into_iter()
        .filter(|name| !drop.contains(name.as_str()))
        .cloned()
        .collect();
    let dropped = df.width() - kept.len();

    if kept.is_empty() {
        error!(columns = df.width(), "schema drops every column");
        return Err(PipelineError::step(
            STAGE,
            "drop_insignificant_columns",
            format!("all {} columns are listed as insignificant", df.width()),
        ));
    }

    let cleaned = df.select(kept).map_err(|e| {
        error!(error = %e, "failed to drop insignificant columns");
        PipelineError::step(STAGE, "drop_insignificant_columns", e)
    })?;

    debug!(
        dropped,
        ignored = drop.len() - dropped,
        remaining = cleaned.width(),
        "dropped insignificant columns"
    );
    Ok(cleaned)
}
