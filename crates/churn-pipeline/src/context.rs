//! Run-wide context shared by every stage.
//!
//! The context owns the collaborators (source connector, config reader,
//! artifact store) and the dataset description. Stage configs are derived from
//! the project root on demand, so every path of a run hangs off one root.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use churn_ingest::SourceConnector;
use churn_io::{ArtifactStore, ConfigReader, FsArtifactStore, FsConfigReader};
use churn_model::{DataIngestionConfig, DataValidationConfig, DatasetSpec};

/// Collaborators and settings for one pipeline run.
#[derive(Clone)]
pub struct PipelineContext {
    project_root: PathBuf,
    dataset: DatasetSpec,
    connector: Arc<dyn SourceConnector>,
    config_reader: Arc<dyn ConfigReader>,
    artifact_store: Arc<dyn ArtifactStore>,
}

impl PipelineContext {
    /// Creates a context reading config and writing artifacts on the local
    /// filesystem.
    pub fn new(
        project_root: impl Into<PathBuf>,
        dataset: DatasetSpec,
        connector: Arc<dyn SourceConnector>,
    ) -> Self {
        Self {
            project_root: project_root.into(),
            dataset,
            connector,
            config_reader: Arc::new(FsConfigReader),
            artifact_store: Arc::new(FsArtifactStore),
        }
    }

    /// Replaces the config reader (e.g. with a `CachedConfigReader`).
    pub fn with_config_reader(mut self, config_reader: Arc<dyn ConfigReader>) -> Self {
        self.config_reader = config_reader;
        self
    }

    /// Replaces the artifact store.
    pub fn with_artifact_store(mut self, artifact_store: Arc<dyn ArtifactStore>) -> Self {
        self.artifact_store = artifact_store;
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn dataset(&self) -> &DatasetSpec {
        &self.dataset
    }

    pub fn connector(&self) -> &dyn SourceConnector {
        self.connector.as_ref()
    }

    pub fn config_reader(&self) -> &dyn ConfigReader {
        self.config_reader.as_ref()
    }

    pub fn artifact_store(&self) -> &dyn ArtifactStore {
        self.artifact_store.as_ref()
    }

    pub fn ingestion_config(&self) -> DataIngestionConfig {
        DataIngestionConfig::new(&self.project_root)
    }

    pub fn validation_config(&self) -> DataValidationConfig {
        DataValidationConfig::new(&self.project_root)
    }
}

impl fmt::Debug for PipelineContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineContext")
            .field("project_root", &self.project_root)
            .field("dataset", &self.dataset)
            .field("source", &self.connector.location())
            .finish_non_exhaustive()
    }
}
