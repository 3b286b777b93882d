//! Artifacts produced during a run.

use std::path::Path;

use churn_model::{DataIngestionArtifact, DataValidationArtifact, PipelineError, StageKind};

/// The record a stage hands to its successors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    Ingestion(DataIngestionArtifact),
    Validation(DataValidationArtifact),
}

impl Artifact {
    /// The file this artifact points at.
    pub fn path(&self) -> &Path {
        match self {
            Artifact::Ingestion(artifact) => artifact.data_file_path(),
            Artifact::Validation(artifact) => artifact.validation_report_file_path(),
        }
    }
}

impl From<DataIngestionArtifact> for Artifact {
    fn from(artifact: DataIngestionArtifact) -> Self {
        Artifact::Ingestion(artifact)
    }
}

impl From<DataValidationArtifact> for Artifact {
    fn from(artifact: DataValidationArtifact) -> Self {
        Artifact::Validation(artifact)
    }
}

/// Artifacts recorded so far, at most one per kind.
///
/// Stages only ever see this set by shared reference, so a predecessor's
/// artifact cannot be changed by a later stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactSet {
    ingestion: Option<DataIngestionArtifact>,
    validation: Option<DataValidationArtifact>,
}

impl ArtifactSet {
    /// Records `artifact`, replacing an earlier one of the same kind.
    pub fn record(&mut self, artifact: Artifact) {
        match artifact {
            Artifact::Ingestion(artifact) => self.ingestion = Some(artifact),
            Artifact::Validation(artifact) => self.validation = Some(artifact),
        }
    }

    pub fn ingestion(&self) -> Option<&DataIngestionArtifact> {
        self.ingestion.as_ref()
    }

    pub fn validation(&self) -> Option<&DataValidationArtifact> {
        self.validation.as_ref()
    }

    /// The ingestion artifact `stage` depends on.
    pub fn require_ingestion(&self, stage: StageKind) -> Result<&DataIngestionArtifact, PipelineError> {
        self.ingestion.as_ref().ok_or_else(|| {
            PipelineError::step(stage, "require_ingestion", "no ingestion artifact recorded")
        })
    }

    pub fn is_empty(&self) -> bool {
        self.ingestion.is_none() && self.validation.is_none()
    }
}
