//! Stage contract and the stages the pipeline knows about.

use churn_ingest::DataIngestion;
use churn_model::{PipelineError, StageKind};
use tracing::error;

use crate::artifacts::{Artifact, ArtifactSet};
use crate::context::PipelineContext;

/// One step of the pipeline.
///
/// A stage reads its configuration from the context, consumes predecessor
/// artifacts from `inputs`, persists its own output and returns the record
/// describing it.
pub trait Stage {
    fn kind(&self) -> StageKind;

    fn run(&self, ctx: &PipelineContext, inputs: &ArtifactSet) -> Result<Artifact, PipelineError>;
}

/// Pulls the dataset from the source and writes raw and interim tables.
#[derive(Debug, Default, Clone, Copy)]
pub struct IngestionStage;

impl Stage for IngestionStage {
    fn kind(&self) -> StageKind {
        StageKind::DataIngestion
    }

    fn run(&self, ctx: &PipelineContext, _inputs: &ArtifactSet) -> Result<Artifact, PipelineError> {
        let ingestion = DataIngestion::new(
            ctx.ingestion_config(),
            ctx.dataset().clone(),
            ctx.connector(),
            ctx.config_reader(),
            ctx.artifact_store(),
        )?;
        ingestion.run().map(Artifact::Ingestion)
    }
}

/// A declared stage with no implementation yet.
///
/// Running it always fails, so a plan that reaches it stops loudly instead
/// of reporting a success it did not earn.
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderStage {
    kind: StageKind,
}

impl PlaceholderStage {
    pub fn new(kind: StageKind) -> Self {
        Self { kind }
    }
}

impl Stage for PlaceholderStage {
    fn kind(&self) -> StageKind {
        self.kind
    }

    fn run(&self, _ctx: &PipelineContext, _inputs: &ArtifactSet) -> Result<Artifact, PipelineError> {
        error!(stage = %self.kind, "stage is not implemented");
        Err(PipelineError::not_implemented(self.kind))
    }
}

/// The registered stage for `kind`.
pub fn stage_for(kind: StageKind) -> Box<dyn Stage> {
    match kind {
        StageKind::DataIngestion => Box::new(IngestionStage),
        StageKind::DataValidation
        | StageKind::DataPreprocessing
        | StageKind::DataSplit
        | StageKind::ModelTrainer
        | StageKind::ModelEvaluation
        | StageKind::ModelValidation => Box::new(PlaceholderStage::new(kind)),
    }
}
