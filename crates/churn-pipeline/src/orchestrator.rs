//! Fail-fast sequential orchestration.

use std::time::{Duration, Instant};

use churn_model::{PipelineError, PipelineState, StageKind};
use tracing::{error, info, info_span};

use crate::artifacts::{Artifact, ArtifactSet};
use crate::context::PipelineContext;
use crate::stage::{Stage, stage_for};

/// Outcome of one completed stage.
#[derive(Debug, Clone, PartialEq)]
pub struct StageReport {
    pub kind: StageKind,
    pub artifact: Artifact,
    pub duration: Duration,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Default)]
pub struct PipelineRun {
    pub state: PipelineState,
    pub artifacts: ArtifactSet,
    pub stages: Vec<StageReport>,
}

/// An ordered plan of stages.
///
/// Stages follow the fixed declaration order, starting at ingestion, with no
/// gaps. A stage therefore always runs with every predecessor's artifact
/// already recorded.
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    /// Builds a plan from explicit stages, rejecting any out-of-order list.
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Result<Self, PipelineError> {
        for (position, stage) in stages.iter().enumerate() {
            let expected = StageKind::ALL.get(position).copied();
            if expected != Some(stage.kind()) {
                return Err(PipelineError::step(
                    stage.kind(),
                    "plan",
                    format!(
                        "stage declared at position {} is out of order (expected {})",
                        position + 1,
                        expected.map_or("nothing", StageKind::as_str)
                    ),
                ));
            }
        }
        Ok(Self { stages })
    }

    /// The registered stages from ingestion up to and including `last`.
    pub fn through(last: StageKind) -> Self {
        Self {
            stages: last.through().map(stage_for).collect(),
        }
    }

    pub fn stage_kinds(&self) -> Vec<StageKind> {
        self.stages.iter().map(|stage| stage.kind()).collect()
    }

    /// Runs every stage in order, stopping at the first failure.
    ///
    /// Artifacts written by stages that completed before the failure stay on
    /// disk.
    pub fn run_all(&self, ctx: &PipelineContext) -> Result<PipelineRun, PipelineError> {
        let run_start = Instant::now();
        let mut run = PipelineRun::default();
        info!(
            dataset = %ctx.dataset().name,
            project_root = %ctx.project_root().display(),
            stages = self.stages.len(),
            "pipeline started"
        );

        for stage in &self.stages {
            let kind = stage.kind();
            let span = info_span!("stage", stage = %kind);
            let _guard = span.enter();
            info!(state = %run.state, "stage started");
            let start = Instant::now();

            let artifact = match stage.run(ctx, &run.artifacts) {
                Ok(artifact) => artifact,
                Err(error) => {
                    error!(
                        state = %run.state,
                        duration_ms = start.elapsed().as_millis(),
                        error = %error,
                        "stage failed, aborting pipeline"
                    );
                    return Err(error);
                }
            };

            let duration = start.elapsed();
            run.state = kind.target_state();
            run.artifacts.record(artifact.clone());
            info!(
                state = %run.state,
                artifact = %artifact.path().display(),
                duration_ms = duration.as_millis(),
                "stage complete"
            );
            run.stages.push(StageReport {
                kind,
                artifact,
                duration,
            });
        }

        info!(
            state = %run.state,
            duration_ms = run_start.elapsed().as_millis(),
            "pipeline complete"
        );
        Ok(run)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::through(StageKind::last_implemented())
    }
}
