//! Stage composition for the churn pipeline.
//!
//! A [`Pipeline`] runs [`Stage`]s in their fixed order against a
//! [`PipelineContext`], threading each stage's [`Artifact`] to its successors
//! and stopping at the first error.

pub mod artifacts;
pub mod context;
pub mod orchestrator;
pub mod stage;

pub use artifacts::{Artifact, ArtifactSet};
pub use context::PipelineContext;
pub use orchestrator::{Pipeline, PipelineRun, StageReport};
pub use stage::{IngestionStage, PlaceholderStage, Stage, stage_for};
