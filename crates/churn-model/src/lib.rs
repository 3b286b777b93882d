//! Data model shared by every churn pipeline crate.
//!
//! Holds the immutable records each stage produces ([`DataIngestionArtifact`],
//! [`DataValidationArtifact`]), the resolved path bundles each stage reads
//! ([`DataIngestionConfig`], [`DataValidationConfig`]), the stage state
//! machine ([`StageKind`], [`PipelineState`]) and the single pipeline error
//! type ([`PipelineError`]).

pub mod artifact;
pub mod config;
pub mod constants;
pub mod dataset;
pub mod error;
pub mod schema;
pub mod stage;

pub use artifact::{ArtifactError, DataIngestionArtifact, DataValidationArtifact};
pub use config::{DataIngestionConfig, DataValidationConfig};
pub use dataset::DatasetSpec;
pub use error::{BoxError, PipelineError, Result};
pub use schema::SchemaConfig;
pub use stage::{PipelineState, StageKind};
