//! The pipeline-level error taxonomy.
//!
//! Every failure inside a stage is converted into exactly one
//! [`PipelineError`] at its point of origin. The variant names the failure
//! family, `stage` and `operation` say where it happened, and `source` keeps
//! the original cause.

use thiserror::Error;

use crate::stage::StageKind;

/// Boxed cause carried by [`PipelineError`] variants.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The source connector could not produce the dataset.
    #[error("[{stage}] {operation}: connector failure: {source}")]
    Connector {
        stage: StageKind,
        operation: &'static str,
        #[source]
        source: BoxError,
    },

    /// The schema file could not be read or has an unexpected shape.
    #[error("[{stage}] {operation}: schema error: {source}")]
    Schema {
        stage: StageKind,
        operation: &'static str,
        #[source]
        source: BoxError,
    },

    /// An artifact could not be written or read back.
    #[error("[{stage}] {operation}: persistence failure: {source}")]
    Persistence {
        stage: StageKind,
        operation: &'static str,
        #[source]
        source: BoxError,
    },

    /// The stage's own transformation or sequencing failed.
    #[error("[{stage}] {operation}: {source}")]
    Step {
        stage: StageKind,
        operation: &'static str,
        #[source]
        source: BoxError,
    },

    /// The stage is declared but has no implementation.
    #[error("[{stage}] stage is not implemented")]
    NotImplemented { stage: StageKind },
}

impl PipelineError {
    pub fn connector(
        stage: StageKind,
        operation: &'static str,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::Connector {
            stage,
            operation,
            source: source.into(),
        }
    }

    pub fn schema(stage: StageKind, operation: &'static str, source: impl Into<BoxError>) -> Self {
        Self::Schema {
            stage,
            operation,
            source: source.into(),
        }
    }

    pub fn persistence(
        stage: StageKind,
        operation: &'static str,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::Persistence {
            stage,
            operation,
            source: source.into(),
        }
    }

    pub fn step(stage: StageKind, operation: &'static str, source: impl Into<BoxError>) -> Self {
        Self::Step {
            stage,
            operation,
            source: source.into(),
        }
    }

    pub fn not_implemented(stage: StageKind) -> Self {
        Self::NotImplemented { stage }
    }

    /// Stage the error originated in.
    pub fn stage(&self) -> StageKind {
        match self {
            Self::Connector { stage, .. }
            | Self::Schema { stage, .. }
            | Self::Persistence { stage, .. }
            | Self::Step { stage, .. }
            | Self::NotImplemented { stage } => *stage,
        }
    }

    /// Operation the error originated in, if the variant records one.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::Connector { operation, .. }
            | Self::Schema { operation, .. }
            | Self::Persistence { operation, .. }
            | Self::Step { operation, .. } => Some(operation),
            Self::NotImplemented { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_stage_operation_and_cause() {
        let err = PipelineError::connector(
            StageKind::DataIngestion,
            "export_raw",
            "dataset 'bank_churn' not found",
        );
        assert_eq!(
            err.to_string(),
            "[data_ingestion] export_raw: connector failure: dataset 'bank_churn' not found"
        );
        assert_eq!(err.stage(), StageKind::DataIngestion);
        assert_eq!(err.operation(), Some("export_raw"));
    }

    #[test]
    fn not_implemented_has_no_operation() {
        let err = PipelineError::not_implemented(StageKind::DataSplit);
        assert_eq!(err.to_string(), "[data_split] stage is not implemented");
        assert_eq!(err.operation(), None);
    }

    #[test]
    fn source_is_preserved() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = PipelineError::persistence(StageKind::DataIngestion, "write_csv", io);
        let source = std::error::Error::source(&err).expect("source");
        assert_eq!(source.to_string(), "denied");
    }
}
