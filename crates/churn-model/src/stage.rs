//! Stage identifiers and the linear pipeline state machine.
//!
//! Each [`StageKind`] is one directed edge between two [`PipelineState`]s:
//!
//! ```text
//! NotStarted -ingestion-> Ingested -validation-> Validated -preprocessing-> Preprocessed
//!   -split-> Split -trainer-> Trained -evaluation-> Evaluated -model validation-> ModelValidated
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// One step of the pipeline, in declaration order.
///
/// The derived `Ord` follows declaration order, which is also execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    DataIngestion,
    DataValidation,
    DataPreprocessing,
    DataSplit,
    ModelTrainer,
    ModelEvaluation,
    ModelValidation,
}

impl StageKind {
    /// All stages in execution order.
    pub const ALL: [StageKind; 7] = [
        StageKind::DataIngestion,
        StageKind::DataValidation,
        StageKind::DataPreprocessing,
        StageKind::DataSplit,
        StageKind::ModelTrainer,
        StageKind::ModelEvaluation,
        StageKind::ModelValidation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StageKind::DataIngestion => "data_ingestion",
            StageKind::DataValidation => "data_validation",
            StageKind::DataPreprocessing => "data_preprocessing",
            StageKind::DataSplit => "data_split",
            StageKind::ModelTrainer => "model_trainer",
            StageKind::ModelEvaluation => "model_evaluation",
            StageKind::ModelValidation => "model_validation",
        }
    }

    /// Whether the stage has a working implementation.
    pub fn is_implemented(self) -> bool {
        matches!(self, StageKind::DataIngestion)
    }

    /// The last stage with a working implementation.
    pub fn last_implemented() -> StageKind {
        StageKind::ALL
            .iter()
            .copied()
            .filter(|kind| kind.is_implemented())
            .max()
            .unwrap_or(StageKind::DataIngestion)
    }

    /// State the pipeline must be in before this stage runs.
    pub fn source_state(self) -> PipelineState {
        match self {
            StageKind::DataIngestion => PipelineState::NotStarted,
            StageKind::DataValidation => PipelineState::Ingested,
            StageKind::DataPreprocessing => PipelineState::Validated,
            StageKind::DataSplit => PipelineState::Preprocessed,
            StageKind::ModelTrainer => PipelineState::Split,
            StageKind::ModelEvaluation => PipelineState::Trained,
            StageKind::ModelValidation => PipelineState::Evaluated,
        }
    }

    /// State the pipeline reaches once this stage succeeds.
    pub fn target_state(self) -> PipelineState {
        match self {
            StageKind::DataIngestion => PipelineState::Ingested,
            StageKind::DataValidation => PipelineState::Validated,
            StageKind::DataPreprocessing => PipelineState::Preprocessed,
            StageKind::DataSplit => PipelineState::Split,
            StageKind::ModelTrainer => PipelineState::Trained,
            StageKind::ModelEvaluation => PipelineState::Evaluated,
            StageKind::ModelValidation => PipelineState::ModelValidated,
        }
    }

    /// Stages from the first one up to and including `self`.
    pub fn through(self) -> impl Iterator<Item = StageKind> {
        StageKind::ALL.into_iter().take_while(move |kind| *kind <= self)
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress of a single pipeline run.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    #[default]
    NotStarted,
    Ingested,
    Validated,
    Preprocessed,
    Split,
    Trained,
    Evaluated,
    ModelValidated,
}

impl PipelineState {
    pub fn as_str(self) -> &'static str {
        match self {
            PipelineState::NotStarted => "not_started",
            PipelineState::Ingested => "ingested",
            PipelineState::Validated => "validated",
            PipelineState::Preprocessed => "preprocessed",
            PipelineState::Split => "split",
            PipelineState::Trained => "trained",
            PipelineState::Evaluated => "evaluated",
            PipelineState::ModelValidated => "model_validated",
        }
    }

    /// The stage leaving this state, or `None` for the terminal state.
    pub fn next_stage(self) -> Option<StageKind> {
        StageKind::ALL
            .into_iter()
            .find(|kind| kind.source_state() == self)
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_form_a_linear_chain() {
        let mut state = PipelineState::NotStarted;
        for kind in StageKind::ALL {
            assert_eq!(kind.source_state(), state);
            assert_eq!(state.next_stage(), Some(kind));
            state = kind.target_state();
        }
        assert_eq!(state, PipelineState::ModelValidated);
        assert_eq!(state.next_stage(), None);
    }

    #[test]
    fn only_ingestion_is_implemented() {
        assert_eq!(StageKind::last_implemented(), StageKind::DataIngestion);
        let implemented: Vec<_> = StageKind::ALL
            .into_iter()
            .filter(|kind| kind.is_implemented())
            .collect();
        assert_eq!(implemented, vec![StageKind::DataIngestion]);
    }

    #[test]
    fn through_is_inclusive_and_ordered() {
        let kinds: Vec<_> = StageKind::DataSplit.through().collect();
        assert_eq!(
            kinds,
            vec![
                StageKind::DataIngestion,
                StageKind::DataValidation,
                StageKind::DataPreprocessing,
                StageKind::DataSplit,
            ]
        );
        assert_eq!(StageKind::DataIngestion.through().count(), 1);
    }

    #[test]
    fn serde_names_match_display() {
        let json = serde_json::to_string(&StageKind::ModelTrainer).unwrap();
        assert_eq!(json, "\"model_trainer\"");
        assert_eq!(StageKind::ModelTrainer.to_string(), "model_trainer");
    }
}
