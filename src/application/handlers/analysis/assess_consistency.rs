//! AssessConsistencyHandler - Weights plus Saaty consistency diagnostics.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::calculate_weights::parse_pairwise_input;
use crate::config::AnalysisConfig;
use crate::domain::analysis::{
    ConsistencyChecker, ConsistencyReport, PairwiseMatrix, WeightEngine, WeightVector,
};
use crate::domain::foundation::InvalidInputError;

/// Command to assess a pairwise matrix.
#[derive(Debug, Clone)]
pub struct AssessConsistencyCommand {
    pub pairwise_matrix: PairwiseMatrix,
}

impl AssessConsistencyCommand {
    /// Parses the command from a request payload (same shapes as weight derivation).
    pub fn from_json(payload: &Value, config: &AnalysisConfig) -> Result<Self, InvalidInputError> {
        Ok(Self {
            pairwise_matrix: parse_pairwise_input(payload, config)?,
        })
    }
}

/// Weights together with their consistency report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessConsistencyResult {
    pub weights: WeightVector,
    #[serde(flatten)]
    pub report: ConsistencyReport,
}

/// Handler for consistency assessment.
pub struct AssessConsistencyHandler {
    config: AnalysisConfig,
}

impl AssessConsistencyHandler {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn handle(
        &self,
        cmd: AssessConsistencyCommand,
    ) -> Result<AssessConsistencyResult, InvalidInputError> {
        let weights = WeightEngine::calculate_weights(&cmd.pairwise_matrix)?;
        let report = ConsistencyChecker::assess(
            &cmd.pairwise_matrix,
            &weights,
            self.config.consistency_threshold,
        )?;

        if report.consistent {
            debug!(
                consistency_ratio = report.consistency_ratio,
                "Pairwise judgments are consistent"
            );
        } else {
            warn!(
                consistency_ratio = report.consistency_ratio,
                threshold = self.config.consistency_threshold,
                "Pairwise judgments exceed consistency threshold"
            );
        }

        Ok(AssessConsistencyResult { weights, report })
    }

    /// Parses a payload and handles it.
    pub fn handle_json(&self, payload: &Value) -> Result<AssessConsistencyResult, InvalidInputError> {
        let cmd = AssessConsistencyCommand::from_json(payload, &self.config)?;
        self.handle(cmd)
    }
}
