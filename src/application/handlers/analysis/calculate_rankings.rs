//! CalculateRankingsHandler - Command handler for Fuzzy TOPSIS rankings.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::limits::{enforce_dimension_limit, required_field};
use crate::config::AnalysisConfig;
use crate::domain::analysis::{
    CriteriaNames, CriterionWeights, DecisionMatrix, LabeledValues, RankingEngine, RankingResult,
};
use crate::domain::foundation::InvalidInputError;

/// JSON flag asking for closeness coefficients in the result.
pub const INCLUDE_CLOSENESS_FIELD: &str = "include_closeness";

/// Command to rank the criteria of a square decision matrix.
#[derive(Debug, Clone)]
pub struct CalculateRankingsCommand {
    pub decision_matrix: DecisionMatrix,
    pub criteria_names: CriteriaNames,
    /// Uniform unless the payload carries `criteria_weights`.
    pub criteria_weights: CriterionWeights,
    pub include_closeness: bool,
}

impl CalculateRankingsCommand {
    /// Parses the command from a request payload.
    pub fn from_json(payload: &Value, config: &AnalysisConfig) -> Result<Self, InvalidInputError> {
        let matrix = required_field(payload, DecisionMatrix::FIELD)?;
        enforce_dimension_limit(DecisionMatrix::FIELD, matrix, config.max_dimension)?;
        let decision_matrix = DecisionMatrix::from_json(matrix)?;

        let criteria_names =
            CriteriaNames::from_json(required_field(payload, CriteriaNames::FIELD)?)?;

        let criteria_weights = match payload.get(CriterionWeights::FIELD) {
            None | Some(Value::Null) => CriterionWeights::Uniform,
            Some(weights) => CriterionWeights::from_json(weights)?,
        };

        let include_closeness = match payload.get(INCLUDE_CLOSENESS_FIELD) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(flag)) => *flag,
            Some(_) => {
                return Err(InvalidInputError::NotABoolean {
                    field: INCLUDE_CLOSENESS_FIELD.to_string(),
                });
            }
        };

        Ok(Self {
            decision_matrix,
            criteria_names,
            criteria_weights,
            include_closeness,
        })
    }
}

/// Result of a successful ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculateRankingsResult {
    pub rankings: RankingResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closeness: Option<LabeledValues<f64>>,
}

/// Handler for criteria ranking.
pub struct CalculateRankingsHandler {
    config: AnalysisConfig,
}

impl CalculateRankingsHandler {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn handle(
        &self,
        cmd: CalculateRankingsCommand,
    ) -> Result<CalculateRankingsResult, InvalidInputError> {
        let analysis = RankingEngine::analyze(
            &cmd.decision_matrix,
            &cmd.criteria_names,
            &cmd.criteria_weights,
        )
        .map_err(|e| {
            warn!(error = %e, "Rejected decision matrix");
            e
        })?;

        debug!(
            alternatives = cmd.decision_matrix.alternatives(),
            criteria = cmd.decision_matrix.criteria(),
            weighted = matches!(cmd.criteria_weights, CriterionWeights::Custom(_)),
            "Calculated criteria rankings"
        );

        Ok(CalculateRankingsResult {
            rankings: analysis.rankings,
            closeness: cmd.include_closeness.then_some(analysis.closeness),
        })
    }

    /// Parses a payload and handles it.
    pub fn handle_json(&self, payload: &Value) -> Result<CalculateRankingsResult, InvalidInputError> {
        let cmd = CalculateRankingsCommand::from_json(payload, &self.config)?;
        self.handle(cmd)
    }
}
