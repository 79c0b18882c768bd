//! CalculateWeightsHandler - Command handler for Fuzzy AHP weight derivation.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::limits::{enforce_dimension_limit, required_field};
use crate::config::AnalysisConfig;
use crate::domain::analysis::{Judgment, PairwiseMatrix, WeightEngine, WeightVector};
use crate::domain::foundation::InvalidInputError;

/// JSON field for the criteria count when judgments are supplied instead of a matrix.
pub const CRITERIA_COUNT_FIELD: &str = "criteria_count";

/// JSON field for the judgment list.
pub const JUDGMENTS_FIELD: &str = "judgments";

/// Command to derive criterion weights.
#[derive(Debug, Clone)]
pub struct CalculateWeightsCommand {
    pub pairwise_matrix: PairwiseMatrix,
}

impl CalculateWeightsCommand {
    /// Parses the command from a request payload.
    ///
    /// Accepts either `{ "pairwise_matrix": [[...]] }` or
    /// `{ "criteria_count": n, "judgments": [{ "row", "column", "value" }] }`.
    pub fn from_json(payload: &Value, config: &AnalysisConfig) -> Result<Self, InvalidInputError> {
        Ok(Self {
            pairwise_matrix: parse_pairwise_input(payload, config)?,
        })
    }
}

/// Result of a successful weight derivation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculateWeightsResult {
    pub weights: WeightVector,
}

/// Handler for weight derivation.
pub struct CalculateWeightsHandler {
    config: AnalysisConfig,
}

impl CalculateWeightsHandler {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn handle(
        &self,
        cmd: CalculateWeightsCommand,
    ) -> Result<CalculateWeightsResult, InvalidInputError> {
        let weights = WeightEngine::calculate_weights(&cmd.pairwise_matrix).map_err(|e| {
            warn!(error = %e, "Rejected pairwise matrix");
            e
        })?;

        debug!(
            criteria = cmd.pairwise_matrix.size(),
            weight_sum = weights.sum(),
            "Calculated criterion weights"
        );

        Ok(CalculateWeightsResult { weights })
    }

    /// Parses a payload and handles it.
    pub fn handle_json(&self, payload: &Value) -> Result<CalculateWeightsResult, InvalidInputError> {
        let cmd = CalculateWeightsCommand::from_json(payload, &self.config)?;
        self.handle(cmd)
    }
}

/// Reads a pairwise matrix from either of the accepted payload shapes.
pub(crate) fn parse_pairwise_input(
    payload: &Value,
    config: &AnalysisConfig,
) -> Result<PairwiseMatrix, InvalidInputError> {
    if let Some(matrix) = payload.get(PairwiseMatrix::FIELD) {
        enforce_dimension_limit(PairwiseMatrix::FIELD, matrix, config.max_dimension)?;
        return PairwiseMatrix::from_json(matrix);
    }

    if payload.get(JUDGMENTS_FIELD).is_none() {
        return Err(InvalidInputError::missing_field(PairwiseMatrix::FIELD));
    }

    let size = required_field(payload, CRITERIA_COUNT_FIELD)?
        .as_u64()
        .ok_or_else(|| InvalidInputError::not_a_matrix(CRITERIA_COUNT_FIELD, "expected a count"))?
        as usize;
    if size > config.max_dimension {
        return Err(InvalidInputError::DimensionTooLarge {
            field: CRITERIA_COUNT_FIELD.to_string(),
            max: config.max_dimension,
            actual: size,
        });
    }

    let judgments: Vec<Judgment> =
        serde_json::from_value(required_field(payload, JUDGMENTS_FIELD)?.clone()).map_err(|e| {
            InvalidInputError::not_a_matrix(JUDGMENTS_FIELD, e.to_string())
        })?;

    PairwiseMatrix::from_judgments(size, &judgments, config.reciprocal_precision)
}
