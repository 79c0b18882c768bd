//! AnalysisService - Dispatches JSON payloads to the analysis handlers.

use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

use super::{AssessConsistencyHandler, CalculateRankingsHandler, CalculateWeightsHandler};
use crate::config::AnalysisConfig;
use crate::domain::foundation::{ErrorResponse, InvalidInputError};

/// The operations the service exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisOperation {
    /// `{ pairwise_matrix }` -> `{ weights }`
    FuzzyAhp,
    /// `{ decision_matrix, criteria_names }` -> `{ rankings }`
    FuzzyTopsis,
    /// `{ pairwise_matrix }` -> `{ weights, consistency_ratio, ... }`
    AssessConsistency,
}

impl AnalysisOperation {
    pub const ALL: [AnalysisOperation; 3] = [
        AnalysisOperation::FuzzyAhp,
        AnalysisOperation::FuzzyTopsis,
        AnalysisOperation::AssessConsistency,
    ];

    /// Returns the operation name.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisOperation::FuzzyAhp => "fuzzy-ahp",
            AnalysisOperation::FuzzyTopsis => "fuzzy-topsis",
            AnalysisOperation::AssessConsistency => "assess-consistency",
        }
    }
}

impl fmt::Display for AnalysisOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AnalysisOperation {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnalysisOperation::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| AnalysisError::UnknownOperation(s.to_string()))
    }
}

/// Errors from dispatching an analysis request.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    #[error("Unknown operation '{0}', expected one of: fuzzy-ahp, fuzzy-topsis, assess-consistency")]
    UnknownOperation(String),

    #[error("Failed to serialize result: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AnalysisError {
    /// Structured failure for input errors, `None` for everything else.
    pub fn to_response(&self) -> Option<ErrorResponse> {
        match self {
            AnalysisError::InvalidInput(err) => Some(ErrorResponse::from(err)),
            _ => None,
        }
    }
}

/// Routes payloads to the handler for each operation.
pub struct AnalysisService {
    weights: CalculateWeightsHandler,
    rankings: CalculateRankingsHandler,
    consistency: AssessConsistencyHandler,
}

impl AnalysisService {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            weights: CalculateWeightsHandler::new(config.clone()),
            rankings: CalculateRankingsHandler::new(config.clone()),
            consistency: AssessConsistencyHandler::new(config),
        }
    }

    /// Runs `operation` on `payload` and returns the JSON result.
    pub fn execute(
        &self,
        operation: AnalysisOperation,
        payload: &Value,
    ) -> Result<Value, AnalysisError> {
        debug!(operation = %operation, "Executing analysis");

        let result = match operation {
            AnalysisOperation::FuzzyAhp => serde_json::to_value(self.weights.handle_json(payload)?)?,
            AnalysisOperation::FuzzyTopsis => {
                serde_json::to_value(self.rankings.handle_json(payload)?)?
            }
            AnalysisOperation::AssessConsistency => {
                serde_json::to_value(self.consistency.handle_json(payload)?)?
            }
        };

        Ok(result)
    }
}

impl Default for AnalysisService {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}
