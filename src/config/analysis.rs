//! Analysis engine limits and defaults

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::analysis::DEFAULT_CONSISTENCY_THRESHOLD;

/// Limits and tunables applied around the analysis engines
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Largest accepted row or column count for any input matrix
    #[serde(default = "default_max_dimension")]
    pub max_dimension: usize,

    /// Consistency ratio at or below which judgments are acceptable
    #[serde(default = "default_consistency_threshold")]
    pub consistency_threshold: f64,

    /// Decimal places kept when filling reciprocal judgments
    #[serde(default = "default_reciprocal_precision")]
    pub reciprocal_precision: u32,
}

impl AnalysisConfig {
    /// Validate analysis configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_dimension == 0 {
            return Err(ValidationError::InvalidMaxDimension);
        }
        if !(self.consistency_threshold > 0.0 && self.consistency_threshold <= 1.0) {
            return Err(ValidationError::InvalidConsistencyThreshold(
                self.consistency_threshold,
            ));
        }
        if self.reciprocal_precision > 12 {
            return Err(ValidationError::InvalidReciprocalPrecision(
                self.reciprocal_precision,
            ));
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_dimension: default_max_dimension(),
            consistency_threshold: default_consistency_threshold(),
            reciprocal_precision: default_reciprocal_precision(),
        }
    }
}

fn default_max_dimension() -> usize {
    100
}

fn default_consistency_threshold() -> f64 {
    DEFAULT_CONSISTENCY_THRESHOLD
}

fn default_reciprocal_precision() -> u32 {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_config_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.max_dimension, 100);
        assert_eq!(config.consistency_threshold, 0.10);
        assert_eq!(config.reciprocal_precision, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_dimension() {
        let config = AnalysisConfig {
            max_dimension: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidMaxDimension));
    }

    #[test]
    fn test_validate_rejects_threshold_out_of_range() {
        for threshold in [0.0, -0.1, 1.5, f64::NAN] {
            let config = AnalysisConfig {
                consistency_threshold: threshold,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "threshold {} accepted", threshold);
        }
    }

    #[test]
    fn test_validate_rejects_excessive_precision() {
        let config = AnalysisConfig {
            reciprocal_precision: 13,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidReciprocalPrecision(13))
        );
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let json = r#"{ "max_dimension": 12 }"#;
        let config: AnalysisConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.max_dimension, 12);
        assert_eq!(config.reciprocal_precision, 3);
    }
}
