//! Consistency Checker - Saaty consistency ratio for pairwise judgments.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use super::{PairwiseMatrix, WeightVector};
use crate::domain::foundation::InvalidInputError;

/// Saaty's random consistency index, indexed by matrix size minus one.
///
/// Sizes beyond the table reuse the last entry.
pub const RANDOM_INDEX: &[f64] = &[
    0.0, 0.0, 0.58, 0.90, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49, 1.51, 1.48, 1.56, 1.57, 1.59,
];

/// Conventional acceptance threshold for the consistency ratio.
pub const DEFAULT_CONSISTENCY_THRESHOLD: f64 = 0.10;

/// Consistency diagnostics for a pairwise matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    /// Principal eigenvalue estimate.
    pub lambda_max: f64,
    /// (lambda_max - n) / (n - 1), 0 for a single criterion.
    pub consistency_index: f64,
    /// consistency_index / RI(n), 0 when RI(n) is 0.
    pub consistency_ratio: f64,
    pub consistent: bool,
}

/// Consistency ratio computation.
pub struct ConsistencyChecker;

impl ConsistencyChecker {
    /// Random index for an n-criteria matrix.
    pub fn random_index(size: usize) -> f64 {
        match size {
            0 => 0.0,
            n => RANDOM_INDEX[(n - 1).min(RANDOM_INDEX.len() - 1)],
        }
    }

    /// Assesses how consistent the judgments in `matrix` are.
    ///
    /// `weights` must come from [`super::WeightEngine::calculate_weights`] on
    /// the same matrix. Those weights are the priority vector of the
    /// transposed matrix, which has the same eigenvalues, so lambda_max is
    /// estimated as the mean of `(Aᵀw)_i / w_i`.
    ///
    /// # Errors
    /// - Weight count differs from matrix size
    /// - A zero weight (the ratio is undefined)
    pub fn assess(
        matrix: &PairwiseMatrix,
        weights: &WeightVector,
        threshold: f64,
    ) -> Result<ConsistencyReport, InvalidInputError> {
        let size = matrix.size();
        if weights.len() != size {
            return Err(InvalidInputError::invalid_weights(format!(
                "expected {} weights, got {}",
                size,
                weights.len()
            )));
        }
        if let Some(index) = weights.values().iter().position(|w| *w <= 0.0) {
            return Err(InvalidInputError::invalid_weights(format!(
                "weight {} is zero, consistency is undefined",
                index
            )));
        }

        let w = DVector::from_column_slice(weights.values());
        let lambda_max = matrix.values().tr_mul(&w).component_div(&w).mean();

        let consistency_index = if size > 1 {
            (lambda_max - size as f64) / (size as f64 - 1.0)
        } else {
            0.0
        };

        let random_index = Self::random_index(size);
        let consistency_ratio = if random_index > 0.0 {
            consistency_index / random_index
        } else {
            0.0
        };

        Ok(ConsistencyReport {
            lambda_max,
            consistency_index,
            consistency_ratio,
            consistent: consistency_ratio <= threshold,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::WeightEngine;

    fn assess(rows: Vec<Vec<f64>>) -> ConsistencyReport {
        let matrix = PairwiseMatrix::try_new(rows).unwrap();
        let weights = WeightEngine::calculate_weights(&matrix).unwrap();
        ConsistencyChecker::assess(&matrix, &weights, DEFAULT_CONSISTENCY_THRESHOLD).unwrap()
    }

    #[test]
    fn random_index_table_lookup() {
        assert_eq!(ConsistencyChecker::random_index(1), 0.0);
        assert_eq!(ConsistencyChecker::random_index(3), 0.58);
        assert_eq!(ConsistencyChecker::random_index(15), 1.59);
        assert_eq!(ConsistencyChecker::random_index(40), 1.59);
    }

    #[test]
    fn perfectly_consistent_matrix() {
        let report = assess(vec![
            vec![1.0, 2.0, 4.0],
            vec![0.5, 1.0, 2.0],
            vec![0.25, 0.5, 1.0],
        ]);
        assert!((report.lambda_max - 3.0).abs() < 1e-9);
        assert!(report.consistency_ratio.abs() < 1e-9);
        assert!(report.consistent);
    }

    #[test]
    fn acceptable_saaty_matrix() {
        let report = assess(vec![
            vec![1.0, 3.0, 5.0],
            vec![1.0 / 3.0, 1.0, 3.0],
            vec![0.2, 1.0 / 3.0, 1.0],
        ]);
        assert!((report.lambda_max - 3.0387146809594667).abs() < 1e-9);
        assert!((report.consistency_ratio - 0.03337472496505753).abs() < 1e-9);
        assert!(report.consistent);
    }

    #[test]
    fn cyclic_judgments_are_inconsistent() {
        // A > B, B > C, C > A, all strongly
        let report = assess(vec![
            vec![1.0, 9.0, 1.0 / 9.0],
            vec![1.0 / 9.0, 1.0, 9.0],
            vec![9.0, 1.0 / 9.0, 1.0],
        ]);
        assert!(report.consistency_ratio > 1.0);
        assert!(!report.consistent);
    }

    #[test]
    fn two_criteria_are_always_consistent() {
        let report = assess(vec![vec![1.0, 7.0], vec![1.0 / 7.0, 1.0]]);
        assert_eq!(report.consistency_ratio, 0.0);
        assert!(report.consistent);
    }

    #[test]
    fn weight_count_mismatch_is_rejected() {
        let matrix = PairwiseMatrix::try_new(vec![vec![1.0]]).unwrap();
        let other = PairwiseMatrix::try_new(vec![vec![1.0; 2]; 2]).unwrap();
        let weights = WeightEngine::calculate_weights(&other).unwrap();
        let result = ConsistencyChecker::assess(&matrix, &weights, 0.1);
        assert!(matches!(result, Err(InvalidInputError::InvalidWeights { .. })));
    }

    #[test]
    fn zero_weight_is_rejected() {
        // Column 1 is all zeros, so its weight is zero
        let matrix = PairwiseMatrix::try_new(vec![vec![1.0, 0.0], vec![1.0, 0.0]]).unwrap();
        let weights = WeightEngine::calculate_weights(&matrix).unwrap();
        let result = ConsistencyChecker::assess(&matrix, &weights, 0.1);
        assert!(matches!(result, Err(InvalidInputError::InvalidWeights { .. })));
    }
}
