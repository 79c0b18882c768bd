//! Weight Engine - Fuzzy AHP criterion weights from a pairwise comparison matrix.
//!
//! Operates on crisp (already defuzzified) judgments.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::matrix::{parse_matrix, to_dmatrix};
use crate::domain::foundation::InvalidInputError;

/// A single pairwise judgment: criterion `row` compared with criterion `column`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Judgment {
    pub row: usize,
    pub column: usize,
    pub value: f64,
}

impl Judgment {
    /// Creates a new judgment.
    pub fn new(row: usize, column: usize, value: f64) -> Self {
        Self { row, column, value }
    }
}

/// Square matrix where entry (i, j) is the importance of criterion i over j.
///
/// Entries must be finite and non-negative. Zero entries are accepted even
/// though a sound comparison is strictly positive: a zero only fails once it
/// leaves its whole row summing to zero (see
/// [`WeightEngine::calculate_weights`]). Unset cells of
/// [`PairwiseMatrix::from_judgments`] rely on this.
///
/// Reciprocal consistency is not enforced; see [`super::ConsistencyChecker`]
/// for a diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub struct PairwiseMatrix {
    values: DMatrix<f64>,
}

impl PairwiseMatrix {
    /// JSON field name for this matrix.
    pub const FIELD: &'static str = "pairwise_matrix";

    /// Creates a pairwise matrix, validating shape and values.
    pub fn try_new(rows: Vec<Vec<f64>>) -> Result<Self, InvalidInputError> {
        let values = to_dmatrix(Self::FIELD, &rows)?;
        if !values.is_square() {
            return Err(InvalidInputError::NotSquare {
                field: Self::FIELD.to_string(),
                rows: values.nrows(),
                columns: values.ncols(),
            });
        }

        for (row, entries) in rows.iter().enumerate() {
            if let Some(column) = entries.iter().position(|v| *v < 0.0) {
                return Err(InvalidInputError::NegativeEntry {
                    field: Self::FIELD.to_string(),
                    row,
                    column,
                    value: entries[column],
                });
            }
        }

        Ok(Self { values })
    }

    /// Parses and validates a pairwise matrix from JSON.
    pub fn from_json(value: &Value) -> Result<Self, InvalidInputError> {
        Self::try_new(parse_matrix(Self::FIELD, value)?)
    }

    /// Builds a reciprocal matrix from upper-triangle style judgments.
    ///
    /// The diagonal is 1. Each judgment sets (row, column) to its value and
    /// (column, row) to the reciprocal rounded to `precision` decimals.
    /// Later judgments overwrite earlier ones. Unset cells stay 0.
    pub fn from_judgments(
        size: usize,
        judgments: &[Judgment],
        precision: u32,
    ) -> Result<Self, InvalidInputError> {
        if size == 0 {
            return Err(InvalidInputError::empty_matrix(Self::FIELD));
        }

        let mut rows = vec![vec![0.0; size]; size];
        for (i, row) in rows.iter_mut().enumerate() {
            row[i] = 1.0;
        }

        let scale = 10f64.powi(precision as i32);
        for judgment in judgments {
            let Judgment { row, column, value } = *judgment;
            if row >= size || column >= size {
                return Err(InvalidInputError::invalid_judgment(
                    row,
                    column,
                    format!("index out of range for {} criteria", size),
                ));
            }
            if row == column {
                return Err(InvalidInputError::invalid_judgment(
                    row,
                    column,
                    "diagonal entries are fixed at 1",
                ));
            }
            if !value.is_finite() || value <= 0.0 {
                return Err(InvalidInputError::invalid_judgment(
                    row,
                    column,
                    format!("value must be positive and finite, got {}", value),
                ));
            }
            rows[row][column] = value;
            rows[column][row] = (value.recip() * scale).round() / scale;
        }

        Self::try_new(rows)
    }

    /// Number of criteria.
    pub fn size(&self) -> usize {
        self.values.nrows()
    }

    /// Entry (i, j).
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        self.values.get((row, column)).copied()
    }

    /// The underlying n × n matrix.
    pub fn values(&self) -> &DMatrix<f64> {
        &self.values
    }
}

/// Criterion weights in input row order, summing to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightVector(Vec<f64>);

impl WeightVector {
    /// The weights as a slice.
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    /// Number of weights.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no weights.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }
}

/// Fuzzy AHP weight derivation.
pub struct WeightEngine;

impl WeightEngine {
    /// Derives criterion weights from a pairwise matrix.
    ///
    /// # Algorithm
    /// 1. Sum each row.
    /// 2. Divide every entry by its row sum (each row then sums to 1).
    /// 3. Weight j = mean of column j of the normalized matrix.
    ///
    /// # Errors
    /// - Any row sum <= 0 (e.g. a row of zeros)
    /// - Any row sum that overflows to infinity
    pub fn calculate_weights(matrix: &PairwiseMatrix) -> Result<WeightVector, InvalidInputError> {
        let values = matrix.values();
        let size = matrix.size();

        // `column_sum` adds the columns together: one total per row.
        let sums = values.column_sum();
        for (row, &sum) in sums.iter().enumerate() {
            if sum <= 0.0 {
                return Err(InvalidInputError::NonPositiveRowSum { row, sum });
            }
            if !sum.is_finite() {
                return Err(InvalidInputError::NonFiniteRowSum { row });
            }
        }

        let normalized = DMatrix::from_fn(size, size, |i, j| values[(i, j)] / sums[i]);
        let weights: Vec<f64> = normalized.row_mean().iter().copied().collect();
        debug!(criteria = size, "Derived AHP weights");

        Ok(WeightVector(weights))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TOLERANCE: f64 = 1e-9;

    fn matrix(rows: Vec<Vec<f64>>) -> PairwiseMatrix {
        PairwiseMatrix::try_new(rows).unwrap()
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < TOLERANCE, "expected {:?}, got {:?}", expected, actual);
        }
    }

    // Construction

    #[test]
    fn try_new_rejects_empty_matrix() {
        assert!(matches!(
            PairwiseMatrix::try_new(vec![]),
            Err(InvalidInputError::EmptyMatrix { .. })
        ));
    }

    #[test]
    fn try_new_rejects_non_square() {
        let result = PairwiseMatrix::try_new(vec![vec![1.0, 2.0, 3.0], vec![0.5, 1.0, 2.0]]);
        assert_eq!(
            result,
            Err(InvalidInputError::NotSquare {
                field: "pairwise_matrix".to_string(),
                rows: 2,
                columns: 3
            })
        );
    }

    #[test]
    fn try_new_rejects_negative_entry() {
        let result = PairwiseMatrix::try_new(vec![vec![1.0, -2.0], vec![0.5, 1.0]]);
        assert!(matches!(
            result,
            Err(InvalidInputError::NegativeEntry { row: 0, column: 1, .. })
        ));
    }

    #[test]
    fn try_new_rejects_nan() {
        let result = PairwiseMatrix::try_new(vec![vec![1.0, f64::NAN], vec![0.5, 1.0]]);
        assert!(matches!(result, Err(InvalidInputError::NonFiniteEntry { .. })));
    }

    #[test]
    fn from_judgments_fills_reciprocals_rounded() {
        let m = PairwiseMatrix::from_judgments(
            3,
            &[Judgment::new(0, 1, 3.0), Judgment::new(0, 2, 5.0), Judgment::new(1, 2, 7.0)],
            3,
        )
        .unwrap();

        assert_eq!(m.get(0, 0), Some(1.0));
        assert_eq!(m.get(0, 1), Some(3.0));
        assert_eq!(m.get(1, 0), Some(0.333));
        assert_eq!(m.get(2, 0), Some(0.2));
        assert_eq!(m.get(2, 1), Some(0.143));
    }

    #[test]
    fn from_judgments_rejects_diagonal() {
        let result = PairwiseMatrix::from_judgments(2, &[Judgment::new(1, 1, 2.0)], 3);
        assert!(matches!(result, Err(InvalidInputError::InvalidJudgment { .. })));
    }

    #[test]
    fn from_judgments_rejects_out_of_range() {
        let result = PairwiseMatrix::from_judgments(2, &[Judgment::new(0, 2, 2.0)], 3);
        assert!(matches!(result, Err(InvalidInputError::InvalidJudgment { .. })));
    }

    #[test]
    fn from_judgments_rejects_non_positive_value() {
        let result = PairwiseMatrix::from_judgments(2, &[Judgment::new(0, 1, 0.0)], 3);
        assert!(matches!(result, Err(InvalidInputError::InvalidJudgment { .. })));
    }

    #[test]
    fn from_judgments_rejects_zero_size() {
        let result = PairwiseMatrix::from_judgments(0, &[], 3);
        assert!(matches!(result, Err(InvalidInputError::EmptyMatrix { .. })));
    }

    // Weight Derivation

    #[test]
    fn uniform_matrix_gives_equal_weights() {
        let m = matrix(vec![vec![1.0; 3]; 3]);
        let weights = WeightEngine::calculate_weights(&m).unwrap();
        assert_close(weights.values(), &[1.0 / 3.0; 3]);
    }

    #[test]
    fn single_criterion_gets_full_weight() {
        let m = matrix(vec![vec![4.0]]);
        let weights = WeightEngine::calculate_weights(&m).unwrap();
        assert_close(weights.values(), &[1.0]);
    }

    #[test]
    fn saaty_three_by_three() {
        let m = matrix(vec![
            vec![1.0, 3.0, 5.0],
            vec![1.0 / 3.0, 1.0, 3.0],
            vec![0.2, 1.0 / 3.0, 1.0],
        ]);
        let weights = WeightEngine::calculate_weights(&m).unwrap();
        assert_close(
            weights.values(),
            &[0.1061563235476279, 0.26049795615013005, 0.633345720302242],
        );
    }

    #[test]
    fn weights_follow_criterion_order() {
        let original = vec![
            vec![1.0, 3.0, 5.0],
            vec![1.0 / 3.0, 1.0, 3.0],
            vec![0.2, 1.0 / 3.0, 1.0],
        ];
        // Relabel criteria: new criterion i is old criterion order[i].
        let order = [2, 0, 1];
        let relabeled: Vec<Vec<f64>> = order
            .iter()
            .map(|&i| order.iter().map(|&j| original[i][j]).collect())
            .collect();

        let weights = WeightEngine::calculate_weights(&matrix(original)).unwrap();
        let relabeled_weights = WeightEngine::calculate_weights(&matrix(relabeled)).unwrap();

        let expected: Vec<f64> = order.iter().map(|&i| weights.values()[i]).collect();
        assert_close(relabeled_weights.values(), &expected);
        assert!(weights.values()[0] < weights.values()[2]);
    }

    #[test]
    fn row_of_zeros_is_rejected() {
        let m = matrix(vec![vec![1.0, 2.0], vec![0.0, 0.0]]);
        let result = WeightEngine::calculate_weights(&m);
        assert_eq!(
            result,
            Err(InvalidInputError::NonPositiveRowSum { row: 1, sum: 0.0 })
        );
    }

    #[test]
    fn overflowing_row_sum_is_rejected() {
        let m = matrix(vec![vec![1e308, 1e308], vec![1.0, 1.0]]);
        let result = WeightEngine::calculate_weights(&m);
        assert_eq!(result, Err(InvalidInputError::NonFiniteRowSum { row: 0 }));
    }

    #[test]
    fn large_finite_rows_still_normalize() {
        let m = matrix(vec![vec![1e300, 1e300], vec![1.0, 1.0]]);
        let weights = WeightEngine::calculate_weights(&m).unwrap();
        assert_close(weights.values(), &[0.5, 0.5]);
    }

    #[test]
    fn weights_serialize_as_plain_array() {
        let m = matrix(vec![vec![1.0; 2]; 2]);
        let weights = WeightEngine::calculate_weights(&m).unwrap();
        assert_eq!(serde_json::to_value(&weights).unwrap(), serde_json::json!([0.5, 0.5]));
    }

    fn positive_square() -> impl Strategy<Value = Vec<Vec<f64>>> {
        (1usize..8).prop_flat_map(|n| {
            proptest::collection::vec(proptest::collection::vec(0.01f64..100.0, n), n)
        })
    }

    proptest! {
        #[test]
        fn weights_sum_to_one_and_are_non_negative(rows in positive_square()) {
            let m = PairwiseMatrix::try_new(rows).unwrap();
            let weights = WeightEngine::calculate_weights(&m).unwrap();
            prop_assert_eq!(weights.len(), m.size());
            prop_assert!((weights.sum() - 1.0).abs() < TOLERANCE);
            prop_assert!(weights.values().iter().all(|w| *w >= 0.0));
        }
    }
}
