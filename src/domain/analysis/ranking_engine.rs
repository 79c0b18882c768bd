//! Ranking Engine - Fuzzy TOPSIS ranking of criteria from a decision matrix.
//!
//! The decision matrix is a square grid over the criteria: row i and column i
//! both belong to criterion i. Columns are normalized and supply the ideal
//! values; each row is then scored against those ideals and labeled with the
//! criterion name at its index.

use nalgebra::{DMatrix, RowDVector};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use std::cmp::Ordering;
use tracing::debug;

use super::matrix::{parse_matrix, parse_names, parse_vector, to_dmatrix};
use crate::domain::foundation::InvalidInputError;

/// Rows × columns matrix of finite scores.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionMatrix {
    values: DMatrix<f64>,
}

impl DecisionMatrix {
    /// JSON field name for this matrix.
    pub const FIELD: &'static str = "decision_matrix";

    /// Creates a decision matrix, validating shape and values.
    pub fn try_new(rows: Vec<Vec<f64>>) -> Result<Self, InvalidInputError> {
        Ok(Self {
            values: to_dmatrix(Self::FIELD, &rows)?,
        })
    }

    /// Parses and validates a decision matrix from JSON.
    pub fn from_json(value: &Value) -> Result<Self, InvalidInputError> {
        Self::try_new(parse_matrix(Self::FIELD, value)?)
    }

    /// Number of rows (alternatives).
    pub fn alternatives(&self) -> usize {
        self.values.nrows()
    }

    /// Number of columns (criteria).
    pub fn criteria(&self) -> usize {
        self.values.ncols()
    }

    /// The underlying matrix.
    pub fn values(&self) -> &DMatrix<f64> {
        &self.values
    }
}

/// Criterion labels, aligned with the decision matrix rows and columns. Duplicates allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriteriaNames(Vec<String>);

impl CriteriaNames {
    /// JSON field name for the labels.
    pub const FIELD: &'static str = "criteria_names";

    /// Creates criteria names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// Parses criteria names from a JSON array of strings.
    pub fn from_json(value: &Value) -> Result<Self, InvalidInputError> {
        Ok(Self(parse_names(Self::FIELD, value)?))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// Per-criterion weights applied to the normalized decision matrix.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CriterionWeights {
    /// Every criterion weighted 1.
    #[default]
    Uniform,
    /// Caller-supplied weights, one per criterion.
    Custom(Vec<f64>),
}

impl CriterionWeights {
    /// JSON field name for custom weights.
    pub const FIELD: &'static str = "criteria_weights";

    /// Parses custom weights from a JSON array of numbers, one per column.
    pub fn from_json(value: &Value) -> Result<Self, InvalidInputError> {
        Ok(CriterionWeights::Custom(parse_vector(Self::FIELD, value)?))
    }

    /// Expands to one weight per criterion.
    ///
    /// # Errors
    /// - Custom weights whose count differs from `criteria`
    /// - Negative or non-finite weights
    /// - All weights zero
    pub fn resolve(&self, criteria: usize) -> Result<Vec<f64>, InvalidInputError> {
        let weights = match self {
            CriterionWeights::Uniform => return Ok(vec![1.0; criteria]),
            CriterionWeights::Custom(weights) => weights,
        };

        if weights.len() != criteria {
            return Err(InvalidInputError::invalid_weights(format!(
                "expected {} weights, got {}",
                criteria,
                weights.len()
            )));
        }
        if let Some(index) = weights.iter().position(|w| !w.is_finite() || *w < 0.0) {
            return Err(InvalidInputError::invalid_weights(format!(
                "weight {} must be finite and non-negative, got {}",
                index, weights[index]
            )));
        }
        if weights.iter().all(|w| *w == 0.0) {
            return Err(InvalidInputError::invalid_weights("all weights are zero"));
        }

        Ok(weights.clone())
    }
}

/// Name-keyed values kept in insertion order.
///
/// Serializes as a JSON object. Inserting an existing name replaces its value
/// but keeps its original position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LabeledValues<T> {
    entries: Vec<(String, T)>,
}

impl<T> LabeledValues<T> {
    fn insert(&mut self, name: &str, value: T) {
        match self.entries.iter_mut().find(|(existing, _)| existing == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    /// Value for `name`, if present.
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Serialize> Serialize for LabeledValues<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Criterion name -> rank (1 = highest closeness), in rank order.
pub type RankingResult = LabeledValues<usize>;

/// TOPSIS figures for one criterion.
#[derive(Debug, Clone, PartialEq)]
pub struct CriterionCloseness {
    pub index: usize,
    pub name: String,
    pub positive_distance: f64,
    pub negative_distance: f64,
    pub closeness: f64,
    pub rank: usize,
}

/// Full TOPSIS outcome: per-criterion figures plus the ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct TopsisAnalysis {
    /// One entry per criterion, in input order.
    pub criteria: Vec<CriterionCloseness>,
    pub rankings: RankingResult,
    /// Criterion name -> closeness coefficient, in rank order.
    pub closeness: LabeledValues<f64>,
}

/// Fuzzy TOPSIS ranking.
pub struct RankingEngine;

impl RankingEngine {
    /// Ranks the criteria with equal weights.
    pub fn calculate_rankings(
        matrix: &DecisionMatrix,
        names: &CriteriaNames,
    ) -> Result<RankingResult, InvalidInputError> {
        Self::analyze(matrix, names, &CriterionWeights::Uniform).map(|analysis| analysis.rankings)
    }

    /// Runs TOPSIS and returns distances, closeness, and ranks.
    ///
    /// # Algorithm
    /// 1. Divide each column by its Euclidean norm and scale by its weight.
    /// 2. Ideal vectors, one entry per column: positive = column max,
    ///    negative = column min.
    /// 3. Row i distances = Euclidean distance from row i to each ideal.
    /// 4. closeness[i] = d⁻ / (d⁺ + d⁻), labeled with `names[i]`.
    /// 5. Stable sort by closeness descending; rank = position + 1, so exact
    ///    ties go to the lower index.
    ///
    /// # Errors
    /// - Names count differs from column count
    /// - Row count differs from column count (rows carry the names too)
    /// - A column norm of zero, or one that overflows
    /// - d⁺ + d⁻ zero or not finite for some row (e.g. a single criterion)
    pub fn analyze(
        matrix: &DecisionMatrix,
        names: &CriteriaNames,
        weights: &CriterionWeights,
    ) -> Result<TopsisAnalysis, InvalidInputError> {
        let size = matrix.criteria();
        if names.len() != size {
            return Err(InvalidInputError::CriteriaCountMismatch {
                expected: size,
                actual: names.len(),
            });
        }
        if matrix.alternatives() != size {
            return Err(InvalidInputError::NotSquare {
                field: DecisionMatrix::FIELD.to_string(),
                rows: matrix.alternatives(),
                columns: size,
            });
        }
        let weights = weights.resolve(size)?;

        let values = matrix.values();
        let norms: Vec<f64> = values.column_iter().map(|column| column.norm()).collect();
        for (column, &norm) in norms.iter().enumerate() {
            if norm == 0.0 {
                return Err(InvalidInputError::ZeroColumnNorm { column });
            }
            if !norm.is_finite() {
                return Err(InvalidInputError::NonFiniteColumnNorm { column });
            }
        }

        let weighted = DMatrix::from_fn(size, size, |i, j| values[(i, j)] / norms[j] * weights[j]);
        let positive_ideal =
            RowDVector::from_iterator(size, weighted.column_iter().map(|column| column.max()));
        let negative_ideal =
            RowDVector::from_iterator(size, weighted.column_iter().map(|column| column.min()));

        let mut figures = Vec::with_capacity(size);
        for (index, row) in weighted.row_iter().enumerate() {
            let positive_distance = row.metric_distance(&positive_ideal);
            let negative_distance = row.metric_distance(&negative_ideal);

            let total = positive_distance + negative_distance;
            if total == 0.0 || !total.is_finite() {
                return Err(InvalidInputError::DegenerateCloseness { criterion: index });
            }

            figures.push(CriterionCloseness {
                index,
                name: names.as_slice()[index].clone(),
                positive_distance,
                negative_distance,
                closeness: negative_distance / total,
                rank: 0,
            });
        }

        let mut order: Vec<usize> = (0..size).collect();
        order.sort_by(|&a, &b| {
            figures[b]
                .closeness
                .partial_cmp(&figures[a].closeness)
                .unwrap_or(Ordering::Equal)
        });

        let mut rankings = RankingResult::default();
        let mut closeness = LabeledValues::default();
        for (position, &i) in order.iter().enumerate() {
            let figure = &mut figures[i];
            figure.rank = position + 1;
            rankings.insert(&figure.name, figure.rank);
            closeness.insert(&figure.name, figure.closeness);
        }

        debug!(criteria = size, "Computed TOPSIS rankings");

        Ok(TopsisAnalysis {
            criteria: figures,
            rankings,
            closeness,
        })
    }
}
