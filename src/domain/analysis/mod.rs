//! Analysis Module - Pure domain services for multi-criteria decision analysis.
//!
//! This module contains stateless functions that turn caller-supplied
//! matrices into criterion weights and rankings.
//!
//! # Components
//!
//! - `WeightEngine` - Fuzzy AHP weights from a pairwise comparison matrix
//! - `ConsistencyChecker` - Saaty consistency ratio for the same matrix
//! - `RankingEngine` - Fuzzy TOPSIS ranking of criteria from a square decision matrix
//!
//! # Design Philosophy
//!
//! All functions are pure (no side effects) and stateless. Every call
//! allocates and drops its own matrices, so concurrent callers need no
//! locking. Despite the method names, inputs are crisp numbers; there is no
//! fuzzy-number arithmetic.

mod consistency;
mod matrix;
mod ranking_engine;
mod weight_engine;

pub use consistency::{
    ConsistencyChecker, ConsistencyReport, DEFAULT_CONSISTENCY_THRESHOLD, RANDOM_INDEX,
};
pub use ranking_engine::{
    CriteriaNames, CriterionCloseness, CriterionWeights, DecisionMatrix, LabeledValues,
    RankingEngine, RankingResult, TopsisAnalysis,
};
pub use weight_engine::{Judgment, PairwiseMatrix, WeightEngine, WeightVector};
