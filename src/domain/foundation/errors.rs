//! Error types for the domain layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Kind reported by every [`InvalidInputError`] in structured failures.
pub const INVALID_INPUT_KIND: &str = "InvalidInputError";

/// Errors raised when an analysis input cannot be computed on.
///
/// This is the only error kind the analysis engines produce. Each variant
/// names a distinct cause so callers can report it precisely, but all of them
/// share the same kind (see [`InvalidInputError::kind`]).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInputError {
    #[error("Field '{field}' is required")]
    MissingField { field: String },

    #[error("Field '{field}' must be a non-empty matrix")]
    EmptyMatrix { field: String },

    #[error("Field '{field}' must be an array of arrays: {reason}")]
    NotAMatrix { field: String, reason: String },

    #[error("Field '{field}' must be square, got {rows} rows and {columns} columns")]
    NotSquare {
        field: String,
        rows: usize,
        columns: usize,
    },

    #[error("Field '{field}' row {row} has {actual} columns, expected {expected}")]
    RaggedRow {
        field: String,
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Field '{field}' entry ({row}, {column}) is not a number")]
    NonNumericEntry {
        field: String,
        row: usize,
        column: usize,
    },

    #[error("Field '{field}' entry ({row}, {column}) is not finite")]
    NonFiniteEntry {
        field: String,
        row: usize,
        column: usize,
    },

    #[error("Field '{field}' entry ({row}, {column}) is negative: {value}")]
    NegativeEntry {
        field: String,
        row: usize,
        column: usize,
        value: f64,
    },

    #[error("Pairwise matrix row {row} sums to {sum}, must be positive")]
    NonPositiveRowSum { row: usize, sum: f64 },

    #[error("Pairwise matrix row {row} sum overflows")]
    NonFiniteRowSum { row: usize },

    #[error("Decision matrix column {column} has zero norm")]
    ZeroColumnNorm { column: usize },

    #[error("Decision matrix column {column} norm overflows")]
    NonFiniteColumnNorm { column: usize },

    #[error("Closeness of criterion {criterion} is undefined: ideal distances are both zero or overflow")]
    DegenerateCloseness { criterion: usize },

    #[error("Expected {expected} criteria names to match the decision matrix columns, got {actual}")]
    CriteriaCountMismatch { expected: usize, actual: usize },

    #[error("Field '{field}' entry {index} is not a string")]
    NonStringName { field: String, index: usize },

    #[error("Field '{field}' must be a boolean")]
    NotABoolean { field: String },

    #[error("Criteria weights are invalid: {reason}")]
    InvalidWeights { reason: String },

    #[error("Judgment ({row}, {column}) is invalid: {reason}")]
    InvalidJudgment {
        row: usize,
        column: usize,
        reason: String,
    },

    #[error("Field '{field}' has dimension {actual}, maximum allowed is {max}")]
    DimensionTooLarge {
        field: String,
        max: usize,
        actual: usize,
    },
}

impl InvalidInputError {
    /// Creates a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        InvalidInputError::MissingField {
            field: field.into(),
        }
    }

    /// Creates an empty matrix error.
    pub fn empty_matrix(field: impl Into<String>) -> Self {
        InvalidInputError::EmptyMatrix {
            field: field.into(),
        }
    }

    /// Creates a not-a-matrix error.
    pub fn not_a_matrix(field: impl Into<String>, reason: impl Into<String>) -> Self {
        InvalidInputError::NotAMatrix {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid weights error.
    pub fn invalid_weights(reason: impl Into<String>) -> Self {
        InvalidInputError::InvalidWeights {
            reason: reason.into(),
        }
    }

    /// Creates an invalid judgment error.
    pub fn invalid_judgment(row: usize, column: usize, reason: impl Into<String>) -> Self {
        InvalidInputError::InvalidJudgment {
            row,
            column,
            reason: reason.into(),
        }
    }

    /// The error kind shared by every variant.
    pub fn kind(&self) -> &'static str {
        INVALID_INPUT_KIND
    }

    /// The stable code for this particular cause.
    pub fn code(&self) -> ErrorCode {
        match self {
            InvalidInputError::MissingField { .. } => ErrorCode::MissingField,
            InvalidInputError::EmptyMatrix { .. }
            | InvalidInputError::NotAMatrix { .. }
            | InvalidInputError::NotSquare { .. }
            | InvalidInputError::RaggedRow { .. }
            | InvalidInputError::CriteriaCountMismatch { .. }
            | InvalidInputError::DimensionTooLarge { .. } => ErrorCode::InvalidShape,
            InvalidInputError::NonNumericEntry { .. }
            | InvalidInputError::NonFiniteEntry { .. }
            | InvalidInputError::NegativeEntry { .. }
            | InvalidInputError::NonStringName { .. }
            | InvalidInputError::NotABoolean { .. }
            | InvalidInputError::InvalidWeights { .. }
            | InvalidInputError::InvalidJudgment { .. } => ErrorCode::InvalidValue,
            InvalidInputError::NonPositiveRowSum { .. }
            | InvalidInputError::NonFiniteRowSum { .. }
            | InvalidInputError::ZeroColumnNorm { .. }
            | InvalidInputError::NonFiniteColumnNorm { .. }
            | InvalidInputError::DegenerateCloseness { .. } => ErrorCode::DegenerateInput,
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    MissingField,
    InvalidShape,
    InvalidValue,
    DegenerateInput,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::MissingField => "MISSING_FIELD",
            ErrorCode::InvalidShape => "INVALID_SHAPE",
            ErrorCode::InvalidValue => "INVALID_VALUE",
            ErrorCode::DegenerateInput => "DEGENERATE_INPUT",
        };
        write!(f, "{}", s)
    }
}

/// Structured failure returned to callers in place of a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error kind, always `InvalidInputError` for analysis failures.
    pub error: String,
    pub code: ErrorCode,
    /// Human-readable cause.
    pub message: String,
}

impl From<&InvalidInputError> for ErrorResponse {
    fn from(err: &InvalidInputError) -> Self {
        Self {
            error: err.kind().to_string(),
            code: err.code(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_displays_correctly() {
        let err = InvalidInputError::missing_field("pairwise_matrix");
        assert_eq!(format!("{}", err), "Field 'pairwise_matrix' is required");
    }

    #[test]
    fn criteria_count_mismatch_displays_correctly() {
        let err = InvalidInputError::CriteriaCountMismatch {
            expected: 2,
            actual: 3,
        };
        assert_eq!(
            format!("{}", err),
            "Expected 2 criteria names to match the decision matrix columns, got 3"
        );
    }

    #[test]
    fn every_variant_reports_invalid_input_kind() {
        let errors = vec![
            InvalidInputError::empty_matrix("m"),
            InvalidInputError::NonPositiveRowSum { row: 0, sum: 0.0 },
            InvalidInputError::ZeroColumnNorm { column: 1 },
            InvalidInputError::invalid_weights("all zero"),
        ];
        for err in errors {
            assert_eq!(err.kind(), "InvalidInputError");
        }
    }

    #[test]
    fn codes_group_causes() {
        assert_eq!(
            InvalidInputError::ZeroColumnNorm { column: 0 }.code(),
            ErrorCode::DegenerateInput
        );
        assert_eq!(
            InvalidInputError::CriteriaCountMismatch {
                expected: 2,
                actual: 3
            }
            .code(),
            ErrorCode::InvalidShape
        );
        assert_eq!(
            InvalidInputError::NonFiniteEntry {
                field: "m".into(),
                row: 0,
                column: 0
            }
            .code(),
            ErrorCode::InvalidValue
        );
    }

    #[test]
    fn overflow_causes_are_degenerate_input() {
        assert_eq!(
            InvalidInputError::NonFiniteRowSum { row: 0 }.code(),
            ErrorCode::DegenerateInput
        );
        assert_eq!(
            InvalidInputError::NonFiniteColumnNorm { column: 0 }.code(),
            ErrorCode::DegenerateInput
        );
        assert_eq!(
            InvalidInputError::NotABoolean {
                field: "include_closeness".into()
            }
            .code(),
            ErrorCode::InvalidValue
        );
    }

    #[test]
    fn error_response_carries_kind_and_message() {
        let err = InvalidInputError::ZeroColumnNorm { column: 2 };
        let response = ErrorResponse::from(&err);
        assert_eq!(response.error, "InvalidInputError");
        assert_eq!(response.code, ErrorCode::DegenerateInput);
        assert_eq!(response.message, "Decision matrix column 2 has zero norm");
    }

    #[test]
    fn error_response_serializes_code_in_screaming_case() {
        let response = ErrorResponse::from(&InvalidInputError::missing_field("x"));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["code"], "MISSING_FIELD");
        assert_eq!(json["error"], "InvalidInputError");
    }
}
