//! JSON parsing shared by the weight and ranking engines.
//!
//! Payloads arrive as nested arrays. They are parsed into rows first so
//! errors can name the offending entry, then copied into a `DMatrix`.

use nalgebra::DMatrix;
use serde_json::Value;

use crate::domain::foundation::InvalidInputError;

/// Parses a JSON array of arrays of numbers into a row-major matrix.
///
/// Only the JSON structure and numeric content are checked here. Shape
/// rules (rectangular, square) belong to [`to_dmatrix`] and the typed
/// matrix constructors.
pub fn parse_matrix(field: &str, value: &Value) -> Result<Vec<Vec<f64>>, InvalidInputError> {
    let rows = value
        .as_array()
        .ok_or_else(|| InvalidInputError::not_a_matrix(field, "expected an array of rows"))?;

    rows.iter()
        .enumerate()
        .map(|(row, row_value)| -> Result<Vec<f64>, InvalidInputError> {
            let entries = row_value.as_array().ok_or_else(|| {
                InvalidInputError::not_a_matrix(field, format!("row {} is not an array", row))
            })?;
            entries
                .iter()
                .enumerate()
                .map(|(column, entry)| {
                    entry
                        .as_f64()
                        .ok_or_else(|| InvalidInputError::NonNumericEntry {
                            field: field.to_string(),
                            row,
                            column,
                        })
                })
                .collect()
        })
        .collect()
}

/// Parses a JSON array of numbers.
pub fn parse_vector(field: &str, value: &Value) -> Result<Vec<f64>, InvalidInputError> {
    let entries = value
        .as_array()
        .ok_or_else(|| InvalidInputError::not_a_matrix(field, "expected an array of numbers"))?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            entry
                .as_f64()
                .ok_or_else(|| InvalidInputError::NonNumericEntry {
                    field: field.to_string(),
                    row: 0,
                    column: index,
                })
        })
        .collect()
}

/// Parses a JSON array of strings.
pub fn parse_names(field: &str, value: &Value) -> Result<Vec<String>, InvalidInputError> {
    let entries = value
        .as_array()
        .ok_or_else(|| InvalidInputError::not_a_matrix(field, "expected an array of strings"))?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            entry
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| InvalidInputError::NonStringName {
                    field: field.to_string(),
                    index,
                })
        })
        .collect()
}

/// Builds a dense matrix from rows, checking that they form a non-empty
/// rectangle of finite numbers.
pub fn to_dmatrix(field: &str, rows: &[Vec<f64>]) -> Result<DMatrix<f64>, InvalidInputError> {
    let columns = match rows.first() {
        Some(first) if !first.is_empty() => first.len(),
        _ => return Err(InvalidInputError::empty_matrix(field)),
    };

    for (row, values) in rows.iter().enumerate() {
        if values.len() != columns {
            return Err(InvalidInputError::RaggedRow {
                field: field.to_string(),
                row,
                expected: columns,
                actual: values.len(),
            });
        }
        if let Some(column) = values.iter().position(|v| !v.is_finite()) {
            return Err(InvalidInputError::NonFiniteEntry {
                field: field.to_string(),
                row,
                column,
            });
        }
    }

    Ok(DMatrix::from_fn(rows.len(), columns, |i, j| rows[i][j]))
}
