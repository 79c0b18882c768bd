//! Input size limits checked on raw JSON before parsing.

use serde_json::Value;

use crate::domain::foundation::InvalidInputError;

/// Looks up a required field in a request payload.
pub(crate) fn required_field<'a>(
    payload: &'a Value,
    field: &str,
) -> Result<&'a Value, InvalidInputError> {
    payload
        .get(field)
        .ok_or_else(|| InvalidInputError::missing_field(field))
}

/// Rejects matrices whose row count or any row length exceeds `max`.
///
/// Non-array values pass through; the matrix parser reports those.
pub(crate) fn enforce_dimension_limit(
    field: &str,
    value: &Value,
    max: usize,
) -> Result<(), InvalidInputError> {
    let Some(rows) = value.as_array() else {
        return Ok(());
    };

    let widest = rows
        .iter()
        .filter_map(Value::as_array)
        .map(Vec::len)
        .max()
        .unwrap_or(0);
    let actual = rows.len().max(widest);

    if actual > max {
        return Err(InvalidInputError::DimensionTooLarge {
            field: field.to_string(),
            max,
            actual,
        });
    }
    Ok(())
}
