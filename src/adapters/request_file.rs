//! Request File Adapter
//!
//! Reads analysis request documents from disk or a stream. JSON is the
//! default; files ending in `.yaml` or `.yml` are read as YAML. Either way
//! the result is a `serde_json::Value` ready for the analysis handlers.

use serde_json::Value;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Errors reading a request document.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Failed to read request: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed JSON request: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed YAML request: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Request must be an object, got {0}")]
    NotAnObject(&'static str),
}

/// Encoding of a request document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestFormat {
    #[default]
    Json,
    Yaml,
}

impl RequestFormat {
    /// Picks the format from a file extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                RequestFormat::Yaml
            }
            _ => RequestFormat::Json,
        }
    }
}

/// Parses a request document. The top level must be an object.
pub fn parse_request(text: &str, format: RequestFormat) -> Result<Value, RequestError> {
    let value: Value = match format {
        RequestFormat::Json => serde_json::from_str(text)?,
        RequestFormat::Yaml => serde_yaml::from_str(text)?,
    };

    match value {
        Value::Object(_) => Ok(value),
        Value::Array(_) => Err(RequestError::NotAnObject("an array")),
        Value::String(_) => Err(RequestError::NotAnObject("a string")),
        Value::Number(_) => Err(RequestError::NotAnObject("a number")),
        Value::Bool(_) => Err(RequestError::NotAnObject("a boolean")),
        Value::Null => Err(RequestError::NotAnObject("null")),
    }
}

/// Reads and parses a request from any reader (e.g. stdin).
pub fn read_request<R: Read>(mut reader: R, format: RequestFormat) -> Result<Value, RequestError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_request(&text, format)
}

/// Reads and parses a request file, choosing the format by extension.
pub fn read_request_file(path: &Path) -> Result<Value, RequestError> {
    let text = std::fs::read_to_string(path)?;
    parse_request(&text, RequestFormat::from_path(path))
}
