//! Foundation module - Shared domain primitives.
//!
//! Error taxonomy used by every analysis engine and by the layers above them.

mod errors;

pub use errors::{ErrorCode, ErrorResponse, InvalidInputError, INVALID_INPUT_KIND};
