//! Application layer - Commands and Handlers.
//!
//! This layer sits between callers and the domain engines. It parses request
//! payloads, applies configured limits, and shapes results for serialization.

pub mod handlers;

pub use handlers::{AnalysisError, AnalysisOperation, AnalysisService};
