//! Application handlers.
//!
//! Command handlers that validate payloads and invoke the analysis engines.

pub mod analysis;

pub use analysis::{
    AnalysisError, AnalysisOperation, AnalysisService, AssessConsistencyCommand,
    AssessConsistencyHandler, AssessConsistencyResult, CalculateRankingsCommand,
    CalculateRankingsHandler, CalculateRankingsResult, CalculateWeightsCommand,
    CalculateWeightsHandler, CalculateWeightsResult,
};
