//! Analysis handlers - JSON payloads in, serializable results out.
//!
//! - `fuzzy-ahp` → `CalculateWeightsHandler`
//! - `fuzzy-topsis` → `CalculateRankingsHandler`
//! - `assess-consistency` → `AssessConsistencyHandler`
//!
//! `AnalysisService` routes an `AnalysisOperation` to the right handler.
//! Size limits from `AnalysisConfig` are enforced before any parsing.

mod assess_consistency;
mod calculate_rankings;
mod calculate_weights;
mod limits;
mod service;

pub use assess_consistency::{
    AssessConsistencyCommand, AssessConsistencyHandler, AssessConsistencyResult,
};
pub use calculate_rankings::{
    CalculateRankingsCommand, CalculateRankingsHandler, CalculateRankingsResult,
    INCLUDE_CLOSENESS_FIELD,
};
pub use calculate_weights::{
    CalculateWeightsCommand, CalculateWeightsHandler, CalculateWeightsResult,
    CRITERIA_COUNT_FIELD, JUDGMENTS_FIELD,
};
pub use service::{AnalysisError, AnalysisOperation, AnalysisService};
