//! Domain layer containing the analysis engines and their types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (error taxonomy)
//! - `analysis` - Pure domain services for decision analysis (AHP, TOPSIS)

pub mod analysis;
pub mod foundation;
