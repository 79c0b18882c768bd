//! Fuzzy Decision - Multi-criteria decision analysis
//!
//! This crate derives criterion weights with Fuzzy AHP and ranks criteria with
//! Fuzzy TOPSIS. Both engines are pure functions over crisp matrices; callers
//! hand in JSON-shaped payloads and get JSON-serializable results back.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
