//! Tally: Dataset Aggregation & Reporting Library
//!
//! A library for cleaning time-indexed CSV datasets, computing grouped
//! aggregates and derived metrics, and emitting chart/summary artifacts.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
