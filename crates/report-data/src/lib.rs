//! Data pipeline for the season report: raw export loading, normalization
//! into the canonical activity table, and derived-view aggregation.

pub mod aggregator;
pub mod loader;
pub mod normalizer;
