//! Aggregation engine: raw per-cell rows to per-location views

pub mod aggregator;

pub use aggregator::{normalize_key, Aggregator};
