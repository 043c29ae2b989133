//! Order analysis.
//!
//! Turns parsed rows into the per-zone and per-product aggregates.

pub mod aggregator;

pub use aggregator::*;
