//! Order report - delivery order summaries from CSV files
//!
//! Reads a table of `order_id, product, zone, delivery_time_minutes` rows
//! and reports orders per zone, units per product and the average
//! delivery time per zone.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod input;
pub mod models;
pub mod report;
