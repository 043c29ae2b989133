//! Data models for the order report.
//!
//! This module contains the row view handed to the aggregator, the
//! aggregate mappings it produces, and the serializable report shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Minimum number of fields a data row must carry.
pub const ROW_FIELD_COUNT: usize = 4;

/// Zone name to number of orders delivered there.
pub type ZoneCounts = HashMap<String, u64>;

/// Product name to number of units ordered.
pub type ProductCounts = HashMap<String, u64>;

/// Zone name to delivery times in minutes, in row order.
pub type DeliveryTimes = HashMap<String, Vec<i64>>;

/// Output format for the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text (default)
    #[default]
    Text,
    /// JSON format
    Json,
}

/// Ordering of entries within each report section.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending by zone or product name
    #[default]
    Key,
    /// Descending by value, ties broken by name
    Count,
}

/// Language used for report labels and console messages.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English
    #[default]
    En,
    /// Spanish
    Es,
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => write!(f, "en"),
            Locale::Es => write!(f, "es"),
        }
    }
}

/// Borrowed view of one data row.
///
/// Fields are positional: `order_id, product, zone, delivery_time`.
/// Anything past the fourth field is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderRecord<'a> {
    pub order_id: &'a str,
    pub product: &'a str,
    pub zone: &'a str,
    /// Raw delivery time text, not yet parsed.
    pub delivery_time: &'a str,
}

impl<'a> OrderRecord<'a> {
    /// Extract the positional fields, or `None` if the row is too short.
    pub fn from_fields<S: AsRef<str>>(fields: &'a [S]) -> Option<Self> {
        if fields.len() < ROW_FIELD_COUNT {
            return None;
        }

        Some(Self {
            order_id: fields[0].as_ref(),
            product: fields[1].as_ref(),
            zone: fields[2].as_ref(),
            delivery_time: fields[3].as_ref(),
        })
    }
}

/// A data row left out of the aggregates because it was too short.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// 1-based row number in the input; the header is line 1.
    pub line: usize,
    /// Number of fields the row actually had.
    pub field_count: usize,
}

/// Counters collected during one aggregation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateStats {
    /// Data rows seen, header excluded.
    pub rows_read: usize,
    /// Rows that contributed to the aggregates.
    pub rows_aggregated: usize,
    /// Rows dropped for having too few fields.
    pub rows_skipped: usize,
    /// Rows whose delivery time was not an integer and counted as zero.
    pub times_defaulted: usize,
}

/// The three aggregates built from one input, plus run statistics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderAggregates {
    pub zone_counts: ZoneCounts,
    pub product_counts: ProductCounts,
    pub delivery_times: DeliveryTimes,
    pub stats: AggregateStats,
    pub skipped: Vec<SkippedRow>,
}

impl OrderAggregates {
    /// Fold one order into all three mappings.
    pub fn record(&mut self, zone: &str, product: &str, minutes: i64) {
        *self.zone_counts.entry(zone.to_string()).or_default() += 1;
        *self.product_counts.entry(product.to_string()).or_default() += 1;
        self.delivery_times
            .entry(zone.to_string())
            .or_default()
            .push(minutes);
    }

    /// Total orders across every zone.
    pub fn total_orders(&self) -> u64 {
        self.zone_counts.values().sum()
    }

    /// Total units across every product.
    pub fn total_units(&self) -> u64 {
        self.product_counts.values().sum()
    }

    /// Returns true when no row was aggregated.
    pub fn is_empty(&self) -> bool {
        self.zone_counts.is_empty()
    }
}

/// One `key: value` line of a report section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry<T> {
    pub key: String,
    pub value: T,
}

/// Metadata about the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Path of the input file.
    pub source: String,
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Counters from the aggregation run.
    pub stats: AggregateStats,
}

/// The complete report in its serializable form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub orders_by_zone: Vec<ReportEntry<u64>>,
    pub units_by_product: Vec<ReportEntry<u64>>,
    pub average_minutes_by_zone: Vec<ReportEntry<f64>>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub skipped_rows: Vec<SkippedRow>,
}
