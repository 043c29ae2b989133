//! Order report generation.
//!
//! Renders the aggregates as the three-section text report, or as JSON.
//! Map iteration order is arbitrary, so every section is sorted here.

use super::labels::Labels;
use crate::analysis::zone_averages;
use crate::models::{
    Locale, OrderAggregates, Report, ReportEntry, ReportMetadata, SortOrder,
};
use anyhow::Result;
use chrono::Utc;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Generate the text report.
pub fn generate_text_report(aggregates: &OrderAggregates, sort: SortOrder, locale: Locale) -> String {
    let labels = Labels::for_locale(locale);
    let averages = zone_averages(&aggregates.delivery_times);

    let mut output = String::new();

    output.push_str(&format!("--- 📊 {} ---\n", labels.title));

    output.push_str(&generate_count_section(
        labels.orders_by_zone,
        labels.orders_unit,
        &sorted_entries(&aggregates.zone_counts, sort),
    ));

    output.push_str(&generate_count_section(
        labels.popular_products,
        labels.units_unit,
        &sorted_entries(&aggregates.product_counts, sort),
    ));

    output.push_str(&generate_average_section(
        labels,
        &sorted_entries(&averages, sort),
    ));

    output
}

/// Generate a section of `- key: count unit` lines.
fn generate_count_section(header: &str, unit: &str, entries: &[(&str, u64)]) -> String {
    let mut section = String::new();

    section.push_str(&format!("\n{}\n", header));
    for (key, count) in entries {
        section.push_str(&format!("- {}: {} {}\n", key, count, unit));
    }

    section
}

/// Generate the average delivery time section, two decimals per zone.
fn generate_average_section(labels: &Labels, entries: &[(&str, f64)]) -> String {
    let mut section = String::new();

    section.push_str(&format!("\n{}\n", labels.average_time_by_zone));
    for (zone, average) in entries {
        section.push_str(&format!(
            "- {}: {:.2} {}\n",
            zone, average, labels.minutes_unit
        ));
    }

    section
}

/// Sort map entries for display.
fn sorted_entries<V: Copy + PartialOrd>(map: &HashMap<String, V>, sort: SortOrder) -> Vec<(&str, V)> {
    let mut entries: Vec<(&str, V)> = map.iter().map(|(k, v)| (k.as_str(), *v)).collect();

    match sort {
        SortOrder::Key => entries.sort_by(|a, b| a.0.cmp(b.0)),
        SortOrder::Count => entries.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        }),
    }

    entries
}

fn to_report_entries<V: Copy + PartialOrd>(map: &HashMap<String, V>, sort: SortOrder) -> Vec<ReportEntry<V>> {
    sorted_entries(map, sort)
        .into_iter()
        .map(|(key, value)| ReportEntry {
            key: key.to_string(),
            value,
        })
        .collect()
}

/// Build the serializable report.
pub fn build_report(source: &str, aggregates: &OrderAggregates, sort: SortOrder) -> Report {
    let averages = zone_averages(&aggregates.delivery_times);

    Report {
        metadata: ReportMetadata {
            source: source.to_string(),
            generated_at: Utc::now(),
            stats: aggregates.stats,
        },
        orders_by_zone: to_report_entries(&aggregates.zone_counts, sort),
        units_by_product: to_report_entries(&aggregates.product_counts, sort),
        average_minutes_by_zone: to_report_entries(&averages, sort),
        skipped_rows: aggregates.skipped.clone(),
    }
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}
