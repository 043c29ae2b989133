//! Order aggregation and statistics.
//!
//! A single pass over the parsed rows builds orders per zone, units per
//! product and delivery times per zone. Averages are derived afterwards.

use crate::models::{DeliveryTimes, OrderAggregates, OrderRecord, SkippedRow, ROW_FIELD_COUNT};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, warn};

/// Minutes recorded for a row whose delivery time is not an integer.
pub const DEFAULT_DELIVERY_TIME: i64 = 0;

/// What to do with a data row that has fewer than four fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedRowPolicy {
    /// Leave the row out, log it and keep going.
    #[default]
    Skip,
    /// Abort the whole run.
    Fail,
}

/// Errors raised while aggregating rows.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AggregateError {
    #[error("row {line} has {field_count} fields, expected at least {}", ROW_FIELD_COUNT)]
    MalformedRow { line: usize, field_count: usize },
}

/// Parse a delivery time in whole minutes.
///
/// Returns `None` when the text is not a decimal integer; callers fall back
/// to [`DEFAULT_DELIVERY_TIME`].
pub fn parse_delivery_time(text: &str) -> Option<i64> {
    text.parse::<i64>().ok()
}

/// Aggregate order rows.
///
/// The first row is always treated as the header and discarded without
/// looking at it. Short rows are handled according to `policy`.
pub fn aggregate_rows<I, R, S>(
    rows: I,
    policy: MalformedRowPolicy,
) -> Result<OrderAggregates, AggregateError>
where
    I: IntoIterator<Item = R>,
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let mut aggregates = OrderAggregates::default();

    for (index, row) in rows.into_iter().enumerate().skip(1) {
        let line = index + 1;
        let fields = row.as_ref();
        aggregates.stats.rows_read += 1;

        let Some(record) = OrderRecord::from_fields(fields) else {
            let field_count = fields.len();
            match policy {
                MalformedRowPolicy::Skip => {
                    warn!(
                        "Skipping row {}: {} fields, expected {}",
                        line, field_count, ROW_FIELD_COUNT
                    );
                    aggregates.stats.rows_skipped += 1;
                    aggregates.skipped.push(SkippedRow { line, field_count });
                    continue;
                }
                MalformedRowPolicy::Fail => {
                    return Err(AggregateError::MalformedRow { line, field_count });
                }
            }
        };

        let minutes = match parse_delivery_time(record.delivery_time) {
            Some(minutes) => minutes,
            None => {
                debug!(
                    "Row {}: delivery time {:?} is not an integer, using {}",
                    line, record.delivery_time, DEFAULT_DELIVERY_TIME
                );
                aggregates.stats.times_defaulted += 1;
                DEFAULT_DELIVERY_TIME
            }
        };

        aggregates.record(record.zone, record.product, minutes);
        aggregates.stats.rows_aggregated += 1;
    }

    debug!(
        "Aggregated {} of {} rows into {} zones and {} products",
        aggregates.stats.rows_aggregated,
        aggregates.stats.rows_read,
        aggregates.zone_counts.len(),
        aggregates.product_counts.len()
    );

    Ok(aggregates)
}

/// Arithmetic mean of a zone's delivery times.
///
/// Sums as 128-bit integers so any list of `i64` values fits, then divides
/// as floating point. Returns `None` for an empty slice.
pub fn average_minutes(times: &[i64]) -> Option<f64> {
    if times.is_empty() {
        return None;
    }

    let total: i128 = times.iter().map(|&t| i128::from(t)).sum();
    Some(total as f64 / times.len() as f64)
}

/// Average delivery time for every zone.
pub fn zone_averages(delivery_times: &DeliveryTimes) -> HashMap<String, f64> {
    delivery_times
        .iter()
        .filter_map(|(zone, times)| average_minutes(times).map(|avg| (zone.clone(), avg)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AggregateStats;

    const HEADER: [&str; 4] = ["id_pedido", "producto", "zona", "tiempo_entrega_min"];

    fn rows(data: &[[&str; 4]]) -> Vec<Vec<String>> {
        std::iter::once(&HEADER)
            .chain(data.iter())
            .map(|row| row.iter().map(|f| f.to_string()).collect())
            .collect()
    }

    fn scenario_a() -> Vec<Vec<String>> {
        rows(&[
            ["101", "pizza", "centro", "25"],
            ["102", "hamburguesa", "norte", "35"],
            ["103", "pizza", "sur", "15"],
            ["104", "sushi", "centro", "30"],
            ["105", "hamburguesa", "norte", "40"],
            ["106", "pizza", "centro", "20"],
            ["107", "pizza", "centro", "10"],
            ["108", "sushi", "norte", "30"],
        ])
    }

    fn assert_consistent(aggregates: &OrderAggregates) {
        let rows = aggregates.stats.rows_aggregated as u64;
        assert_eq!(aggregates.total_orders(), rows);
        assert_eq!(aggregates.total_units(), rows);
        assert_eq!(aggregates.zone_counts.len(), aggregates.delivery_times.len());
        for (zone, count) in &aggregates.zone_counts {
            assert_eq!(aggregates.delivery_times[zone].len() as u64, *count);
        }
    }

    #[test]
    fn test_scenario_a() {
        let aggregates = aggregate_rows(scenario_a(), MalformedRowPolicy::Skip).unwrap();

        assert_eq!(aggregates.zone_counts["centro"], 4);
        assert_eq!(aggregates.zone_counts["norte"], 3);
        assert_eq!(aggregates.zone_counts["sur"], 1);
        assert_eq!(aggregates.product_counts["pizza"], 4);
        assert_eq!(aggregates.product_counts["hamburguesa"], 2);
        assert_eq!(aggregates.product_counts["sushi"], 2);
        assert_eq!(aggregates.delivery_times["centro"], vec![25, 30, 20, 10]);
        assert_eq!(aggregates.stats.rows_read, 8);
        assert_eq!(aggregates.stats.rows_aggregated, 8);
        assert_consistent(&aggregates);

        let averages = zone_averages(&aggregates.delivery_times);
        assert_eq!(averages["norte"], 35.0);
        assert_eq!(averages["centro"], 21.25);
        assert_eq!(averages["sur"], 15.0);
    }

    #[test]
    fn test_scenario_b() {
        let input = rows(&[
            ["101", "pizza", "ciudad", "10"],
            ["102", "hamburguesa", "ciudad", "15"],
            ["103", "sushi", "campo", "25"],
        ]);
        let aggregates = aggregate_rows(input, MalformedRowPolicy::Skip).unwrap();

        assert_eq!(aggregates.zone_counts["ciudad"], 2);
        assert_eq!(aggregates.zone_counts["campo"], 1);
        assert_eq!(
            average_minutes(&aggregates.delivery_times["ciudad"]),
            Some(12.5)
        );
        assert_consistent(&aggregates);
    }

    #[test]
    fn test_header_is_never_aggregated() {
        // A header that looks exactly like data is still dropped.
        let input = vec![
            vec!["1", "pizza", "centro", "10"],
            vec!["2", "sushi", "norte", "20"],
        ];
        let aggregates = aggregate_rows(input, MalformedRowPolicy::Skip).unwrap();

        assert_eq!(aggregates.stats.rows_read, 1);
        assert!(!aggregates.zone_counts.contains_key("centro"));
        assert_eq!(aggregates.zone_counts["norte"], 1);
    }

    #[test]
    fn test_header_only() {
        let aggregates = aggregate_rows(rows(&[]), MalformedRowPolicy::Fail).unwrap();

        assert!(aggregates.is_empty());
        assert!(aggregates.product_counts.is_empty());
        assert!(aggregates.delivery_times.is_empty());
        assert_eq!(aggregates.stats, AggregateStats::default());
    }

    #[test]
    fn test_no_rows_at_all() {
        let input: Vec<Vec<String>> = Vec::new();
        let aggregates = aggregate_rows(input, MalformedRowPolicy::Skip).unwrap();
        assert!(aggregates.is_empty());
    }

    #[test]
    fn test_single_row_average_is_exact() {
        let input = rows(&[["1", "pizza", "centro", "25"]]);
        let aggregates = aggregate_rows(input, MalformedRowPolicy::Skip).unwrap();
        assert_eq!(
            average_minutes(&aggregates.delivery_times["centro"]),
            Some(25.0)
        );
    }

    #[test]
    fn test_unparseable_time_defaults_to_zero() {
        let input = rows(&[
            ["1", "pizza", "centro", "abc"],
            ["2", "pizza", "centro", "20"],
            ["3", "sushi", "centro", " 30"],
        ]);
        let aggregates = aggregate_rows(input, MalformedRowPolicy::Fail).unwrap();

        assert_eq!(aggregates.zone_counts["centro"], 3);
        assert_eq!(aggregates.product_counts["pizza"], 2);
        assert_eq!(
            aggregates.delivery_times["centro"],
            vec![DEFAULT_DELIVERY_TIME, 20, DEFAULT_DELIVERY_TIME]
        );
        assert_eq!(aggregates.stats.times_defaulted, 2);
        assert_consistent(&aggregates);
    }

    #[test]
    fn test_short_row_skipped() {
        let input = vec![
            vec!["id", "product", "zone", "time"],
            vec!["1", "pizza", "centro", "10"],
            vec!["2", "sushi"],
            vec!["3", "pizza", "norte", "30"],
        ];
        let aggregates = aggregate_rows(input, MalformedRowPolicy::Skip).unwrap();

        assert_eq!(aggregates.stats.rows_read, 3);
        assert_eq!(aggregates.stats.rows_aggregated, 2);
        assert_eq!(aggregates.stats.rows_skipped, 1);
        assert_eq!(
            aggregates.skipped,
            vec![SkippedRow {
                line: 3,
                field_count: 2
            }]
        );
        assert!(!aggregates.product_counts.contains_key("sushi"));
        assert_consistent(&aggregates);
    }

    #[test]
    fn test_short_row_fails_in_strict_mode() {
        let input = vec![
            vec!["id", "product", "zone", "time"],
            vec!["1", "pizza", "centro", "10"],
            vec!["2", "sushi", "norte"],
        ];
        let err = aggregate_rows(input, MalformedRowPolicy::Fail).unwrap_err();

        assert_eq!(
            err,
            AggregateError::MalformedRow {
                line: 3,
                field_count: 3
            }
        );
        assert_eq!(
            err.to_string(),
            "row 3 has 3 fields, expected at least 4"
        );
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let input = scenario_a();
        let first = aggregate_rows(&input, MalformedRowPolicy::Skip).unwrap();
        let second = aggregate_rows(&input, MalformedRowPolicy::Skip).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_delivery_time() {
        assert_eq!(parse_delivery_time("25"), Some(25));
        assert_eq!(parse_delivery_time("+7"), Some(7));
        assert_eq!(parse_delivery_time("-3"), Some(-3));
        assert_eq!(parse_delivery_time(""), None);
        assert_eq!(parse_delivery_time("12.5"), None);
    }

    #[test]
    fn test_average_minutes() {
        assert_eq!(average_minutes(&[]), None);
        assert_eq!(average_minutes(&[10, 15]), Some(12.5));

        // Sums past i32 range stay exact.
        let big = i64::from(i32::MAX);
        assert_eq!(average_minutes(&[big, big]), Some(big as f64));
    }

    #[test]
    fn test_average_minutes_past_i64_range() {
        let input = rows(&[
            ["1", "pizza", "centro", "9223372036854775807"],
            ["2", "pizza", "centro", "1"],
        ]);
        let aggregates = aggregate_rows(input, MalformedRowPolicy::Fail).unwrap();
        assert_eq!(aggregates.stats.times_defaulted, 0);

        let average = average_minutes(&aggregates.delivery_times["centro"]).unwrap();
        assert!(average > 0.0);
        assert_eq!(average, (i64::MAX as f64 + 1.0) / 2.0);

        let negative = average_minutes(&[i64::MIN, -1]).unwrap();
        assert!(negative < 0.0);
    }
}
