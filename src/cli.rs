//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation. Every report option is optional here so that
//! values from `.orderreport.toml` survive unless overridden.

use crate::input::parse_delimiter;
use crate::models::{Locale, OutputFormat, SortOrder};
use clap::Parser;
use std::path::PathBuf;

/// order-report - summarize delivery orders from a CSV file
///
/// Counts orders per zone and units per product, and computes the
/// average delivery time per zone.
///
/// Examples:
///   order-report
///   order-report orders.csv --sort count
///   order-report orders.csv --lang es --format json -o report.json
///   order-report --init-config
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Orders file to read
    ///
    /// Columns: order_id, product, zone, delivery_time_minutes.
    /// Defaults to pedidos.csv, or the path in the config file.
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Write the report to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Ordering of entries in each section (key, count)
    #[arg(short, long, value_name = "ORDER")]
    pub sort: Option<SortOrder>,

    /// Language of labels and messages (en, es)
    #[arg(short, long, value_name = "LANG", env = "ORDER_REPORT_LANG")]
    pub lang: Option<Locale>,

    /// Field delimiter (a single ASCII character)
    #[arg(short, long, value_name = "CHAR")]
    pub delimiter: Option<String>,

    /// Fail on rows with fewer than four fields instead of skipping them
    #[arg(long)]
    pub strict: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .orderreport.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (report only, errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .orderreport.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref delimiter) = self.delimiter {
            parse_delimiter(delimiter).map_err(|e| e.to_string())?;
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
