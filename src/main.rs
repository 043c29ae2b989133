//! order-report - delivery order summary CLI
//!
//! Reads an orders CSV file and prints orders per zone, units per product
//! and average delivery time per zone.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Error (missing or unreadable input, bad config, strict-mode row error)

use anyhow::{Context, Result};
use order_report::analysis;
use order_report::cli::Args;
use order_report::config::{Config, DEFAULT_CONFIG_FILE};
use order_report::input::{self, InputError, LoadOptions};
use order_report::models::OutputFormat;
use order_report::report::{self, Labels};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args)?;

    info!("order-report v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run_report(&args) {
        error!("Report failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .orderreport.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            DEFAULT_CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", DEFAULT_CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", DEFAULT_CONFIG_FILE);
    println!("   Edit it to change the input path, delimiter, sort order and language.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// `RUST_LOG` takes precedence over `--verbose`/`--quiet` when set.
/// Logs go to stderr so stdout carries only the report.
fn init_logging(args: &Args) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level().as_str().to_lowercase()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

/// Read, aggregate and render one orders file.
fn run_report(args: &Args) -> Result<()> {
    let start_time = Instant::now();

    let mut config = load_config(args)?;
    config.merge_with_args(args);

    let labels = Labels::for_locale(config.report.lang);
    let format = config.report.format;
    // JSON on stdout must stay parseable.
    let show_banners = !args.quiet && (format == OutputFormat::Text || args.output.is_some());

    debug!(
        "Format: {:?}, sort: {:?}, lang: {}",
        format, config.report.sort, config.report.lang
    );

    if show_banners {
        println!("{}", labels.greeting);
        println!("{}", labels.reading);
    }

    let path = PathBuf::from(&config.input.path);
    let load_options = LoadOptions {
        delimiter: input::parse_delimiter(&config.input.delimiter)?,
        show_progress: !args.quiet,
    };

    let rows = match input::load_rows(&path, &load_options) {
        Ok(rows) => rows,
        Err(e) => {
            // A missing file needs no further detail; read errors keep their cause.
            return Err(match e {
                InputError::NotFound { .. } => anyhow::anyhow!(labels.missing_file(&path)),
                _ => anyhow::Error::new(e).context(labels.unreadable_file(&path)),
            });
        }
    };
    info!("Read {} rows from {}", rows.len(), path.display());

    let aggregates = analysis::aggregate_rows(&rows, config.malformed_row_policy())
        .with_context(|| format!("Failed to aggregate {}", path.display()))?;

    if aggregates.stats.rows_skipped > 0 {
        warn!(
            "Skipped {} malformed rows (use --strict to fail instead)",
            aggregates.stats.rows_skipped
        );
    }
    if aggregates.stats.times_defaulted > 0 {
        warn!(
            "{} rows had a non-numeric delivery time, counted as 0 minutes",
            aggregates.stats.times_defaulted
        );
    }

    let output = match format {
        OutputFormat::Text => {
            report::generate_text_report(&aggregates, config.report.sort, config.report.lang)
        }
        OutputFormat::Json => {
            let report = report::build_report(&config.input.path, &aggregates, config.report.sort);
            report::generate_json_report(&report)?
        }
    };

    match args.output {
        Some(ref output_path) => {
            std::fs::write(output_path, &output).with_context(|| {
                format!("Failed to write report to {}", output_path.display())
            })?;
            info!("Report written to {}", output_path.display());
            if show_banners {
                println!("\n{} {}", labels.saved_to, output_path.display());
            }
        }
        None => {
            if show_banners {
                println!();
            }
            println!("{}", output.trim_end());
        }
    }

    if show_banners {
        println!("\n{}", labels.done);
    }

    debug!(
        "Finished in {:.3}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", DEFAULT_CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}
