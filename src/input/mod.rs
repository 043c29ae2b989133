//! Orders file loading.
//!
//! Opens the input and parses it into rows of text fields. The reader is
//! flexible about field counts so short rows reach the aggregator, which
//! decides what to do with them.

use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading the orders file.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("orders file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("failed to read rows from {}: {source}", path.display())]
    Csv { path: PathBuf, source: csv::Error },

    #[error("delimiter must be a single ASCII character other than a quote or line break, got {0:?}")]
    InvalidDelimiter(String),
}

/// Options for reading rows.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Field separator byte.
    pub delimiter: u8,
    /// Show a spinner with the row count while reading.
    pub show_progress: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            show_progress: false,
        }
    }
}

/// Validate a delimiter given as text.
pub fn parse_delimiter(text: &str) -> Result<u8, InputError> {
    match text.as_bytes() {
        [byte] if byte.is_ascii() && !matches!(byte, b'"' | b'\n' | b'\r') => Ok(*byte),
        _ => Err(InputError::InvalidDelimiter(text.to_string())),
    }
}

/// Load every row of the file at `path`, header included.
pub fn load_rows(path: &Path, options: &LoadOptions) -> Result<Vec<Vec<String>>, InputError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => InputError::NotFound {
            path: path.to_path_buf(),
        },
        _ => InputError::Open {
            path: path.to_path_buf(),
            source,
        },
    })?;

    debug!("Reading rows from {}", path.display());

    read_rows(file, options).map_err(|source| InputError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse rows from any reader.
pub fn read_rows<R: Read>(reader: R, options: &LoadOptions) -> Result<Vec<Vec<String>>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(options.delimiter)
        .from_reader(reader);

    let progress = row_spinner(options.show_progress);
    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
        progress.inc(1);
    }

    progress.finish_and_clear();
    debug!("Parsed {} rows", rows.len());

    Ok(rows)
}

fn row_spinner(visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {pos} rows read") {
        pb.set_style(style);
    }
    pb
}
