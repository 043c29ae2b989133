//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.orderreport.toml` files.

use crate::analysis::MalformedRowPolicy;
use crate::models::{Locale, OutputFormat, SortOrder};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".orderreport.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Input settings.
    #[serde(default)]
    pub input: InputConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Input file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Orders file to read.
    #[serde(default = "default_path")]
    pub path: String,

    /// Field delimiter, a single ASCII character.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Fail on short rows instead of skipping them.
    #[serde(default)]
    pub strict: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            delimiter: default_delimiter(),
            strict: false,
        }
    }
}

fn default_path() -> String {
    "pedidos.csv".to_string()
}

fn default_delimiter() -> String {
    ",".to_string()
}

/// Report rendering settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Output format.
    #[serde(default)]
    pub format: OutputFormat,

    /// Ordering of entries in each section.
    #[serde(default)]
    pub sort: SortOrder,

    /// Language of labels and messages.
    #[serde(default)]
    pub lang: Locale,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence, but only where they were given.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref input) = args.input {
            self.input.path = input.to_string_lossy().into_owned();
        }
        if let Some(ref delimiter) = args.delimiter {
            self.input.delimiter = delimiter.clone();
        }
        if args.strict {
            self.input.strict = true;
        }

        if let Some(format) = args.format {
            self.report.format = format;
        }
        if let Some(sort) = args.sort {
            self.report.sort = sort;
        }
        if let Some(lang) = args.lang {
            self.report.lang = lang;
        }
    }

    /// How the aggregator treats short rows.
    pub fn malformed_row_policy(&self) -> MalformedRowPolicy {
        if self.input.strict {
            MalformedRowPolicy::Fail
        } else {
            MalformedRowPolicy::Skip
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
