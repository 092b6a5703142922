//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// Innomap - regulatory innovation dataset reports
///
/// Loads the innovations CSV and reports innovations per country,
/// per category and per year as Markdown or JSON.
///
/// Examples:
///   innomap --source innovations.csv
///   innomap --source https://example.org/innovations.csv --format json
///   innomap --category Tax,Finance --top 5
///   innomap --list-categories
///   innomap --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// CSV document to load (local path or http(s) URL)
    ///
    /// Defaults to the config file value, then `innovations.csv`.
    #[arg(short, long, value_name = "PATH|URL", env = "INNOMAP_SOURCE")]
    pub source: Option<String>,

    /// Restrict the country ranking to these categories (comma-separated)
    ///
    /// Matching is exact and case-sensitive. Example: --category Tax,Finance
    #[arg(short = 'C', long = "category", value_name = "NAMES", value_delimiter = ',')]
    pub categories: Vec<String>,

    /// Output file path for the report
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Number of countries to list in the ranking
    #[arg(long, value_name = "COUNT")]
    pub top: Option<usize>,

    /// Request timeout in seconds for URL sources
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Leave the timeline section out of the report
    #[arg(long)]
    pub no_timeline: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .innomap.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the category vocabulary and exit
    #[arg(long)]
    pub list_categories: bool,

    /// Generate a default .innomap.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(top) = self.top {
            if top == 0 {
                return Err("--top must be at least 1".to_string());
            }
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        if let Some(ref source) = self.source {
            if source.trim().is_empty() {
                return Err("Source must not be empty".to_string());
            }
        }

        if self.categories.iter().any(|c| c.trim().is_empty()) {
            return Err("Category names must not be empty".to_string());
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
