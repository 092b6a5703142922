//! Innomap - regulatory innovation dataset reports
//!
//! A CLI tool that loads the innovations CSV and writes a report of
//! innovations per country, category and year.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (bad arguments, config, failed load, unwritable output)

mod cli;
mod config;
mod report;

use anyhow::{Context, Result};
use cli::{Args, OutputFormat};
use config::Config;
use innomap::analysis::unknown_categories;
use innomap::{CategoryFilter, DataSource, LoadOptions, Loader};
use std::time::Duration;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args);

    info!("Innomap v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args).await {
        error!("Run failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .innomap.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(config::CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            config::CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", config::CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", config::CONFIG_FILE);
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level())
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Load the dataset and write the report.
async fn run(args: Args) -> Result<()> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let options = LoadOptions {
        timeout: Duration::from_secs(config.source.timeout_seconds),
        show_progress: !args.quiet,
    };

    let loader = Loader::new(DataSource::parse(&config.source.location), options);
    let dataset = loader
        .load()
        .await
        .context("Failed to load innovation data")?;

    if args.list_categories {
        for category in &dataset.categories {
            println!("{}", category);
        }
        return Ok(());
    }

    let filter: CategoryFilter = args.categories.iter().map(|c| c.trim()).collect();
    for unknown in unknown_categories(&filter, &dataset) {
        warn!("Category not found in dataset: {}", unknown);
    }

    let source = loader.source().to_string();
    let report = report::build_report(&dataset, &filter, &config.report, &source);

    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&report),
    };

    let output_path = &config.general.output;
    std::fs::write(output_path, &output)
        .with_context(|| format!("Failed to write report to {}", output_path))?;

    if !args.quiet {
        println!(
            "📊 Loaded {} innovations across {} categories",
            dataset.records.len(),
            dataset.categories.len()
        );
        println!(
            "   Countries: {} | Total: {} | Max per country: {}",
            report.stats.countries, report.stats.total_innovations, report.stats.max_per_country
        );
        println!("✅ Report saved to: {}", output_path);
    }

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", config::CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
