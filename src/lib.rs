//! Innomap - regulatory innovation dataset core.
//!
//! Loads the innovations CSV into typed records and derives the aggregate
//! views a dashboard renders: innovations per country (optionally filtered
//! by category), per category, and per year.
//!
//! ```no_run
//! use innomap::{aggregate_by_country, aggregate_by_year, DataSource, LoadOptions, Loader};
//!
//! # async fn run() -> Result<(), innomap::LoadError> {
//! let loader = Loader::new(DataSource::parse("innovations.csv"), LoadOptions::default());
//! let dataset = loader.load().await?;
//!
//! let countries = aggregate_by_country(&dataset.records, None);
//! let timeline = aggregate_by_year(&dataset.records);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod error;
pub mod loader;
pub mod models;
pub mod parser;

pub use analysis::{
    aggregate_by_category, aggregate_by_country, aggregate_by_year, dataset_stats,
    project_highlights, top_countries,
};
pub use error::{LoadError, LoadResult};
pub use loader::{load, DataSource, LoadOptions, Loader};
pub use models::{
    CategoryCount, CategoryFilter, CountryCount, Dataset, DatasetStats, InnovationRecord,
    ProjectHighlight, TimelineEntry,
};
pub use parser::{parse_document, parse_line};
