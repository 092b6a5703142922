//! Report assembly.
//!
//! Turns a loaded dataset into the aggregate views shown to the user and
//! bundles them, with metadata, into a serializable [`Report`].

pub mod generator;

pub use generator::*;

use crate::config::ReportConfig;
use chrono::{DateTime, Utc};
use innomap::analysis::{
    aggregate_by_category, aggregate_by_country, aggregate_by_year, dataset_stats,
    project_highlights, top_countries,
};
use innomap::{
    CategoryCount, CategoryFilter, CountryCount, Dataset, DatasetStats, ProjectHighlight,
    TimelineEntry,
};
use serde::{Deserialize, Serialize};

/// Metadata about the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Location the dataset was loaded from.
    pub source: String,
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Number of valid records.
    pub records: usize,
    /// Number of rows dropped during parsing.
    pub skipped_rows: usize,
    /// Category vocabulary of the dataset.
    pub categories: Vec<String>,
    /// Categories the country ranking is restricted to (empty for all).
    pub category_filter: Vec<String>,
}

/// The complete innovation report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    /// Headline numbers for the (filtered) country ranking.
    pub stats: DatasetStats,
    /// Top countries of the ranking.
    pub countries: Vec<CountryCount>,
    /// Total number of countries in the ranking, before truncation.
    pub total_countries: usize,
    /// Counts for every category, unfiltered.
    pub categories: Vec<CategoryCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Vec<TimelineEntry>>,
    pub highlights: Vec<ProjectHighlight>,
}

/// Build a report from a dataset.
///
/// The category filter only affects the country ranking and its statistics;
/// the category and timeline views always cover the whole dataset.
pub fn build_report(
    dataset: &Dataset,
    filter: &CategoryFilter,
    config: &ReportConfig,
    source: &str,
) -> Report {
    let all_countries = aggregate_by_country(&dataset.records, Some(filter));
    let stats = dataset_stats(&all_countries);

    let mut timeline = config
        .include_timeline
        .then(|| aggregate_by_year(&dataset.records));
    if !config.include_projects {
        for entry in timeline.iter_mut().flatten() {
            entry.projects.clear();
        }
    }

    let mut highlights = project_highlights(&dataset.records);
    highlights.truncate(config.max_highlights);

    Report {
        metadata: ReportMetadata {
            source: source.to_string(),
            generated_at: Utc::now(),
            records: dataset.records.len(),
            skipped_rows: dataset.skipped_rows,
            categories: dataset.categories.clone(),
            category_filter: filter.sorted(),
        },
        stats,
        countries: top_countries(&all_countries, config.top_countries).to_vec(),
        total_countries: all_countries.len(),
        categories: aggregate_by_category(&dataset.records),
        timeline,
        highlights,
    }
}
