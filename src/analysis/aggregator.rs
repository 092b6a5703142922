//! Aggregate views over innovation records.
//!
//! Every function here is pure: it reads the record slice and returns a
//! freshly allocated result. Counts are sorted descending with ties kept in
//! order of first appearance.

use crate::models::{
    CategoryCount, CategoryFilter, CountryCount, Dataset, DatasetStats, InnovationRecord,
    ProjectHighlight, TimelineEntry,
};
use std::collections::HashMap;
use tracing::trace;

/// Count occurrences of each key, remembering first-appearance order.
fn count_in_order<I>(keys: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = String>,
{
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for key in keys {
        match positions.get(&key) {
            Some(&pos) => counts[pos].1 += 1,
            None => {
                positions.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }

    // Stable sort keeps first-appearance order among equal counts.
    counts.sort_by_key(|(_, count)| std::cmp::Reverse(*count));
    counts
}

/// Uppercase the first character and leave the rest untouched.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Count innovations per country.
///
/// Countries are grouped case-insensitively and displayed lowercased with
/// only the first character uppercased ("South Korea" becomes "South korea").
/// When `filter` is `None` or empty every record counts; otherwise only
/// records whose category is in the filter.
pub fn aggregate_by_country(
    records: &[InnovationRecord],
    filter: Option<&CategoryFilter>,
) -> Vec<CountryCount> {
    let filter = filter.filter(|f| !f.is_empty());

    let keys = records
        .iter()
        .filter(|r| filter.map_or(true, |f| f.contains(&r.category)))
        .map(|r| r.country.to_lowercase());

    let counts: Vec<CountryCount> = count_in_order(keys)
        .into_iter()
        .map(|(country, count)| CountryCount {
            country: capitalize_first(&country),
            count,
        })
        .collect();

    trace!("Aggregated {} countries", counts.len());
    counts
}

/// Count innovations per category, by exact category string.
pub fn aggregate_by_category(records: &[InnovationRecord]) -> Vec<CategoryCount> {
    count_in_order(records.iter().map(|r| r.category.clone()))
        .into_iter()
        .map(|(category, count)| CategoryCount { category, count })
        .collect()
}

/// Whether `when` is exactly four ASCII digits.
pub fn is_year(when: &str) -> bool {
    when.len() == 4 && when.bytes().all(|b| b.is_ascii_digit())
}

/// Build the timeline: one entry per four-digit year, ascending.
///
/// Records whose `when` is not a four-digit year are left out. Each entry
/// lists the non-empty names of its records in source order.
pub fn aggregate_by_year(records: &[InnovationRecord]) -> Vec<TimelineEntry> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<TimelineEntry> = Vec::new();

    for record in records.iter().filter(|r| is_year(&r.when)) {
        let pos = *positions.entry(record.when.as_str()).or_insert_with(|| {
            entries.push(TimelineEntry {
                year: record.when.clone(),
                count: 0,
                projects: Vec::new(),
            });
            entries.len() - 1
        });

        let entry = &mut entries[pos];
        entry.count += 1;

        let name = record.name.trim();
        if !name.is_empty() {
            entry.projects.push(name.to_string());
        }
    }

    entries.sort_by(|a, b| a.year.cmp(&b.year));
    entries
}

/// Headline numbers for a country aggregate.
pub fn dataset_stats(countries: &[CountryCount]) -> DatasetStats {
    DatasetStats {
        countries: countries.len(),
        total_innovations: countries.iter().map(|c| c.count).sum(),
        max_per_country: countries.iter().map(|c| c.count).max().unwrap_or(0),
    }
}

/// The first `n` entries of a country aggregate.
pub fn top_countries(countries: &[CountryCount], n: usize) -> &[CountryCount] {
    &countries[..n.min(countries.len())]
}

/// Records with a non-empty project, in source order.
pub fn project_highlights(records: &[InnovationRecord]) -> Vec<ProjectHighlight> {
    records
        .iter()
        .filter(|r| !r.project.trim().is_empty())
        .map(|r| ProjectHighlight {
            project: r.project.trim().to_string(),
            country: r.country.clone(),
            agency: r.agency.clone(),
            category: r.category.clone(),
        })
        .collect()
}

/// Requested categories that do not occur in the dataset's vocabulary.
pub fn unknown_categories(filter: &CategoryFilter, dataset: &Dataset) -> Vec<String> {
    filter
        .sorted()
        .into_iter()
        .filter(|c| !dataset.has_category(c))
        .collect()
}
