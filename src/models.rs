//! Data models for the innovation dataset.
//!
//! This module contains the parsed record type and every aggregate view
//! derived from it. All aggregates are plain values owned by the caller.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One parsed data row describing a single regulatory innovation.
///
/// Every field is trimmed and defaults to an empty string when the column
/// is absent from the document or the cell is blank. `country` and
/// `category` are never empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InnovationRecord {
    pub agency: String,
    pub country: String,
    pub name: String,
    pub project: String,
    pub category: String,
    pub technical_innovation: String,
    pub innovation_x5: String,
    pub innovation_analysis: String,
    /// Free-text year; only exact four-digit values reach the timeline.
    pub when: String,
    pub still_active: String,
    pub source: String,
}

impl InnovationRecord {
    /// Creates a record with only the two required fields set.
    pub fn new(country: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            category: category.into(),
            ..Self::default()
        }
    }

    /// Returns the record with `when` set.
    pub fn with_when(mut self, when: impl Into<String>) -> Self {
        self.when = when.into();
        self
    }

    /// Returns the record with `name` set.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Returns the record with `project` set.
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    /// Returns the record with `agency` set.
    pub fn with_agency(mut self, agency: impl Into<String>) -> Self {
        self.agency = agency.into();
        self
    }
}

/// The full result of a load: the record sequence and its category vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Distinct non-empty categories, sorted alphabetically.
    pub categories: Vec<String>,
    /// Valid records in source row order.
    pub records: Vec<InnovationRecord>,
    /// Data rows dropped by the record builder.
    #[serde(default)]
    pub skipped_rows: usize,
}

impl Dataset {
    /// Number of valid records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no valid record was found.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether `category` is part of the vocabulary.
    pub fn has_category(&self, category: &str) -> bool {
        self.categories
            .binary_search_by(|c| c.as_str().cmp(category))
            .is_ok()
    }
}

/// Number of innovations for one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryCount {
    /// Lowercased country with only its first character uppercased.
    pub country: String,
    pub count: usize,
}

/// Number of innovations for one category (original casing).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// One year of the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Four ASCII digits.
    pub year: String,
    pub count: usize,
    /// Non-empty record names in encounter order.
    pub projects: Vec<String>,
}

/// Headline numbers shown alongside the country view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetStats {
    pub countries: usize,
    pub total_innovations: usize,
    pub max_per_country: usize,
}

/// A record with a non-empty project description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectHighlight {
    pub project: String,
    pub country: String,
    pub agency: String,
    pub category: String,
}

/// Caller-supplied set of categories restricting the country aggregate.
///
/// Membership is an exact, case-sensitive string match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    categories: HashSet<String>,
}

impl CategoryFilter {
    /// Creates an empty filter, which selects every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no category has been selected.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Number of selected categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether `category` is selected.
    pub fn contains(&self, category: &str) -> bool {
        self.categories.contains(category)
    }

    /// Adds a category, returning false if it was already selected.
    pub fn insert(&mut self, category: impl Into<String>) -> bool {
        self.categories.insert(category.into())
    }

    /// Selected categories in alphabetical order.
    pub fn sorted(&self) -> Vec<String> {
        let mut categories: Vec<String> = self.categories.iter().cloned().collect();
        categories.sort();
        categories
    }
}

impl<S: Into<String>> FromIterator<S> for CategoryFilter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            categories: iter.into_iter().map(Into::into).collect(),
        }
    }
}
