//! Record builder: header resolution and row conversion.

use crate::error::{LoadError, LoadResult};
use crate::models::{Dataset, InnovationRecord};
use crate::parser::tokenizer::{parse_line, split_lines};
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// Header names exactly as they appear in the source document.
pub mod columns {
    pub const AGENCY: &str = "agency";
    pub const COUNTRY: &str = "country";
    pub const NAME: &str = "name";
    pub const PROJECT: &str = "project";
    pub const CATEGORY: &str = "category";
    pub const TECHNICAL_INNOVATION: &str = "technical_innovation";
    pub const INNOVATION_X5: &str = "innovation_x5";
    pub const INNOVATION_ANALYSIS: &str = "innovation_analysis";
    pub const WHEN: &str = "When?";
    pub const STILL_ACTIVE: &str = "still_active?";
    pub const SOURCE: &str = "source";
}

/// Positions of the recognized columns within a header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub country: usize,
    pub category: usize,
    pub agency: Option<usize>,
    pub name: Option<usize>,
    pub project: Option<usize>,
    pub technical_innovation: Option<usize>,
    pub innovation_x5: Option<usize>,
    pub innovation_analysis: Option<usize>,
    pub when: Option<usize>,
    pub still_active: Option<usize>,
    pub source: Option<usize>,
}

impl ColumnMap {
    /// Resolve column positions by exact, case-sensitive header match.
    ///
    /// The first occurrence wins when a header name repeats. Missing
    /// `country` or `category` is a schema error.
    pub fn resolve(header: &[String]) -> LoadResult<Self> {
        let find = |name: &str| header.iter().position(|h| h == name);

        let country = find(columns::COUNTRY);
        let category = find(columns::CATEGORY);

        let (country, category) = match (country, category) {
            (Some(country), Some(category)) => (country, category),
            _ => {
                let missing = [(columns::COUNTRY, country), (columns::CATEGORY, category)]
                    .into_iter()
                    .filter(|(_, idx)| idx.is_none())
                    .map(|(name, _)| name.to_string())
                    .collect();
                return Err(LoadError::Schema { missing });
            }
        };

        Ok(Self {
            country,
            category,
            agency: find(columns::AGENCY),
            name: find(columns::NAME),
            project: find(columns::PROJECT),
            technical_innovation: find(columns::TECHNICAL_INNOVATION),
            innovation_x5: find(columns::INNOVATION_X5),
            innovation_analysis: find(columns::INNOVATION_ANALYSIS),
            when: find(columns::WHEN),
            still_active: find(columns::STILL_ACTIVE),
            source: find(columns::SOURCE),
        })
    }

    /// Highest index among the required columns.
    pub fn required_width(&self) -> usize {
        self.country.max(self.category)
    }

    /// Convert one tokenized row, or `None` if the row must be skipped.
    pub fn build(&self, fields: &[String]) -> Option<InnovationRecord> {
        if fields.len() <= self.required_width() {
            return None;
        }

        let country = cell(fields, Some(self.country));
        let category = cell(fields, Some(self.category));
        if country.is_empty() || category.is_empty() {
            return None;
        }

        Some(InnovationRecord {
            agency: cell(fields, self.agency),
            country,
            name: cell(fields, self.name),
            project: cell(fields, self.project),
            category,
            technical_innovation: cell(fields, self.technical_innovation),
            innovation_x5: cell(fields, self.innovation_x5),
            innovation_analysis: cell(fields, self.innovation_analysis),
            when: cell(fields, self.when),
            still_active: cell(fields, self.still_active),
            source: cell(fields, self.source),
        })
    }
}

/// Trimmed cell value, or empty when the column or cell is absent.
fn cell(fields: &[String], idx: Option<usize>) -> String {
    idx.and_then(|i| fields.get(i))
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

/// Build the dataset from a tokenized header and tokenized data rows.
///
/// Rows that are too short or lack a country or category are dropped
/// silently and counted in `skipped_rows`.
pub fn build_records<I>(header: &[String], rows: I) -> LoadResult<Dataset>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let columns = ColumnMap::resolve(header)?;
    debug!("Resolved columns: {:?}", columns);

    let mut categories = BTreeSet::new();
    let mut records = Vec::new();
    let mut skipped_rows = 0;

    for (idx, fields) in rows.into_iter().enumerate() {
        match columns.build(&fields) {
            Some(record) => {
                categories.insert(record.category.clone());
                records.push(record);
            }
            None => {
                // Line numbers are 1-based and count the header.
                trace!("Skipping row at line {}", idx + 2);
                skipped_rows += 1;
            }
        }
    }

    Ok(Dataset {
        categories: categories.into_iter().collect(),
        records,
        skipped_rows,
    })
}

/// Leading byte-order mark, as left by spreadsheet exports.
const BOM: char = '\u{feff}';

/// Tokenize and build a whole CSV document.
///
/// A single leading byte-order mark is ignored.
pub fn parse_document(text: &str) -> LoadResult<Dataset> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let mut lines = split_lines(text);
    let header = parse_line(lines.next().unwrap_or_default());
    build_records(&header, lines.map(parse_line))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_full_header() {
        let columns = ColumnMap::resolve(&header(&[
            "agency",
            "country",
            "name",
            "project",
            "category",
            "technical_innovation",
            "innovation_x5",
            "innovation_analysis",
            "When?",
            "still_active?",
            "source",
        ]))
        .unwrap();

        assert_eq!(columns.country, 1);
        assert_eq!(columns.category, 4);
        assert_eq!(columns.when, Some(8));
        assert_eq!(columns.still_active, Some(9));
        assert_eq!(columns.source, Some(10));
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let columns = ColumnMap::resolve(&header(&["country", "category", "when?"])).unwrap();
        assert_eq!(columns.when, None);

        let err = ColumnMap::resolve(&header(&["Country", "category"])).unwrap_err();
        match err {
            LoadError::Schema { missing } => assert_eq!(missing, vec!["country"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolve_reports_both_missing_columns() {
        let err = ColumnMap::resolve(&header(&["agency"])).unwrap_err();
        match err {
            LoadError::Schema { missing } => assert_eq!(missing, vec!["country", "category"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_header_uses_first_position() {
        let columns = ColumnMap::resolve(&header(&["country", "category", "country"])).unwrap();
        assert_eq!(columns.country, 0);
    }

    #[test]
    fn test_rows_missing_required_values_are_skipped() {
        let dataset = build_records(
            &header(&["country", "category"]),
            vec![
                row(&["USA", "Tax"]),
                row(&["", "Tax"]),
                row(&["UK", ""]),
                row(&["   ", "Finance"]),
                row(&["France"]),
            ],
        )
        .unwrap();

        assert_eq!(dataset.records.len(), 1);
        assert_eq!(dataset.skipped_rows, 4);
        assert!(dataset
            .records
            .iter()
            .all(|r| !r.country.is_empty() && !r.category.is_empty()));
    }

    #[test]
    fn test_short_row_uses_required_width() {
        // Required columns sit at 0 and 2; a two-field row is too short even
        // though the country cell is present.
        let hdr = header(&["country", "name", "category"]);
        let dataset = build_records(&hdr, vec![row(&["USA", "x"])]).unwrap();
        assert!(dataset.records.is_empty());
        assert_eq!(dataset.skipped_rows, 1);
    }

    #[test]
    fn test_optional_columns_default_to_empty() {
        let hdr = header(&["country", "category", "source"]);
        let dataset = build_records(&hdr, vec![row(&["Kenya", "Tax"])]).unwrap();

        let record = &dataset.records[0];
        assert_eq!(record.country, "Kenya");
        assert_eq!(record.source, "");
        assert_eq!(record.agency, "");
        assert_eq!(record.when, "");
    }

    #[test]
    fn test_categories_are_distinct_and_sorted() {
        let hdr = header(&["country", "category"]);
        let dataset = build_records(
            &hdr,
            vec![
                row(&["A", "Tax"]),
                row(&["B", "Finance"]),
                row(&["C", "Tax"]),
                row(&["D", "Health"]),
            ],
        )
        .unwrap();
        assert_eq!(dataset.categories, vec!["Finance", "Health", "Tax"]);
    }

    #[test]
    fn test_parse_document_preserves_row_order() {
        let text = "country,category,name,When?\nUSA,Tax,First,2020\nUK,Finance,Second,\n\nFrance,Tax,Third,2021\n";
        let dataset = parse_document(text).unwrap();

        let names: Vec<&str> = dataset.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
        assert_eq!(dataset.skipped_rows, 1);
    }

    #[test]
    fn test_parse_document_with_quoted_fields() {
        let text = "agency,country,category,project\n\"Ministry, Finance\",Ghana,Tax,\"Mobile money, levy\"\n";
        let dataset = parse_document(text).unwrap();

        let record = &dataset.records[0];
        assert_eq!(record.agency, "Ministry, Finance");
        assert_eq!(record.country, "Ghana");
        assert_eq!(record.project, "Mobile money, levy");
    }

    #[test]
    fn test_parse_document_crlf() {
        let text = "country,category,When?\r\nUSA,Tax,2020\r\n";
        let dataset = parse_document(text).unwrap();
        assert_eq!(dataset.records[0].when, "2020");
    }

    #[test]
    fn test_parse_document_strips_bom() {
        let dataset = parse_document("\u{feff}country,category\nKenya,Finance\n").unwrap();
        assert_eq!(dataset.records.len(), 1);
        assert_eq!(dataset.records[0].country, "Kenya");

        // Only one leading mark is dropped.
        assert!(parse_document("\u{feff}\u{feff}country,category\n")
            .unwrap_err()
            .is_schema());
    }

    #[test]
    fn test_parse_empty_document_is_schema_error() {
        assert!(parse_document("").unwrap_err().is_schema());
        assert!(parse_document("   \n  ").unwrap_err().is_schema());
    }

    #[test]
    fn test_header_only_document() {
        let dataset = parse_document("country,category").unwrap();
        assert!(dataset.is_empty());
        assert!(dataset.categories.is_empty());
    }
}
