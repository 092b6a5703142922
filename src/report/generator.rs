//! Markdown and JSON report generation.

use super::{Report, ReportMetadata};
use anyhow::Result;
use innomap::{CategoryCount, CountryCount, DatasetStats, ProjectHighlight, TimelineEntry};

/// Width of the widest bar in the category chart.
const BAR_WIDTH: usize = 30;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report) -> String {
    let mut output = String::new();

    output.push_str("# Regulatory Innovation Report\n\n");
    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_stats_section(&report.stats));
    output.push_str(&generate_countries_section(
        &report.countries,
        report.total_countries,
    ));
    output.push_str(&generate_categories_section(&report.categories));

    if let Some(ref timeline) = report.timeline {
        output.push_str(&generate_timeline_section(timeline));
    }

    output.push_str(&generate_highlights_section(&report.highlights));
    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Source:** {}\n", metadata.source));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!(
        "- **Innovations:** {} across {} categories\n",
        metadata.records,
        metadata.categories.len()
    ));
    if metadata.skipped_rows > 0 {
        section.push_str(&format!(
            "- **Incomplete Rows Skipped:** {}\n",
            metadata.skipped_rows
        ));
    }
    if !metadata.category_filter.is_empty() {
        section.push_str(&format!(
            "- **Category Filter:** {}\n",
            metadata.category_filter.join(", ")
        ));
    }
    section.push('\n');

    section
}

/// Generate the headline statistics.
fn generate_stats_section(stats: &DatasetStats) -> String {
    let mut section = String::new();

    section.push_str("## Statistics\n\n");
    section.push_str("| Countries | Total Innovations | Max per Country |\n");
    section.push_str("|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} | {} |\n\n",
        stats.countries, stats.total_innovations, stats.max_per_country
    ));

    section
}

/// Generate the country ranking.
fn generate_countries_section(countries: &[CountryCount], total: usize) -> String {
    let mut section = String::new();

    section.push_str("## Countries\n\n");

    if countries.is_empty() {
        section.push_str("No innovations match the selected categories.\n\n");
        return section;
    }

    section.push_str("| # | Country | Innovations |\n");
    section.push_str("|---:|:---|:---:|\n");
    for (i, country) in countries.iter().enumerate() {
        section.push_str(&format!(
            "| {} | {} | {} {} |\n",
            i + 1,
            escape_cell(&country.country),
            country.count,
            plural(country.count, "innovation")
        ));
    }
    section.push('\n');

    if total > countries.len() {
        section.push_str(&format!(
            "*Showing top {} of {} countries*\n\n",
            countries.len(),
            total
        ));
    }

    section
}

/// Generate the category breakdown with a text bar chart.
fn generate_categories_section(categories: &[CategoryCount]) -> String {
    let mut section = String::new();

    section.push_str("## Categories\n\n");

    let max = categories.iter().map(|c| c.count).max().unwrap_or(0);
    if max == 0 {
        section.push_str("No categories found.\n\n");
        return section;
    }

    section.push_str("| Category | Count | |\n");
    section.push_str("|:---|:---:|:---|\n");
    for category in categories {
        section.push_str(&format!(
            "| {} | {} | `{}` |\n",
            escape_cell(&category.category),
            category.count,
            bar(category.count, max)
        ));
    }
    section.push('\n');

    section
}

/// Generate the timeline section.
fn generate_timeline_section(timeline: &[TimelineEntry]) -> String {
    let mut section = String::new();

    section.push_str("## Timeline\n\n");

    if timeline.is_empty() {
        section.push_str("No innovations with a known year.\n\n");
        return section;
    }

    for entry in timeline {
        section.push_str(&format!(
            "### {}: {} {}\n\n",
            entry.year,
            entry.count,
            plural(entry.count, "innovation")
        ));
        for project in &entry.projects {
            section.push_str(&format!("- {}\n", project));
        }
        if !entry.projects.is_empty() {
            section.push('\n');
        }
    }

    section
}

/// Generate the project highlights section.
fn generate_highlights_section(highlights: &[ProjectHighlight]) -> String {
    if highlights.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Innovation Projects\n\n");
    for highlight in highlights {
        let mut origin = highlight.country.clone();
        if !highlight.agency.is_empty() {
            origin.push_str(&format!(" • {}", highlight.agency));
        }
        section.push_str(&format!(
            "- **{}** ({}) - {}\n",
            highlight.project, highlight.category, origin
        ));
    }
    section.push('\n');

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    "---\n\n*Report generated by innomap*\n".to_string()
}

/// Escape pipes so a value stays inside its table cell.
fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

/// Bar scaled to the largest count, at least one cell wide.
fn bar(count: usize, max: usize) -> String {
    let width = (count * BAR_WIDTH).div_ceil(max).max(1);
    "█".repeat(width)
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn create_test_report() -> Report {
        Report {
            metadata: ReportMetadata {
                source: "innovations.csv".to_string(),
                generated_at: Utc::now(),
                records: 5,
                skipped_rows: 1,
                categories: vec!["Finance".to_string(), "Tax".to_string()],
                category_filter: vec![],
            },
            stats: DatasetStats {
                countries: 3,
                total_innovations: 5,
                max_per_country: 3,
            },
            countries: vec![
                CountryCount {
                    country: "Usa".to_string(),
                    count: 3,
                },
                CountryCount {
                    country: "Uk".to_string(),
                    count: 1,
                },
            ],
            total_countries: 3,
            categories: vec![
                CategoryCount {
                    category: "Tax".to_string(),
                    count: 4,
                },
                CategoryCount {
                    category: "Finance".to_string(),
                    count: 1,
                },
            ],
            timeline: Some(vec![TimelineEntry {
                year: "2020".to_string(),
                count: 2,
                projects: vec!["Direct file".to_string()],
            }]),
            highlights: vec![ProjectHighlight {
                project: "Regulatory sandbox".to_string(),
                country: "UK".to_string(),
                agency: "FCA".to_string(),
                category: "Finance".to_string(),
            }],
        }
    }

    #[test]
    fn test_generate_markdown_report() {
        let report = create_test_report();
        let markdown = generate_markdown_report(&report);

        assert!(markdown.contains("# Regulatory Innovation Report"));
        assert!(markdown.contains("## Metadata"));
        assert!(markdown.contains("## Statistics"));
        assert!(markdown.contains("| 1 | Usa | 3 innovations |"));
        assert!(markdown.contains("| 2 | Uk | 1 innovation |"));
        assert!(markdown.contains("*Showing top 2 of 3 countries*"));
        assert!(markdown.contains("### 2020: 2 innovations"));
        assert!(markdown.contains("- Direct file"));
        assert!(markdown.contains("**Regulatory sandbox** (Finance) - UK • FCA"));
        assert!(markdown.contains("Incomplete Rows Skipped:** 1"));
    }

    #[test]
    fn test_markdown_without_timeline() {
        let mut report = create_test_report();
        report.timeline = None;
        let markdown = generate_markdown_report(&report);
        assert!(!markdown.contains("## Timeline"));
    }

    #[test]
    fn test_empty_country_section() {
        let section = generate_countries_section(&[], 0);
        assert!(section.contains("No innovations match"));
    }

    #[test]
    fn test_table_cells_escape_pipes() {
        assert_eq!(escape_cell("Tax | Customs"), "Tax \\| Customs");

        let countries = vec![CountryCount {
            country: "Usa|canada".to_string(),
            count: 2,
        }];
        let section = generate_countries_section(&countries, 1);
        assert!(section.contains("| 1 | Usa\\|canada | 2 innovations |"));

        let categories = vec![CategoryCount {
            category: "Tax|Customs".to_string(),
            count: 1,
        }];
        let section = generate_categories_section(&categories);
        let row = section.lines().find(|l| l.contains("Customs")).unwrap();
        assert!(row.starts_with("| Tax\\|Customs | 1 |"));
    }

    #[test]
    fn test_bar_scaling() {
        assert_eq!(bar(4, 4).chars().count(), BAR_WIDTH);
        assert_eq!(bar(1, 1000).chars().count(), 1);
        assert_eq!(bar(2, 4).chars().count(), BAR_WIDTH / 2);
    }

    #[test]
    fn test_generate_json_report() {
        let report = create_test_report();
        let json = generate_json_report(&report).unwrap();

        assert!(json.contains("\"metadata\""));
        assert!(json.contains("\"countries\""));
        assert!(json.contains("\"timeline\""));
        assert!(json.contains("\"total_innovations\": 5"));
    }
}
