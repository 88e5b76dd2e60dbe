//! Table formatting utilities for CLI output.

use comfy_table::{ContentArrangement, Table, presets};

/// Coverage data for a single locale.
pub struct LanguageCoverage {
    /// Locale code (e.g., "de", "pt_BR").
    pub language: String,
    /// Number of source scopes translated.
    pub translated: usize,
    /// Source scopes with no translation.
    pub missing: Vec<String>,
}

/// Format coverage data as a table.
pub fn format_coverage_table(source_count: usize, coverage: &[LanguageCoverage]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Locale", "Coverage", "Percent", "Missing"]);

    for lang in coverage {
        table.add_row(vec![
            lang.language.clone(),
            format!("{}/{}", lang.translated, source_count),
            percent(lang.translated, source_count),
            lang.missing.len().to_string(),
        ]);
    }

    table
}

fn percent(translated: usize, total: usize) -> String {
    if total == 0 {
        return "-".to_string();
    }
    format!("{:.0}%", translated as f64 * 100.0 / total as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_to_whole_numbers() {
        assert_eq!(percent(1, 3), "33%");
        assert_eq!(percent(3, 3), "100%");
        assert_eq!(percent(0, 0), "-");
    }

    #[test]
    fn table_lists_each_locale() {
        let coverage = vec![LanguageCoverage {
            language: "de".to_string(),
            translated: 2,
            missing: vec!["js.c".to_string()],
        }];
        let rendered = format_coverage_table(3, &coverage).to_string();
        assert!(rendered.contains("Locale"));
        assert!(rendered.contains("2/3"));
        assert!(rendered.contains("67%"));
    }
}
