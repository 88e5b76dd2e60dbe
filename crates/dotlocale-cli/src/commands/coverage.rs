//! Coverage command implementation.

use std::collections::BTreeSet;

use clap::Args;
use dotlocale::Catalog;
use miette::{IntoDiagnostic, Result, miette};
use serde::Serialize;

use crate::commands::CatalogArgs;
use crate::output::table::{LanguageCoverage, format_coverage_table};

/// Arguments for the coverage command.
#[derive(Debug, Args)]
pub struct CoverageArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Source locale whose scopes define the total.
    #[arg(long, default_value = "en")]
    pub source: String,

    /// Locales to check coverage for (comma-separated). Defaults to every
    /// other locale in the catalog.
    #[arg(long, value_delimiter = ',')]
    pub lang: Vec<String>,

    /// Exit with non-zero code if any translation is incomplete.
    #[arg(long)]
    pub strict: bool,

    /// Output results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for coverage data.
#[derive(Debug, Serialize)]
struct CoverageJson {
    language: String,
    translated: usize,
    total: usize,
    missing: Vec<String>,
}

/// Count the source scopes each locale translates.
fn compute_coverage(catalog: &Catalog, source: &str, languages: &[String]) -> Vec<LanguageCoverage> {
    let source_scopes: BTreeSet<String> = catalog.scopes(source).into_iter().collect();
    languages
        .iter()
        .map(|language| {
            let translated: BTreeSet<String> = catalog.scopes(language).into_iter().collect();
            LanguageCoverage {
                language: language.clone(),
                translated: source_scopes.intersection(&translated).count(),
                missing: source_scopes.difference(&translated).cloned().collect(),
            }
        })
        .collect()
}

/// Run the coverage command.
pub fn run_coverage(args: CoverageArgs) -> Result<i32> {
    let catalog = args.catalog.load()?;
    if !catalog.has_locale(&args.source) {
        return Err(miette!(
            "Source locale '{}' not found in {}",
            args.source,
            args.catalog.catalog.display()
        ));
    }

    let languages: Vec<String> = if args.lang.is_empty() {
        catalog
            .locales()
            .filter(|locale| *locale != args.source)
            .map(str::to_string)
            .collect()
    } else {
        args.lang.clone()
    };

    let source_count = catalog.scopes(&args.source).len();
    let coverage_data = compute_coverage(&catalog, &args.source, &languages);
    let any_incomplete = coverage_data.iter().any(|c| !c.missing.is_empty());

    if args.json {
        let json_data: Vec<CoverageJson> = coverage_data
            .iter()
            .map(|c| CoverageJson {
                language: c.language.clone(),
                translated: c.translated,
                total: source_count,
                missing: c.missing.clone(),
            })
            .collect();

        let json_output = serde_json::to_string_pretty(&json_data).into_diagnostic()?;
        println!("{json_output}");
    } else {
        let table = format_coverage_table(source_count, &coverage_data);
        println!("{table}");

        for lang_coverage in &coverage_data {
            if !lang_coverage.missing.is_empty() {
                println!("\nMissing in {}:", lang_coverage.language);
                for name in &lang_coverage.missing {
                    println!("  - {name}");
                }
            }
        }
    }

    if args.strict && any_incomplete {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
