//! Implementation of the `dotlocale check` command.

use clap::Args;
use dotlocale::{Catalog, CatalogWarning, PluralRules, validate_locale};
use miette::{IntoDiagnostic, Result, miette};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use crate::commands::CatalogArgs;

/// Arguments for the check command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Locale every other locale is compared against
    #[arg(long, default_value = "en")]
    pub source: String,

    /// Locales to check (comma-separated). Defaults to every other locale.
    #[arg(long, value_delimiter = ',')]
    pub lang: Vec<String>,

    /// Exit with non-zero code if there are any warnings
    #[arg(long)]
    pub strict: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for a single warning.
#[derive(Debug, Serialize)]
struct WarningJson<'a> {
    locale: &'a str,
    scope: &'a str,
    message: String,
}

/// Locales to validate: the requested ones, or every locale but the source.
fn target_locales(catalog: &Catalog, source: &str, requested: &[String]) -> Vec<String> {
    if requested.is_empty() {
        catalog
            .locales()
            .filter(|locale| *locale != source)
            .map(str::to_string)
            .collect()
    } else {
        requested.to_vec()
    }
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> Result<i32> {
    let catalog = args.catalog.load()?;
    if !catalog.has_locale(&args.source) {
        return Err(miette!(
            "Source locale '{}' not found in {}",
            args.source,
            args.catalog.catalog.display()
        ));
    }

    let rules = PluralRules::cldr();
    let warnings: Vec<CatalogWarning> = target_locales(&catalog, &args.source, &args.lang)
        .iter()
        .flat_map(|target| validate_locale(&catalog, &args.source, target, &rules))
        .collect();

    if args.json {
        let json: Vec<WarningJson<'_>> = warnings
            .iter()
            .map(|warning| WarningJson {
                locale: warning.locale(),
                scope: warning.scope(),
                message: warning.to_string(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&json).into_diagnostic()?);
    } else if warnings.is_empty() {
        println!("{}", "No problems found".if_supports_color(Stream::Stdout, |text| text.green()));
    } else {
        for warning in &warnings {
            println!(
                "{} {warning}",
                "warning:".if_supports_color(Stream::Stdout, |text| text.yellow())
            );
        }
        println!("\n{} warning(s)", warnings.len());
    }

    if args.strict && !warnings.is_empty() {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog
            .insert("en", "js.a", "a")
            .insert("de", "js.a", "a")
            .insert("pl", "js.a", "a");
        catalog
    }

    #[test]
    fn targets_default_to_other_locales() {
        assert_eq!(target_locales(&catalog(), "en", &[]), vec!["de", "pl"]);
    }

    #[test]
    fn requested_targets_are_kept() {
        let requested = vec!["pl".to_string(), "fr".to_string()];
        assert_eq!(target_locales(&catalog(), "en", &requested), vec!["pl", "fr"]);
    }
}
