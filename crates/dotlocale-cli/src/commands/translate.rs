//! Implementation of the `dotlocale translate` command.

use std::collections::HashMap;

use clap::Args;
use dotlocale::{Mode, Resolver, TranslateOptions, Value};
use miette::{IntoDiagnostic, Result};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use crate::commands::CatalogArgs;

/// Arguments for the translate command.
#[derive(Debug, Args)]
pub struct TranslateArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Scope to translate (e.g., topic.title)
    #[arg(long, required = true)]
    pub scope: String,

    /// Locale to search first
    #[arg(long, env = "DOTLOCALE_LOCALE", default_value = "en")]
    pub locale: String,

    /// Default locale of the fallback chain
    #[arg(long, default_value = "en")]
    pub default_locale: String,

    /// Locale tried first when the requested locale has no entry
    #[arg(long)]
    pub fallback_locale: Option<String>,

    /// Plural count
    #[arg(long)]
    pub count: Option<String>,

    /// Placeholder values in name=value format (repeatable)
    #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// Text used when the catalog has no entry
    #[arg(long = "default")]
    pub default_value: Option<String>,

    /// Number results and disable fallbacks
    #[arg(long)]
    pub verbose_keys: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for translate results.
#[derive(Serialize)]
struct TranslateResult<'a> {
    scope: &'a str,
    locale: &'a str,
    result: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Parse a key=value parameter string.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("invalid parameter format '{s}': expected name=value"))
}

/// Interpret a command-line value as an integer, then a float, then text.
fn parse_value(s: &str) -> Value {
    if let Ok(n) = s.parse::<i64>() {
        Value::from(n)
    } else if let Ok(n) = s.parse::<f64>() {
        Value::from(n)
    } else {
        Value::from(s)
    }
}

/// Run the translate command.
pub fn run_translate(args: TranslateArgs) -> Result<i32> {
    let catalog = args.catalog.load()?;
    let mode = if args.verbose_keys {
        Mode::Verbose
    } else {
        Mode::Normal
    };
    let resolver = Resolver::builder()
        .catalog(catalog)
        .locale(args.locale.as_str())
        .default_locale(args.default_locale.as_str())
        .maybe_fallback_locale(args.fallback_locale.clone())
        .mode(mode)
        .build();

    let params: HashMap<String, Value> = args
        .params
        .iter()
        .map(|(name, value)| (name.clone(), parse_value(value)))
        .collect();
    let options = TranslateOptions::builder()
        .maybe_count(args.count.as_deref().map(parse_value))
        .maybe_default_value(args.default_value.clone())
        .params(params)
        .build();

    let error = resolver.try_translate(args.scope.as_str(), &options).err();
    let result = resolver.translate(args.scope.as_str(), &options);

    if args.json {
        let output = TranslateResult {
            scope: &args.scope,
            locale: &args.locale,
            result,
            error: error.as_ref().map(ToString::to_string),
        };
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        println!("{result}");
        if let Some(error) = &error {
            eprintln!(
                "{} {error}",
                "warning:".if_supports_color(Stream::Stderr, |text| text.yellow())
            );
        }
    }

    match error {
        Some(_) => Ok(exitcode::DATAERR),
        None => Ok(exitcode::OK),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_key_value_pairs() {
        assert_eq!(
            parse_key_val("name=Alice"),
            Ok(("name".to_string(), "Alice".to_string()))
        );
        assert_eq!(
            parse_key_val("expr=a=b"),
            Ok(("expr".to_string(), "a=b".to_string()))
        );
        assert_eq!(parse_key_val("empty="), Ok(("empty".to_string(), String::new())));
    }

    #[test]
    fn rejects_parameters_without_equals() {
        let err = parse_key_val("name").unwrap_err();
        assert!(err.contains("expected name=value"));
    }

    #[test]
    fn values_prefer_integers() {
        assert_eq!(parse_value("3"), Value::Number(3));
        assert_eq!(parse_value("-2"), Value::Number(-2));
        assert_eq!(parse_value("1.5"), Value::Float(1.5));
        assert_eq!(parse_value("lots"), Value::String("lots".to_string()));
    }
}
