//! Cross-locale catalog validation.
//!
//! Compares a target locale's tree against a source locale's tree and reports
//! keys that are unknown or missing, entries whose shape differs, plural
//! variant keys the target language never selects, and placeholder sets that
//! drifted apart during translation.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Display, Formatter};

use crate::catalog::{Catalog, Entry};
use crate::interpreter::{PluralRules, compute_suggestions};
use crate::parser::placeholder_names;

/// A problem found while comparing two locales.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogWarning {
    /// The target has a scope the source does not.
    UnknownKey { scope: String, locale: String },

    /// The source has a scope the target does not.
    MissingKey { scope: String, locale: String },

    /// The scope is a string in one locale and plural variants in the other.
    ShapeMismatch {
        scope: String,
        locale: String,
        source_kind: &'static str,
        target_kind: &'static str,
    },

    /// A variant key that is not a numeral and not a category of the target
    /// language.
    InvalidVariantKey {
        scope: String,
        locale: String,
        key: String,
        suggestions: Vec<String>,
    },

    /// Placeholder names differ between source and target.
    PlaceholderMismatch {
        scope: String,
        locale: String,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },
}

impl CatalogWarning {
    /// The dotted scope the warning is about.
    pub fn scope(&self) -> &str {
        match self {
            CatalogWarning::UnknownKey { scope, .. }
            | CatalogWarning::MissingKey { scope, .. }
            | CatalogWarning::ShapeMismatch { scope, .. }
            | CatalogWarning::InvalidVariantKey { scope, .. }
            | CatalogWarning::PlaceholderMismatch { scope, .. } => scope,
        }
    }

    /// The target locale.
    pub fn locale(&self) -> &str {
        match self {
            CatalogWarning::UnknownKey { locale, .. }
            | CatalogWarning::MissingKey { locale, .. }
            | CatalogWarning::ShapeMismatch { locale, .. }
            | CatalogWarning::InvalidVariantKey { locale, .. }
            | CatalogWarning::PlaceholderMismatch { locale, .. } => locale,
        }
    }
}

impl Display for CatalogWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CatalogWarning::UnknownKey { scope, locale } => {
                write!(f, "'{scope}' in '{locale}' does not exist in the source locale")
            }
            CatalogWarning::MissingKey { scope, locale } => {
                write!(f, "'{scope}' is missing from '{locale}'")
            }
            CatalogWarning::ShapeMismatch {
                scope,
                locale,
                source_kind,
                target_kind,
            } => write!(
                f,
                "'{scope}' in '{locale}' is {target_kind}, but {source_kind} in the source locale"
            ),
            CatalogWarning::InvalidVariantKey {
                scope,
                locale,
                key,
                suggestions,
            } => {
                write!(
                    f,
                    "'{scope}' in '{locale}' has variant '{key}', which is not a plural category of '{locale}'"
                )?;
                if !suggestions.is_empty() {
                    write!(f, "; did you mean: {}?", suggestions.join(", "))?;
                }
                Ok(())
            }
            CatalogWarning::PlaceholderMismatch {
                scope,
                locale,
                missing,
                unexpected,
            } => {
                write!(f, "'{scope}' in '{locale}' placeholders differ from the source")?;
                if !missing.is_empty() {
                    write!(f, "; missing: {}", missing.join(", "))?;
                }
                if !unexpected.is_empty() {
                    write!(f, "; unexpected: {}", unexpected.join(", "))?;
                }
                Ok(())
            }
        }
    }
}

/// Validate `target` against `source`.
///
/// Returns an empty vector when either locale has no translations. Warnings
/// for target scopes come first, in path order, followed by scopes missing
/// from the target.
///
/// # Example
///
/// ```
/// use dotlocale::{Catalog, CatalogWarning, PluralRules, validate_locale};
///
/// let mut catalog = Catalog::new();
/// catalog.insert("en", "js.hello", "Hello").insert("en", "js.bye", "Bye");
/// catalog.insert("de", "js.hello", "Hallo");
///
/// let warnings = validate_locale(&catalog, "en", "de", &PluralRules::cldr());
/// assert_eq!(
///     warnings,
///     vec![CatalogWarning::MissingKey { scope: "js.bye".into(), locale: "de".into() }]
/// );
/// ```
pub fn validate_locale(
    catalog: &Catalog,
    source: &str,
    target: &str,
    rules: &PluralRules,
) -> Vec<CatalogWarning> {
    let mut warnings = Vec::new();
    if !catalog.has_locale(source) || !catalog.has_locale(target) {
        return warnings;
    }

    let source_entries: BTreeMap<String, Entry<'_>> = catalog.entries(source).into_iter().collect();
    let target_entries: BTreeMap<String, Entry<'_>> = catalog.entries(target).into_iter().collect();
    let categories: Vec<String> = rules
        .categories_for(target)
        .into_iter()
        .map(str::to_string)
        .collect();

    for (scope, target_entry) in &target_entries {
        if let Entry::Variants(variants) = target_entry {
            for key in variants.keys() {
                let numeral = key.bytes().all(|b| b.is_ascii_digit());
                if !numeral && !categories.contains(key) {
                    warnings.push(CatalogWarning::InvalidVariantKey {
                        scope: scope.clone(),
                        locale: target.to_string(),
                        key: key.clone(),
                        suggestions: compute_suggestions(key, &categories),
                    });
                }
            }
        }

        let Some(source_entry) = source_entries.get(scope) else {
            warnings.push(CatalogWarning::UnknownKey {
                scope: scope.clone(),
                locale: target.to_string(),
            });
            continue;
        };

        if source_entry.kind() != target_entry.kind() {
            warnings.push(CatalogWarning::ShapeMismatch {
                scope: scope.clone(),
                locale: target.to_string(),
                source_kind: source_entry.kind(),
                target_kind: target_entry.kind(),
            });
            continue;
        }

        let expected = entry_placeholders(*source_entry);
        let found = entry_placeholders(*target_entry);
        if expected != found {
            warnings.push(CatalogWarning::PlaceholderMismatch {
                scope: scope.clone(),
                locale: target.to_string(),
                missing: expected.difference(&found).map(|s| (*s).to_string()).collect(),
                unexpected: found.difference(&expected).map(|s| (*s).to_string()).collect(),
            });
        }
    }

    for scope in source_entries.keys() {
        if !target_entries.contains_key(scope) {
            warnings.push(CatalogWarning::MissingKey {
                scope: scope.clone(),
                locale: target.to_string(),
            });
        }
    }

    warnings
}

/// Placeholder names used anywhere in an entry. For variant mappings this is
/// the union over all variants, since a singular form commonly omits the
/// count.
fn entry_placeholders(entry: Entry<'_>) -> BTreeSet<&str> {
    match entry {
        Entry::Leaf(text) => placeholder_names(text).into_iter().collect(),
        Entry::Variants(variants) => variants
            .values()
            .flat_map(|text| placeholder_names(text))
            .collect(),
        Entry::Branch(_) => BTreeSet::new(),
    }
}
