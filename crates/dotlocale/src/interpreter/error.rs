//! Error types for translation resolution.

use thiserror::Error;

/// Why a translation could not be produced.
///
/// [`Resolver::translate`](crate::Resolver::translate) never returns these;
/// it renders them as a missing-translation marker via
/// [`TranslateError::marker`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    /// No entry exists for the scope in any attempted locale, or no plural
    /// variant matched.
    #[error(
        "missing translation '{scope}' for locale '{locale}'{}",
        variant.as_ref().map(|key| format!(" (variant '{key}')")).unwrap_or_default()
    )]
    MissingTranslation {
        locale: String,
        scope: String,
        variant: Option<String>,
    },

    /// The scope resolved to something that is not a string.
    #[error("translation '{scope}' for locale '{locale}' resolved to {found}, not a string")]
    InterpolationFailed {
        locale: String,
        scope: String,
        found: &'static str,
    },
}

impl TranslateError {
    /// The bracketed marker shown in place of the translation, such as
    /// `[en.topic.title]` or `[pl.posts.few]`.
    pub fn marker(&self, separator: &str) -> String {
        match self {
            TranslateError::MissingTranslation {
                locale,
                scope,
                variant: Some(key),
            } => format!("[{locale}{separator}{scope}{separator}{key}]"),
            TranslateError::MissingTranslation {
                locale,
                scope,
                variant: None,
            }
            | TranslateError::InterpolationFailed { locale, scope, .. } => {
                format!("[{locale}{separator}{scope}]")
            }
        }
    }
}

/// Compute suggestions for a misspelled key using Levenshtein distance.
///
/// Returns up to 3 suggestions sorted by edit distance (closest first).
/// Keys of 3 characters or fewer allow a distance of 1, longer keys 2.
pub fn compute_suggestions(target: &str, available: &[String]) -> Vec<String> {
    let max_distance = if target.chars().count() <= 3 { 1 } else { 2 };
    let mut scored: Vec<(usize, &String)> = available
        .iter()
        .map(|candidate| (strsim::levenshtein(target, candidate), candidate))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.clone())
        .collect()
}
