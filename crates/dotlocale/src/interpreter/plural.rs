//! Plural rule selection.
//!
//! A [`PluralRules`] provider maps locale codes to rules. A rule takes a
//! non-negative quantity and returns one plural category or an ordered list
//! of candidate categories. Rules come from two places:
//!
//! - rules registered explicitly with [`PluralRules::register`];
//! - CLDR cardinal rules built with ICU4X, for the languages in
//!   `SUPPORTED_LANGUAGES`.
//!
//! ICU `PluralRules` instances are cached per thread per language so repeated
//! lookups do not rebuild them.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::slice;

use fixed_decimal::Decimal;
use icu_locale_core::locale;
use icu_plurals::{
    PluralCategory, PluralOperands, PluralRuleType, PluralRules as CldrRules,
};

/// Every plural category name, in CLDR order.
pub const PLURAL_CATEGORIES: &[&str] = &["zero", "one", "two", "few", "many", "other"];

/// Locale whose rule is used when a locale has no rule of its own.
const FALLBACK_RULE_LOCALE: &str = "en";

/// Languages with CLDR rules available.
const SUPPORTED_LANGUAGES: &[&str] = &[
    "ar", "bn", "cs", "da", "de", "el", "en", "es", "fa", "fi", "fr", "he", "hi", "hu", "id", "it",
    "ja", "ko", "nl", "pl", "pt", "ro", "ru", "sv", "th", "tr", "uk", "vi", "zh",
];

thread_local! {
    /// Per-thread cache of CLDR rules keyed by language code.
    static CLDR_RULES_CACHE: RefCell<Vec<(&'static str, CldrRules)>> = const { RefCell::new(Vec::new()) };
}

/// The result of a plural rule: one category or an ordered list of
/// candidates tried in turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralCategories(Vec<&'static str>);

impl PluralCategories {
    /// The first candidate, reported when no variant matches.
    pub fn first(&self) -> &'static str {
        self.0.first().copied().unwrap_or("other")
    }

    /// Candidates in order.
    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().copied()
    }
}

impl From<&'static str> for PluralCategories {
    fn from(category: &'static str) -> Self {
        Self(vec![category])
    }
}

impl From<Vec<&'static str>> for PluralCategories {
    fn from(categories: Vec<&'static str>) -> Self {
        Self(categories)
    }
}

impl<const N: usize> From<[&'static str; N]> for PluralCategories {
    fn from(categories: [&'static str; N]) -> Self {
        Self(categories.to_vec())
    }
}

impl<'a> IntoIterator for &'a PluralCategories {
    type Item = &'a &'static str;
    type IntoIter = slice::Iter<'a, &'static str>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A plural rule function.
pub type PluralRuleFn = Box<dyn Fn(f64) -> PluralCategories + Send + Sync>;

/// Plural rules keyed by locale code.
///
/// Lookup order for a locale such as `"pl_PL"`: a rule registered for
/// `"pl_PL"`, a rule registered for the language `"pl"`, the CLDR rule for
/// `"pl"`, and finally the `"en"` rule.
///
/// # Example
///
/// ```
/// use dotlocale::PluralRules;
///
/// let rules = PluralRules::cldr();
/// assert_eq!(rules.categories("pl_PL", 3.0).first(), "few");
/// assert_eq!(rules.categories("pl", 12.0).first(), "many");
///
/// let rules = PluralRules::cldr().with_rule("en", |n| {
///     if n == 0.0 { ["zero", "other"].into() } else if n == 1.0 { "one".into() } else { "other".into() }
/// });
/// assert_eq!(rules.categories("en", 0.0).first(), "zero");
/// ```
pub struct PluralRules {
    registered: HashMap<String, PluralRuleFn>,
    cldr: bool,
}

impl PluralRules {
    /// CLDR rules for the supported languages.
    pub fn cldr() -> Self {
        Self {
            registered: HashMap::new(),
            cldr: true,
        }
    }

    /// No rules at all: every quantity maps to `"other"` until rules are
    /// registered.
    pub fn empty() -> Self {
        Self {
            registered: HashMap::new(),
            cldr: false,
        }
    }

    /// Register a rule for a locale, replacing any previous one.
    pub fn register<F>(&mut self, locale: impl Into<String>, rule: F) -> &mut Self
    where
        F: Fn(f64) -> PluralCategories + Send + Sync + 'static,
    {
        self.registered.insert(locale.into(), Box::new(rule));
        self
    }

    /// Builder-style form of [`PluralRules::register`].
    pub fn with_rule<F>(mut self, locale: impl Into<String>, rule: F) -> Self
    where
        F: Fn(f64) -> PluralCategories + Send + Sync + 'static,
    {
        self.register(locale, rule);
        self
    }

    /// Whether a locale resolves to a rule of its own rather than the
    /// `"en"` fallback.
    pub fn has_rule(&self, locale: &str) -> bool {
        self.registered_rule(locale).is_some() || self.cldr_language(locale).is_some()
    }

    /// Plural categories for a quantity in a locale.
    pub fn categories(&self, locale: &str, n: f64) -> PluralCategories {
        if let Some(rule) = self.registered_rule(locale) {
            return rule(n);
        }
        if let Some(lang) = self.cldr_language(locale) {
            return cldr_category(lang, n).into();
        }
        if let Some(rule) = self.registered.get(FALLBACK_RULE_LOCALE) {
            return rule(n);
        }
        if self.cldr {
            return cldr_category(FALLBACK_RULE_LOCALE, n).into();
        }
        "other".into()
    }

    /// Categories a locale's CLDR rule can produce.
    ///
    /// Locales with a registered rule, or with no CLDR data, accept every
    /// category since their rule's range is unknown.
    pub fn categories_for(&self, locale: &str) -> Vec<&'static str> {
        if self.registered_rule(locale).is_some() {
            return PLURAL_CATEGORIES.to_vec();
        }
        match self.cldr_language(locale) {
            Some(lang) => with_cldr_rules(lang, |rules| {
                rules.categories().map(category_str).collect()
            })
            .unwrap_or_else(|| PLURAL_CATEGORIES.to_vec()),
            None => PLURAL_CATEGORIES.to_vec(),
        }
    }

    fn registered_rule(&self, locale: &str) -> Option<&PluralRuleFn> {
        self.registered
            .get(locale)
            .or_else(|| self.registered.get(language_subtag(locale)))
    }

    fn cldr_language(&self, locale: &str) -> Option<&'static str> {
        if !self.cldr {
            return None;
        }
        let lang = language_subtag(locale).to_ascii_lowercase();
        SUPPORTED_LANGUAGES
            .iter()
            .find(|&&code| code == lang)
            .copied()
    }
}

impl Default for PluralRules {
    fn default() -> Self {
        Self::cldr()
    }
}

impl Debug for PluralRules {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut registered: Vec<&str> = self.registered.keys().map(String::as_str).collect();
        registered.sort_unstable();
        f.debug_struct("PluralRules")
            .field("registered", &registered)
            .field("cldr", &self.cldr)
            .finish()
    }
}

/// The language part of a locale code: `"pt"` for `"pt_BR"` or `"pt-BR"`.
fn language_subtag(locale: &str) -> &str {
    locale.split(['_', '-']).next().unwrap_or(locale)
}

/// Build CLDR rules for a supported language code.
fn build_rules(lang: &'static str) -> Option<CldrRules> {
    let loc = match lang {
        "ar" => locale!("ar"),
        "bn" => locale!("bn"),
        "cs" => locale!("cs"),
        "da" => locale!("da"),
        "de" => locale!("de"),
        "el" => locale!("el"),
        "es" => locale!("es"),
        "fa" => locale!("fa"),
        "fi" => locale!("fi"),
        "fr" => locale!("fr"),
        "he" => locale!("he"),
        "hi" => locale!("hi"),
        "hu" => locale!("hu"),
        "id" => locale!("id"),
        "it" => locale!("it"),
        "ja" => locale!("ja"),
        "ko" => locale!("ko"),
        "nl" => locale!("nl"),
        "pl" => locale!("pl"),
        "pt" => locale!("pt"),
        "ro" => locale!("ro"),
        "ru" => locale!("ru"),
        "sv" => locale!("sv"),
        "th" => locale!("th"),
        "tr" => locale!("tr"),
        "uk" => locale!("uk"),
        "vi" => locale!("vi"),
        "zh" => locale!("zh"),
        _ => locale!("en"),
    };
    CldrRules::try_new(loc.into(), PluralRuleType::Cardinal.into()).ok()
}

/// Run `f` with the cached CLDR rules for a language, building them on first
/// use in this thread.
fn with_cldr_rules<T>(lang: &'static str, f: impl FnOnce(&CldrRules) -> T) -> Option<T> {
    CLDR_RULES_CACHE.with_borrow_mut(|cache| {
        if let Some((_, rules)) = cache.iter().find(|(code, _)| *code == lang) {
            return Some(f(rules));
        }
        let rules = build_rules(lang)?;
        let result = f(&rules);
        cache.push((lang, rules));
        Some(result)
    })
}

/// CLDR category for a non-negative quantity.
///
/// Whole numbers go straight to ICU; fractional quantities are passed as
/// decimal operands so rules that depend on visible fraction digits apply.
fn cldr_category(lang: &'static str, n: f64) -> &'static str {
    with_cldr_rules(lang, |rules| {
        if n.fract() == 0.0 && (0.0..=9_007_199_254_740_992.0).contains(&n) {
            category_str(rules.category_for(n as u64))
        } else {
            match Decimal::try_from_str(&n.to_string()) {
                Ok(decimal) => category_str(rules.category_for(PluralOperands::from(&decimal))),
                Err(_) => "other",
            }
        }
    })
    .unwrap_or("other")
}

/// Translate a `PluralCategory` to its string representation.
fn category_str(category: PluralCategory) -> &'static str {
    match category {
        PluralCategory::Zero => "zero",
        PluralCategory::One => "one",
        PluralCategory::Two => "two",
        PluralCategory::Few => "few",
        PluralCategory::Many => "many",
        PluralCategory::Other => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_subtag_strips_region() {
        assert_eq!(language_subtag("pl_PL"), "pl");
        assert_eq!(language_subtag("pt-BR"), "pt");
        assert_eq!(language_subtag("en"), "en");
    }

    #[test]
    fn english_categories() {
        let rules = PluralRules::cldr();
        assert_eq!(rules.categories("en", 1.0).first(), "one");
        assert_eq!(rules.categories("en", 0.0).first(), "other");
        assert_eq!(rules.categories("en", 1.5).first(), "other");
    }

    #[test]
    fn unknown_locale_uses_english_rule() {
        let rules = PluralRules::cldr();
        assert!(!rules.has_rule("xx"));
        assert_eq!(rules.categories("xx", 1.0).first(), "one");
    }

    #[test]
    fn empty_rules_select_other() {
        let rules = PluralRules::empty();
        assert_eq!(rules.categories("en", 1.0).first(), "other");
    }

    #[test]
    fn registered_language_rule_applies_to_regions() {
        let rules = PluralRules::empty().with_rule("fr", |_| "many".into());
        assert_eq!(rules.categories("fr_CA", 4.0).first(), "many");
    }

    #[test]
    fn english_produces_one_and_other() {
        let rules = PluralRules::cldr();
        let mut categories = rules.categories_for("en");
        categories.sort_unstable();
        assert_eq!(categories, vec!["one", "other"]);
    }

    #[test]
    fn visible_fraction_digits_select_czech_many() {
        let rules = PluralRules::cldr();
        assert_eq!(rules.categories("cs", 1.5).first(), "many");
        assert_eq!(rules.categories("cs", 0.25).first(), "many");
        assert_eq!(rules.categories("cs", 3.0).first(), "few");
        assert_eq!(rules.categories("cs", 5.0).first(), "other");
    }
}
