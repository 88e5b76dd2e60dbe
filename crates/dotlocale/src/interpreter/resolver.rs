//! Scope resolution with locale fallback, pluralization and interpolation.
//!
//! The [`Resolver`] owns a read-only [`Catalog`] and [`PluralRules`] together
//! with the locale settings that drive the fallback chain. A lookup runs in
//! four stages:
//!
//! 1. normalize the scope and qualify it with the namespace segment,
//! 2. walk the locale's tree, then its extras tree with the unqualified path,
//! 3. select a plural variant when a numeric count is given,
//! 4. retry in the fallback, default and English locales.
//!
//! The found string is then interpolated. Failures surface from
//! [`Resolver::try_translate`] as [`TranslateError`] and are rendered as
//! bracketed markers by [`Resolver::translate`].

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, PoisonError};

use bon::Builder;
use tracing::{debug, info};

use crate::catalog::{Catalog, Entry};
use crate::interpreter::interpolate::interpolate_with;
use crate::interpreter::number::{
    DEFAULT_SEPARATOR, HumanSizeFormat, NumberFormat, StorageUnit, render_number,
};
use crate::interpreter::{PluralRules, TranslateError, TranslateOptions};
use crate::types::Scope;

/// Last locale of every fallback chain.
const ENGLISH: &str = "en";

/// Scope segments of the unit labels used by [`Resolver::to_human_size`].
const STORAGE_UNITS_SCOPE: [&str; 4] = ["number", "human", "storage_units", "units"];

/// Scope segments of the locale's decimal separator.
const NUMBER_SEPARATOR_SCOPE: [&str; 3] = ["number", "format", "separator"];

/// How translations are reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Regular lookups with the full fallback chain.
    #[default]
    Normal,

    /// Developer mode: fallbacks are disabled, every scope is numbered the
    /// first time it is requested, and each result is suffixed with
    /// ` (#N)`.
    Verbose,
}

/// The outcome of one lookup attempt in a single locale.
#[derive(Debug, Clone, Copy)]
enum Found<'a> {
    /// A catalog position, after plural selection if any.
    Entry(Entry<'a>),
    /// The caller's default value.
    Default(&'a str),
    /// A variant mapping without the wanted category.
    MissingVariant(&'static str),
}

/// Resolves translation scopes against a catalog.
///
/// # Example
///
/// ```
/// use dotlocale::{Catalog, CatalogNode, Resolver, TranslateOptions};
///
/// let mut catalog = Catalog::new();
/// catalog
///     .insert("en", "js.greeting", "Hello, %{name}!")
///     .insert("en", "js.posts", CatalogNode::variants([
///         ("one", "1 post"),
///         ("other", "%{count} posts"),
///     ]));
///
/// let resolver = Resolver::builder().catalog(catalog).build();
///
/// let options = TranslateOptions::new().with_param("name", "Alice");
/// assert_eq!(resolver.t("greeting", &options), "Hello, Alice!");
/// assert_eq!(resolver.t("posts", &TranslateOptions::with_count(3)), "3 posts");
/// assert_eq!(resolver.t("nope", &TranslateOptions::new()), "[en.nope]");
/// ```
#[derive(Debug, Builder)]
pub struct Resolver {
    /// Translations.
    #[builder(default)]
    catalog: Catalog,

    /// Plural rules by locale.
    #[builder(default)]
    plural_rules: PluralRules,

    /// Current locale, searched first unless a call names another.
    #[builder(into, default = ENGLISH.to_string())]
    locale: String,

    /// Locale retried after the fallback locale.
    #[builder(into, default = ENGLISH.to_string())]
    default_locale: String,

    /// Locale retried first when the requested locale has no entry.
    #[builder(into)]
    fallback_locale: Option<String>,

    /// Scope separator.
    #[builder(into, default = ".".to_string())]
    separator: String,

    /// Reserved first segment of every client-visible scope.
    #[builder(into, default = "js".to_string())]
    namespace: String,

    /// Reporting mode.
    #[builder(default)]
    mode: Mode,

    /// Verbose-mode scope numbers, assigned on first request.
    #[builder(skip)]
    verbose_keys: Mutex<HashMap<String, usize>>,
}

impl Default for Resolver {
    fn default() -> Self {
        Resolver::builder().build()
    }
}

impl Resolver {
    /// Create a resolver over `catalog` with default settings.
    pub fn new(catalog: Catalog) -> Self {
        Resolver::builder().catalog(catalog).build()
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// The current locale.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Change the current locale.
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }

    /// The default locale.
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Change the default locale.
    pub fn set_default_locale(&mut self, locale: impl Into<String>) {
        self.default_locale = locale.into();
    }

    /// The fallback locale, if any.
    pub fn fallback_locale(&self) -> Option<&str> {
        self.fallback_locale.as_deref()
    }

    /// Set or clear the fallback locale.
    pub fn set_fallback_locale(&mut self, locale: Option<impl Into<String>>) {
        self.fallback_locale = locale.map(Into::into);
    }

    /// The scope separator.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Change the scope separator. Empty separators are ignored.
    pub fn set_separator(&mut self, separator: impl Into<String>) {
        let separator = separator.into();
        if !separator.is_empty() {
            self.separator = separator;
        }
    }

    /// The namespace segment.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The reporting mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The catalog being resolved against.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The plural rules in use.
    pub fn plural_rules(&self) -> &PluralRules {
        &self.plural_rules
    }

    // =========================================================================
    // Translation
    // =========================================================================

    /// Translate a scope, returning a missing-translation marker when it
    /// cannot be resolved.
    pub fn translate(&self, scope: impl Into<Scope>, options: &TranslateOptions) -> String {
        let scope = scope.into();
        let text = self.resolve(&scope, options).unwrap_or_else(|error| {
            debug!(%error, "translation missing");
            error.marker(&self.separator)
        });
        match self.mode {
            Mode::Normal => text,
            Mode::Verbose => {
                let number = self.verbose_number(&scope.join(&self.separator), options);
                format!("{text} (#{number})")
            }
        }
    }

    /// Short alias for [`Resolver::translate`].
    pub fn t(&self, scope: impl Into<Scope>, options: &TranslateOptions) -> String {
        self.translate(scope, options)
    }

    /// Translate a scope, reporting why it could not be resolved.
    ///
    /// Unlike [`Resolver::translate`], verbose mode does not number the
    /// result.
    pub fn try_translate(
        &self,
        scope: impl Into<Scope>,
        options: &TranslateOptions,
    ) -> Result<String, TranslateError> {
        self.resolve(&scope.into(), options)
    }

    /// Find the raw catalog entry for a scope in the requested locale or its
    /// extras, without defaults, pluralization or fallbacks.
    pub fn lookup(&self, scope: impl Into<Scope>, options: &TranslateOptions) -> Option<Entry<'_>> {
        let path = self.normalize(&scope.into(), options);
        self.lookup_path(&path, self.requested_locale(options))
    }

    /// Substitute placeholders in `template` from `options`.
    pub fn interpolate(&self, template: &str, options: &TranslateOptions) -> String {
        interpolate_with(template, |name| options.param(name))
    }

    fn resolve(&self, scope: &Scope, options: &TranslateOptions) -> Result<String, TranslateError> {
        let path = self.normalize(scope, options);
        let requested = self.requested_locale(options);
        match self.find_with_fallbacks(&path, requested, options) {
            Some(Found::Entry(Entry::Leaf(text)) | Found::Default(text)) => {
                Ok(self.interpolate(text, options))
            }
            Some(Found::Entry(entry)) => Err(TranslateError::InterpolationFailed {
                locale: requested.to_string(),
                scope: path,
                found: entry.kind(),
            }),
            Some(Found::MissingVariant(key)) => Err(TranslateError::MissingTranslation {
                locale: requested.to_string(),
                scope: path,
                variant: Some(key.to_string()),
            }),
            None => Err(TranslateError::MissingTranslation {
                locale: requested.to_string(),
                scope: path,
                variant: None,
            }),
        }
    }

    /// Run the lookup in the requested locale, then along the fallback chain.
    fn find_with_fallbacks<'a>(
        &'a self,
        path: &str,
        requested: &str,
        options: &'a TranslateOptions,
    ) -> Option<Found<'a>> {
        if self.mode == Mode::Verbose {
            return self.find_translation(path, requested, options, false);
        }
        if let Some(found) = self.find_translation(path, requested, options, true) {
            return Some(found);
        }
        for (locale, ignore_missing) in self.fallback_chain(requested) {
            debug!(scope = path, from = requested, to = locale, "falling back to another locale");
            if let Some(found) = self.find_translation(path, locale, options, ignore_missing) {
                return Some(found);
            }
        }
        None
    }

    /// Locales retried after `requested`, each paired with whether a missing
    /// plural variant is skipped silently.
    fn fallback_chain<'a>(&'a self, requested: &str) -> Vec<(&'a str, bool)> {
        let mut chain = Vec::with_capacity(3);
        if let Some(fallback) = self.fallback_locale.as_deref().filter(|f| *f != requested) {
            chain.push((fallback, true));
        }
        if self.default_locale != requested {
            chain.push((self.default_locale.as_str(), false));
        }
        if requested != ENGLISH && self.default_locale != ENGLISH {
            chain.push((ENGLISH, false));
        }
        chain
    }

    /// One full lookup in a single locale: tree, extras, default value, then
    /// plural selection.
    fn find_translation<'a>(
        &'a self,
        path: &str,
        locale: &str,
        options: &'a TranslateOptions,
        ignore_missing: bool,
    ) -> Option<Found<'a>> {
        let found = self
            .lookup_path(path, locale)
            .map(Found::Entry)
            .or_else(|| options.default_value.as_deref().map(Found::Default))?;

        match (found, options.plural_count()) {
            (Found::Entry(entry @ (Entry::Variants(_) | Entry::Branch(_))), Some(count)) => {
                self.pluralize(entry, count, locale, options, ignore_missing)
            }
            (found, _) => Some(found),
        }
    }

    /// Select the variant for `count`.
    ///
    /// Candidates are tried in order: the literal count (`"0"`), each
    /// category the locale's rule returns, then `"other"`.
    fn pluralize<'a>(
        &self,
        entry: Entry<'a>,
        count: f64,
        locale: &str,
        options: &TranslateOptions,
        ignore_missing: bool,
    ) -> Option<Found<'a>> {
        let categories = self.plural_rules.categories(locale, count.abs());
        let literal = options
            .count
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();

        let mut candidates: Vec<&str> = Vec::with_capacity(4);
        candidates.push(&literal);
        for category in categories.iter() {
            candidates.push(category);
        }
        candidates.push("other");

        match candidates.into_iter().find_map(|key| entry.get(key)) {
            Some(variant) => Some(Found::Entry(variant)),
            None if ignore_missing => None,
            None => Some(Found::MissingVariant(categories.first())),
        }
    }

    /// Join the scope and apply the `options.scope` prefix.
    fn normalize(&self, scope: &Scope, options: &TranslateOptions) -> String {
        let joined = scope.join(&self.separator);
        match options.scope.as_deref() {
            Some(prefix) => format!("{prefix}{}{joined}", self.separator),
            None => joined,
        }
    }

    fn requested_locale<'a>(&'a self, options: &'a TranslateOptions) -> &'a str {
        options.locale.as_deref().unwrap_or(&self.locale)
    }

    /// Walk `path` in a locale's tree, qualified with the namespace, then in
    /// its extras tree as written.
    fn lookup_path(&self, path: &str, locale: &str) -> Option<Entry<'_>> {
        let segments: Vec<&str> = path.split(self.separator.as_str()).collect();
        let qualify = segments.first().copied() != Some(self.namespace.as_str());
        let primary = self.catalog.locale(locale).and_then(|root| {
            let namespace = qualify.then_some(self.namespace.as_str());
            root.walk(namespace.into_iter().chain(segments.iter().copied()))
        });
        primary.or_else(|| {
            self.catalog
                .extras(locale)?
                .walk(segments.iter().copied())
        })
    }

    // =========================================================================
    // Numbers
    // =========================================================================

    /// Format a number. Without an explicit separator, the locale's
    /// `number.format.separator` entry is used, then `"."`.
    ///
    /// ```
    /// use dotlocale::{Catalog, NumberFormat, Resolver};
    ///
    /// let mut catalog = Catalog::new();
    /// catalog.insert("de", "js.number.format.separator", ",");
    /// let resolver = Resolver::builder().catalog(catalog).locale("de").build();
    ///
    /// let format = NumberFormat::builder().precision(2).delimiter(".").build();
    /// assert_eq!(resolver.to_number(1234.5, &format), "1.234,50");
    /// ```
    pub fn to_number(&self, number: f64, format: &NumberFormat) -> String {
        render_number(
            number,
            format.precision,
            &format.delimiter,
            self.number_separator(format.separator.as_deref()),
            format.strip_insignificant_zeros,
        )
    }

    /// Format a byte count with the largest unit up to terabytes, e.g.
    /// `"1.5KB"`.
    ///
    /// Unit labels come from `number.human.storage_units.units.<unit>`,
    /// translated with the scaled quantity as the count.
    pub fn to_human_size(&self, bytes: f64, format: &HumanSizeFormat) -> String {
        let (unit, size) = StorageUnit::scale(bytes);
        let precision = format.precision.unwrap_or_else(|| unit.precision(size));

        let mut segments = STORAGE_UNITS_SCOPE.to_vec();
        segments.push(unit.key());
        let label = self.translate(segments, &TranslateOptions::with_count(size));

        let number = render_number(
            size,
            precision,
            &format.delimiter,
            self.number_separator(format.separator.as_deref()),
            format.strip_insignificant_zeros,
        );
        format
            .format
            .replacen("%n", &number, 1)
            .replacen("%u", &label, 1)
    }

    fn number_separator<'a>(&'a self, explicit: Option<&'a str>) -> &'a str {
        if let Some(separator) = explicit {
            return separator;
        }
        let path = NUMBER_SEPARATOR_SCOPE.join(&self.separator);
        [self.locale.as_str(), self.default_locale.as_str()]
            .into_iter()
            .find_map(|locale| self.lookup_path(&path, locale).and_then(Entry::as_leaf))
            .unwrap_or(DEFAULT_SEPARATOR)
    }

    // =========================================================================
    // Verbose mode
    // =========================================================================

    /// The number assigned to `scope`, logging the request the first time.
    fn verbose_number(&self, scope: &str, options: &TranslateOptions) -> usize {
        let mut keys = self
            .verbose_keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(number) = keys.get(scope) {
            return *number;
        }
        let number = keys.len() + 1;
        keys.insert(scope.to_string(), number);

        let mut parameters: BTreeMap<&str, String> = options
            .params
            .iter()
            .map(|(name, value)| (name.as_str(), value.to_string()))
            .collect();
        if let Some(count) = &options.count {
            parameters.insert("count", count.to_string());
        }
        if parameters.is_empty() {
            info!("Translation #{number}: {scope}");
        } else {
            info!("Translation #{number}: {scope}, parameters: {parameters:?}");
        }
        number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_default_is_tried_once() {
        let resolver = Resolver::builder().fallback_locale("pt").build();
        assert_eq!(resolver.fallback_chain("fr"), vec![("pt", true), ("en", false)]);
    }

    #[test]
    fn chain_skips_the_requested_locale() {
        let resolver = Resolver::builder().default_locale("de").build();
        assert_eq!(resolver.fallback_chain("de"), vec![("en", false)]);
        assert_eq!(resolver.fallback_chain("fr"), vec![("de", false), ("en", false)]);
        assert!(Resolver::default().fallback_chain("en").is_empty());
    }
}
