//! The translation catalog.
//!
//! A [`Catalog`] holds one node tree per locale plus an optional per-locale
//! "extras" tree for supplementary content. Trees are built once, either in
//! code via [`Catalog::insert`] or from JSON, and read by the resolver.

mod error;
mod node;
mod validate;

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map as JsonMap, Value as JsonValue};

pub use error::LoadError;
pub use node::{CatalogNode, Entry, is_variant_key};
pub use validate::{CatalogWarning, validate_locale};

/// Separator used for paths passed to [`Catalog::insert`] and returned by
/// [`Catalog::scopes`].
const PATH_SEPARATOR: char = '.';

/// Translation trees keyed by locale code.
///
/// # Example
///
/// ```
/// use dotlocale::{Catalog, CatalogNode};
///
/// let mut catalog = Catalog::new();
/// catalog
///     .insert("en", "js.topic.title", "Topic")
///     .insert("en", "js.topic.replies", CatalogNode::variants([
///         ("one", "1 reply"),
///         ("other", "%{count} replies"),
///     ]));
///
/// assert_eq!(catalog.scopes("en"), vec!["js.topic.replies", "js.topic.title"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    translations: BTreeMap<String, CatalogNode>,
    extras: BTreeMap<String, CatalogNode>,
}

/// JSON shape accepted by [`Catalog::from_json_parts`].
#[derive(Deserialize)]
struct CatalogParts {
    translations: JsonMap<String, JsonValue>,
    #[serde(default)]
    extras: JsonMap<String, JsonValue>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from `{ "<locale>": { "js": { ... } } }`.
    ///
    /// ```
    /// use dotlocale::Catalog;
    ///
    /// let catalog = Catalog::from_json_str(r#"{"en": {"js": {"hello": "Hello"}}}"#).unwrap();
    /// assert!(catalog.has_locale("en"));
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let root: JsonMap<String, JsonValue> = serde_json::from_str(json)?;
        Ok(Self {
            translations: trees_from_json(&root)?,
            extras: BTreeMap::new(),
        })
    }

    /// Build a catalog from `{ "translations": {...}, "extras": {...} }`.
    ///
    /// `extras` is optional and uses the same per-locale shape as
    /// `translations`, without the namespace segment.
    pub fn from_json_parts(json: &str) -> Result<Self, LoadError> {
        let parts: CatalogParts = serde_json::from_str(json)?;
        let translations = trees_from_json(&parts.translations)?;
        let extras = trees_from_json(&parts.extras)?;
        Ok(Self {
            translations,
            extras,
        })
    }

    /// Insert a node at a dotted `path` in `locale`'s tree.
    ///
    /// The path is taken literally, so translations exposed to the resolver
    /// must include the namespace segment (`"js.greeting"`).
    pub fn insert(&mut self, locale: &str, path: &str, node: impl Into<CatalogNode>) -> &mut Self {
        insert_into(&mut self.translations, locale, path, node.into());
        self
    }

    /// Insert a node at a dotted `path` in `locale`'s extras tree.
    pub fn insert_extra(
        &mut self,
        locale: &str,
        path: &str,
        node: impl Into<CatalogNode>,
    ) -> &mut Self {
        insert_into(&mut self.extras, locale, path, node.into());
        self
    }

    /// The translation tree for a locale.
    pub fn locale(&self, locale: &str) -> Option<&CatalogNode> {
        self.translations.get(locale)
    }

    /// The extras tree for a locale.
    pub fn extras(&self, locale: &str) -> Option<&CatalogNode> {
        self.extras.get(locale)
    }

    /// Whether any translations exist for a locale.
    pub fn has_locale(&self, locale: &str) -> bool {
        self.translations.contains_key(locale)
    }

    /// Locale codes with translations, in sorted order.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.translations.keys().map(String::as_str)
    }

    /// Every leaf and variant mapping in a locale's tree, with its dotted
    /// path, in path order.
    pub fn entries(&self, locale: &str) -> Vec<(String, Entry<'_>)> {
        let mut entries = Vec::new();
        if let Some(root) = self.translations.get(locale) {
            collect_entries(root, &mut Vec::new(), &mut entries);
        }
        entries
    }

    /// Dotted paths of every leaf and variant mapping in a locale's tree.
    pub fn scopes(&self, locale: &str) -> Vec<String> {
        self.entries(locale).into_iter().map(|(path, _)| path).collect()
    }
}

fn insert_into(
    trees: &mut BTreeMap<String, CatalogNode>,
    locale: &str,
    path: &str,
    node: CatalogNode,
) {
    let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
    trees
        .entry(locale.to_string())
        .or_insert_with(CatalogNode::branch)
        .insert_path(&segments, node);
}

fn trees_from_json(
    root: &JsonMap<String, JsonValue>,
) -> Result<BTreeMap<String, CatalogNode>, LoadError> {
    let mut trees = BTreeMap::new();
    for (locale, value) in root {
        let mut path = vec![locale.clone()];
        let node = CatalogNode::from_json(value, &mut path)?;
        trees.insert(locale.clone(), node);
    }
    Ok(trees)
}

fn collect_entries<'a>(
    node: &'a CatalogNode,
    prefix: &mut Vec<&'a str>,
    entries: &mut Vec<(String, Entry<'a>)>,
) {
    match node {
        CatalogNode::Branch(children) => {
            for (segment, child) in children {
                prefix.push(segment);
                collect_entries(child, prefix, entries);
                prefix.pop();
            }
        }
        CatalogNode::Leaf(_) | CatalogNode::Variants(_) => {
            entries.push((prefix.join("."), node.entry()));
        }
    }
}
