//! Catalog tree nodes.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

use crate::catalog::LoadError;
use crate::interpreter::PLURAL_CATEGORIES;

/// A node in a locale's translation tree.
///
/// A tree maps scope segments to nested branches until it reaches a leaf
/// string or a plural variant mapping.
///
/// ```
/// use dotlocale::CatalogNode;
///
/// let posts = CatalogNode::variants([("one", "1 post"), ("other", "%{count} posts")]);
/// assert_eq!(posts.kind(), "plural variants");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogNode {
    /// A translated string, possibly with placeholders.
    Leaf(String),
    /// Plural variants keyed by category ("one", "few", ...) or numeral ("0").
    Variants(BTreeMap<String, String>),
    /// Nested scope segments.
    Branch(BTreeMap<String, CatalogNode>),
}

/// A borrowed view of a resolved catalog position.
///
/// Walking into a variant mapping by key yields a `Leaf`, so callers can
/// address a single variant as `"posts.one"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry<'a> {
    Leaf(&'a str),
    Variants(&'a BTreeMap<String, String>),
    Branch(&'a BTreeMap<String, CatalogNode>),
}

impl CatalogNode {
    /// An empty branch.
    pub fn branch() -> Self {
        CatalogNode::Branch(BTreeMap::new())
    }

    /// A plural variant mapping built from `(key, text)` pairs.
    pub fn variants<K, V>(variants: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        CatalogNode::Variants(
            variants
                .into_iter()
                .map(|(key, text)| (key.into(), text.into()))
                .collect(),
        )
    }

    /// Borrow this node as an [`Entry`].
    pub fn entry(&self) -> Entry<'_> {
        match self {
            CatalogNode::Leaf(text) => Entry::Leaf(text),
            CatalogNode::Variants(variants) => Entry::Variants(variants),
            CatalogNode::Branch(children) => Entry::Branch(children),
        }
    }

    /// Walk `segments` from this node.
    ///
    /// Returns `None` as soon as a segment is absent or the current position
    /// is a leaf with segments still remaining.
    pub fn walk<'a, 's>(&'a self, segments: impl IntoIterator<Item = &'s str>) -> Option<Entry<'a>> {
        let mut current = self.entry();
        for segment in segments {
            current = current.get(segment)?;
        }
        Some(current)
    }

    /// Human-readable kind of this node.
    pub fn kind(&self) -> &'static str {
        self.entry().kind()
    }

    /// Place `node` at `segments` below this node, creating branches as
    /// needed. Non-branch nodes on the way are replaced by branches.
    pub(crate) fn insert_path(&mut self, segments: &[&str], node: CatalogNode) {
        let Some((first, rest)) = segments.split_first() else {
            *self = node;
            return;
        };
        if !matches!(self, CatalogNode::Branch(_)) {
            *self = CatalogNode::branch();
        }
        if let CatalogNode::Branch(children) = self {
            children
                .entry((*first).to_string())
                .or_insert_with(CatalogNode::branch)
                .insert_path(rest, node);
        }
    }

    /// Convert a JSON value, tracking the dotted path for error reporting.
    pub(crate) fn from_json(value: &JsonValue, path: &mut Vec<String>) -> Result<Self, LoadError> {
        match value {
            JsonValue::String(text) => Ok(CatalogNode::Leaf(text.clone())),
            JsonValue::Object(map) if is_variant_map(map) => Ok(CatalogNode::Variants(
                map.iter()
                    .filter_map(|(key, text)| text.as_str().map(|text| (key.clone(), text.to_string())))
                    .collect(),
            )),
            JsonValue::Object(map) => {
                let mut children = BTreeMap::new();
                for (key, child) in map {
                    path.push(key.clone());
                    let node = CatalogNode::from_json(child, path)?;
                    path.pop();
                    children.insert(key.clone(), node);
                }
                Ok(CatalogNode::Branch(children))
            }
            other => Err(LoadError::InvalidNode {
                path: path.join("."),
                kind: json_kind(other),
            }),
        }
    }
}

impl<'a> Entry<'a> {
    /// Look up a child by key.
    pub fn get(self, key: &str) -> Option<Entry<'a>> {
        match self {
            Entry::Leaf(_) => None,
            Entry::Variants(variants) => variants.get(key).map(|text| Entry::Leaf(text)),
            Entry::Branch(children) => children.get(key).map(CatalogNode::entry),
        }
    }

    /// The text of a leaf.
    pub fn as_leaf(self) -> Option<&'a str> {
        match self {
            Entry::Leaf(text) => Some(text),
            Entry::Variants(_) | Entry::Branch(_) => None,
        }
    }

    /// Human-readable kind of this entry.
    pub fn kind(self) -> &'static str {
        match self {
            Entry::Leaf(_) => "string",
            Entry::Variants(_) => "plural variants",
            Entry::Branch(_) => "branch",
        }
    }
}

impl From<&str> for CatalogNode {
    fn from(text: &str) -> Self {
        CatalogNode::Leaf(text.to_string())
    }
}

impl From<String> for CatalogNode {
    fn from(text: String) -> Self {
        CatalogNode::Leaf(text)
    }
}

impl<'de> Deserialize<'de> for CatalogNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = JsonValue::deserialize(deserializer)?;
        CatalogNode::from_json(&value, &mut Vec::new()).map_err(D::Error::custom)
    }
}

/// Whether `key` may appear in a plural variant mapping.
pub fn is_variant_key(key: &str) -> bool {
    PLURAL_CATEGORIES.contains(&key) || (!key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()))
}

fn is_variant_map(map: &serde_json::Map<String, JsonValue>) -> bool {
    !map.is_empty()
        && map
            .iter()
            .all(|(key, value)| is_variant_key(key) && value.is_string())
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
