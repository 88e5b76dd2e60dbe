//! Per-call translation options.

use std::collections::HashMap;

use bon::Builder;

use crate::types::Value;

/// Options for a single [`Resolver::translate`](crate::Resolver::translate)
/// call.
///
/// # Example
///
/// ```
/// use dotlocale::{params, TranslateOptions};
///
/// let options = TranslateOptions::builder()
///     .locale("pl_PL")
///     .count(3)
///     .params(params! { "username" => "alice" })
///     .build();
///
/// assert_eq!(options.param("count").map(ToString::to_string), Some("3".to_string()));
/// assert_eq!(options.param("username").map(ToString::to_string), Some("alice".to_string()));
/// ```
#[derive(Debug, Clone, Default, Builder)]
pub struct TranslateOptions {
    /// Locale to search first. Defaults to the resolver's current locale.
    #[builder(into)]
    pub locale: Option<String>,

    /// Prefix prepended to the scope with the separator.
    #[builder(into)]
    pub scope: Option<String>,

    /// Quantity for plural selection. Also available to placeholders as
    /// `count`. A string count is only a placeholder value.
    #[builder(into)]
    pub count: Option<Value>,

    /// Text used when no catalog entry exists. It is interpolated like a
    /// catalog string.
    #[builder(into)]
    pub default_value: Option<String>,

    /// Placeholder values.
    #[builder(default)]
    pub params: HashMap<String, Value>,
}

impl TranslateOptions {
    /// Options with no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options carrying only a plural count.
    pub fn with_count(count: impl Into<Value>) -> Self {
        Self {
            count: Some(count.into()),
            ..Self::default()
        }
    }

    /// Look up a placeholder value. `count` falls back to the plural count.
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params.get(name).or_else(|| match name {
            "count" => self.count.as_ref(),
            _ => None,
        })
    }

    /// Set a placeholder value, builder style.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// The count as a number, when pluralization applies.
    pub(crate) fn plural_count(&self) -> Option<f64> {
        self.count.as_ref().and_then(Value::as_float)
    }
}
