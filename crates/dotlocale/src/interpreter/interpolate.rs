//! Placeholder substitution.

use std::collections::HashMap;

use crate::parser::{Piece, parse_pieces};
use crate::types::Value;

/// Substitute placeholders in `template` from `params`.
///
/// Every occurrence of `{{name}}` or `%{name}` is replaced in one
/// left-to-right pass. Substituted text is not rescanned. A placeholder with
/// no value becomes `[missing {{name}} value]`, keeping its original
/// delimiters.
///
/// # Example
///
/// ```
/// use dotlocale::{interpolate, params};
///
/// assert_eq!(interpolate("Hello {{name}}", &params! { "name" => "World" }), "Hello World");
/// assert_eq!(interpolate("Hi %{name}", &params! {}), "Hi [missing %{name} value]");
/// assert_eq!(interpolate("{{a}}", &params! { "a" => "$5" }), "$5");
/// ```
pub fn interpolate(template: &str, params: &HashMap<String, Value>) -> String {
    interpolate_with(template, |name| params.get(name))
}

/// Substitute placeholders using a lookup function.
pub(crate) fn interpolate_with<'v>(
    template: &str,
    lookup: impl Fn(&str) -> Option<&'v Value>,
) -> String {
    let mut output = String::with_capacity(template.len());
    for piece in parse_pieces(template) {
        match piece {
            Piece::Literal(text) => output.push_str(text),
            Piece::Placeholder { text, name } => match lookup(name) {
                Some(value) => output.push_str(&value.to_string()),
                None => {
                    output.push_str("[missing ");
                    output.push_str(text);
                    output.push_str(" value]");
                }
            },
        }
    }
    output
}
