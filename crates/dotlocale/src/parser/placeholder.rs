//! Template scanner using winnow.
//!
//! Splits a translation string into literal text and placeholders. Two
//! placeholder forms are recognized:
//! - `{{name}}`
//! - `%{name}`
//!
//! A placeholder opens with `{{` or `%{` and its name runs up to the first
//! `}` on the same line. The closing is a single `}` optionally followed by a
//! second one, so `{{name}` and `%{name}}` are accepted as well. An opening
//! with no closing brace is plain text.

use winnow::combinator::{alt, opt, repeat};
use winnow::prelude::*;
use winnow::token::{any, take_till};

/// A piece of a scanned template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece<'a> {
    /// Literal text, copied to output unchanged.
    Literal(&'a str),
    /// A placeholder.
    Placeholder {
        /// The full placeholder text as written, e.g. `{{name}}`.
        text: &'a str,
        /// The name between the delimiters.
        name: &'a str,
    },
}

/// Scan a template into literal and placeholder pieces.
///
/// Adjacent literal characters are merged, so a template without
/// placeholders yields at most one `Literal` piece.
pub fn parse_pieces(template: &str) -> Vec<Piece<'_>> {
    let mut remaining = template;
    let pieces: ModalResult<Vec<Piece<'_>>> = repeat(0.., piece).parse_next(&mut remaining);
    match pieces {
        Ok(pieces) => merge_literals(template, pieces),
        // `piece` consumes at least one character on every call until input
        // is exhausted, so the scan cannot stop early.
        Err(_) => vec![Piece::Literal(template)],
    }
}

/// Names of all placeholders in a template, sorted and deduplicated.
pub fn placeholder_names(template: &str) -> Vec<&str> {
    let mut names: Vec<&str> = parse_pieces(template)
        .into_iter()
        .filter_map(|piece| match piece {
            Piece::Placeholder { name, .. } => Some(name),
            Piece::Literal(_) => None,
        })
        .collect();
    names.sort_unstable();
    names.dedup();
    names
}

/// Parse a single piece: a placeholder, a run of plain text, or one opening
/// character that did not begin a placeholder.
fn piece<'a>(input: &mut &'a str) -> ModalResult<Piece<'a>> {
    alt((placeholder, literal_run, stray_char)).parse_next(input)
}

/// Parse `{{name}}`, `{{name}`, `%{name}` or `%{name}}`.
fn placeholder<'a>(input: &mut &'a str) -> ModalResult<Piece<'a>> {
    (
        alt(("{{", "%{")),
        take_till(0.., ['}', '\n']),
        '}',
        opt('}'),
    )
        .with_taken()
        .map(|((_, name, _, _), text)| Piece::Placeholder { text, name })
        .parse_next(input)
}

/// Parse text up to the next possible placeholder opening.
fn literal_run<'a>(input: &mut &'a str) -> ModalResult<Piece<'a>> {
    take_till(1.., ['{', '%'])
        .map(Piece::Literal)
        .parse_next(input)
}

/// Parse a lone `{` or `%` that did not open a placeholder.
fn stray_char<'a>(input: &mut &'a str) -> ModalResult<Piece<'a>> {
    any.take().map(Piece::Literal).parse_next(input)
}

/// Merge adjacent literals back into single slices of the original template.
fn merge_literals<'a>(template: &'a str, pieces: Vec<Piece<'a>>) -> Vec<Piece<'a>> {
    let mut merged: Vec<Piece<'a>> = Vec::with_capacity(pieces.len());
    let mut offset = 0;
    let mut literal_start: Option<usize> = None;

    for piece in pieces {
        match piece {
            Piece::Literal(text) => {
                literal_start.get_or_insert(offset);
                offset += text.len();
            }
            Piece::Placeholder { text, .. } => {
                if let Some(start) = literal_start.take() {
                    merged.push(Piece::Literal(&template[start..offset]));
                }
                offset += text.len();
                merged.push(piece);
            }
        }
    }
    if let Some(start) = literal_start {
        merged.push(Piece::Literal(&template[start..offset]));
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_one_literal() {
        assert_eq!(parse_pieces("hello world"), vec![Piece::Literal("hello world")]);
    }

    #[test]
    fn empty_template_has_no_pieces() {
        assert!(parse_pieces("").is_empty());
    }

    #[test]
    fn both_bracket_styles() {
        assert_eq!(
            parse_pieces("{{a}} and %{b}"),
            vec![
                Piece::Placeholder {
                    text: "{{a}}",
                    name: "a"
                },
                Piece::Literal(" and "),
                Piece::Placeholder {
                    text: "%{b}",
                    name: "b"
                },
            ]
        );
    }

    #[test]
    fn stray_openings_stay_literal() {
        assert_eq!(
            parse_pieces("100% {done} {{open"),
            vec![Piece::Literal("100% {done} {{open")]
        );
    }

    #[test]
    fn name_stops_at_newline() {
        assert_eq!(parse_pieces("{{a\n}}"), vec![Piece::Literal("{{a\n}}")]);
    }

    #[test]
    fn single_closing_brace_is_accepted() {
        assert_eq!(
            parse_pieces("{{a} x"),
            vec![
                Piece::Placeholder {
                    text: "{{a}",
                    name: "a"
                },
                Piece::Literal(" x"),
            ]
        );
    }

    #[test]
    fn names_are_sorted_and_unique() {
        assert_eq!(
            placeholder_names("%{b} {{a}} {{b}}"),
            vec!["a", "b"]
        );
    }
}
