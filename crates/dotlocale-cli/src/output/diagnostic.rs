//! Miette diagnostic wrapper for catalog load errors.

use std::path::Path;

use dotlocale::LoadError;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A miette-compatible diagnostic for catalog load errors.
///
/// Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(dotlocale::catalog))]
pub struct CatalogDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: Option<SourceSpan>,

    message: String,

    #[help]
    help: Option<String>,
}

impl CatalogDiagnostic {
    /// Create a diagnostic from a [`LoadError`] with source context.
    pub fn from_load_error(path: &Path, content: &str, err: &LoadError) -> Self {
        let span = err
            .position()
            .map(|(line, column)| (byte_offset(content, line, column), 1).into());
        let help = match err {
            LoadError::Json { .. } => None,
            LoadError::InvalidNode { .. } => {
                Some("catalog values must be strings or objects of strings".to_string())
            }
        };

        CatalogDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span,
            message: err.to_string(),
            help,
        }
    }
}

/// Convert a 1-based line and column to a byte offset, clamped to the
/// content length.
fn byte_offset(content: &str, line: usize, column: usize) -> usize {
    let offset = content
        .lines()
        .take(line.saturating_sub(1))
        .map(|l| l.len() + 1)
        .sum::<usize>()
        + column.saturating_sub(1);
    offset.min(content.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_count_previous_lines() {
        let content = "{\n  \"en\": }\n";
        assert_eq!(byte_offset(content, 1, 1), 0);
        assert_eq!(byte_offset(content, 2, 9), 10);
        assert_eq!(byte_offset(content, 9, 9), content.len());
    }

    #[test]
    fn invalid_nodes_have_help_and_no_span() {
        let err = LoadError::InvalidNode {
            path: "en.js.count".to_string(),
            kind: "number",
        };
        let diagnostic = CatalogDiagnostic::from_load_error(Path::new("en.json"), "{}", &err);
        assert!(diagnostic.span.is_none());
        assert!(diagnostic.help.is_some());
        assert_eq!(
            diagnostic.to_string(),
            "unsupported number value at 'en.js.count', expected a string or an object"
        );
    }
}
