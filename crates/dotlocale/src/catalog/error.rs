//! Error types for catalog loading.

use thiserror::Error;

/// Errors that occur while building a catalog from JSON.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The input was not valid JSON or did not have the expected top-level shape.
    #[error("invalid catalog JSON: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
    },

    /// A value that is neither a string nor an object.
    #[error("unsupported {kind} value at '{path}', expected a string or an object")]
    InvalidNode { path: String, kind: &'static str },
}

impl LoadError {
    /// Line and column of a JSON syntax error, when known.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            LoadError::Json { source } if source.line() > 0 => {
                Some((source.line(), source.column()))
            }
            LoadError::Json { .. } | LoadError::InvalidNode { .. } => None,
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(source: serde_json::Error) -> Self {
        LoadError::Json { source }
    }
}
