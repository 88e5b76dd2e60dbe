/// A translation scope: either a separator-delimited path or an ordered list
/// of segments.
///
/// Segment lists are joined with the resolver's separator before lookup, so
/// `["topic", "replies"]` and `"topic.replies"` name the same entry under the
/// default separator.
///
/// ```
/// use dotlocale::Scope;
///
/// assert_eq!(Scope::from(["topic", "replies"]).join("."), "topic.replies");
/// assert_eq!(Scope::from("topic.replies").join("."), "topic.replies");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// A path such as `"topic.replies"`.
    Path(String),
    /// Ordered path segments.
    Segments(Vec<String>),
}

impl Scope {
    /// Join this scope into a single path string.
    pub fn join(&self, separator: &str) -> String {
        match self {
            Scope::Path(path) => path.clone(),
            Scope::Segments(segments) => segments.join(separator),
        }
    }
}

impl From<&str> for Scope {
    fn from(path: &str) -> Self {
        Scope::Path(path.to_string())
    }
}

impl From<String> for Scope {
    fn from(path: String) -> Self {
        Scope::Path(path)
    }
}

impl From<&String> for Scope {
    fn from(path: &String) -> Self {
        Scope::Path(path.clone())
    }
}

impl From<Vec<String>> for Scope {
    fn from(segments: Vec<String>) -> Self {
        Scope::Segments(segments)
    }
}

impl From<Vec<&str>> for Scope {
    fn from(segments: Vec<&str>) -> Self {
        Scope::Segments(segments.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Scope {
    fn from(segments: &[&str]) -> Self {
        Scope::Segments(segments.iter().map(|s| (*s).to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Scope {
    fn from(segments: [&str; N]) -> Self {
        Scope::Segments(segments.iter().map(|s| (*s).to_string()).collect())
    }
}
