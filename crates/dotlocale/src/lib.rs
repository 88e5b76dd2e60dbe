pub mod catalog;
pub mod interpreter;
pub mod parser;
pub mod types;

#[cfg(feature = "global-resolver")]
mod global;

pub use catalog::{Catalog, CatalogNode, CatalogWarning, Entry, LoadError, validate_locale};
pub use interpreter::{
    HumanSizeFormat, Mode, NumberFormat, PluralCategories, PluralRules, Resolver, StorageUnit,
    TranslateError, TranslateOptions, compute_suggestions, format_number, interpolate,
};
pub use parser::placeholder_names;
pub use types::{Scope, Value};

#[cfg(feature = "global-resolver")]
pub use global::{install, locale, set_locale, t, with_resolver, with_resolver_mut};

/// Creates a `HashMap<String, Value>` of placeholder parameters.
///
/// Values are converted via `Into<Value>`, so integers, floats and strings
/// can be passed directly.
///
/// # Example
///
/// ```
/// use dotlocale::{params, Value};
///
/// let p = params! { "count" => 3, "name" => "Alice" };
/// assert_eq!(p.len(), 2);
/// assert_eq!(p["count"].as_number(), Some(3));
/// assert_eq!(p["name"].as_string(), Some("Alice"));
/// ```
#[macro_export]
macro_rules! params {
    {} => {
        ::std::collections::HashMap::<String, $crate::Value>::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::HashMap::<String, $crate::Value>::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}
