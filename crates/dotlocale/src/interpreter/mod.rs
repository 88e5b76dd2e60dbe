//! Translation resolution.
//!
//! This module holds the [`Resolver`] and the pieces it is built from: plural
//! rules, placeholder interpolation, number formatting and per-call options.

mod error;
mod interpolate;
mod number;
mod options;
mod plural;
mod resolver;

pub use error::{TranslateError, compute_suggestions};
pub use interpolate::interpolate;
pub use number::{HumanSizeFormat, NumberFormat, StorageUnit, format_number};
pub use options::TranslateOptions;
pub use plural::{PLURAL_CATEGORIES, PluralCategories, PluralRuleFn, PluralRules};
pub use resolver::{Mode, Resolver};
