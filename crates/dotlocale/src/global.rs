//! Process-wide resolver for the `global-resolver` feature.
//!
//! Provides thread-safe access to a shared `Resolver`, removing the need to
//! pass one to every call site. Settings changes go through a write lock, so
//! a locale switch never interleaves with a lookup in progress.

use std::sync::{LazyLock, PoisonError, RwLock};

use crate::{Resolver, Scope, TranslateOptions};

static GLOBAL_RESOLVER: LazyLock<RwLock<Resolver>> =
    LazyLock::new(|| RwLock::new(Resolver::default()));

/// Provides read access to the global resolver.
pub fn with_resolver<T>(f: impl FnOnce(&Resolver) -> T) -> T {
    let guard = GLOBAL_RESOLVER
        .read()
        .unwrap_or_else(PoisonError::into_inner);
    f(&guard)
}

/// Provides write access to the global resolver.
pub fn with_resolver_mut<T>(f: impl FnOnce(&mut Resolver) -> T) -> T {
    let mut guard = GLOBAL_RESOLVER
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

/// Replaces the global resolver.
pub fn install(resolver: Resolver) {
    with_resolver_mut(|current| *current = resolver);
}

/// Sets the current locale of the global resolver.
pub fn set_locale(locale: impl Into<String>) {
    with_resolver_mut(|resolver| resolver.set_locale(locale));
}

/// Returns the current locale of the global resolver.
pub fn locale() -> String {
    with_resolver(|resolver| resolver.locale().to_owned())
}

/// Translates with the global resolver.
pub fn t(scope: impl Into<Scope>, options: &TranslateOptions) -> String {
    with_resolver(|resolver| resolver.translate(scope, options))
}
