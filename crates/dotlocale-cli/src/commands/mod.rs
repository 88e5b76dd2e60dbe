//! CLI command implementations.

mod check;
mod coverage;
mod translate;

use std::fs::read_to_string;
use std::path::PathBuf;

use clap::Args;
use dotlocale::Catalog;
use miette::{IntoDiagnostic, Result, WrapErr};
use tracing::debug;

use crate::output::CatalogDiagnostic;

pub use check::{CheckArgs, run_check};
pub use coverage::{CoverageArgs, run_coverage};
pub use translate::{TranslateArgs, run_translate};

/// Where the catalog comes from. Shared by every command.
#[derive(Debug, Args)]
pub struct CatalogArgs {
    /// Catalog file (.json) keyed by locale
    #[arg(long)]
    pub catalog: PathBuf,

    /// The file has `translations` and `extras` objects at the top level
    #[arg(long)]
    pub with_extras: bool,
}

impl CatalogArgs {
    /// Read and parse the catalog, reporting JSON errors with source context.
    pub fn load(&self) -> Result<Catalog> {
        let content = read_to_string(&self.catalog)
            .into_diagnostic()
            .wrap_err_with(|| format!("Cannot read catalog file {}", self.catalog.display()))?;

        let loaded = if self.with_extras {
            Catalog::from_json_parts(&content)
        } else {
            Catalog::from_json_str(&content)
        };
        let catalog = loaded
            .map_err(|err| CatalogDiagnostic::from_load_error(&self.catalog, &content, &err))?;

        debug!(
            path = %self.catalog.display(),
            locales = catalog.locales().count(),
            "loaded catalog"
        );
        Ok(catalog)
    }
}
