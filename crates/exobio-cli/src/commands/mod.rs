//! Subcommand handlers.
//!
//! Each handler returns a report value; `main.rs` picks the renderer. Keeping
//! printing out of the handlers lets the unit tests inspect results directly.

pub mod estimate;
pub mod genera;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use exobio_lib::Catalog;

/// Environment variable naming a catalog file to use instead of the builtin.
pub const CATALOG_ENV: &str = "EXOBIO_CATALOG";

/// Catalog path from the `--catalog` flag, falling back to `EXOBIO_CATALOG`.
pub fn catalog_path(flag: Option<&Path>) -> Option<PathBuf> {
    flag.map(Path::to_path_buf).or_else(|| {
        std::env::var_os(CATALOG_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    })
}

/// Load the catalog named by `path`, or the embedded one when `None`.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading catalog override");
            Catalog::from_path(path)
                .with_context(|| format!("failed to load catalog from {}", path.display()))
        }
        None => Catalog::builtin()
            .cloned()
            .context("embedded catalog failed validation"),
    }
}
