//! `validate` subcommand: load a catalog and report what it holds.

use std::path::PathBuf;

use serde::Serialize;

use exobio_lib::Catalog;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// `None` for the embedded catalog.
    pub source: Option<PathBuf>,
    pub genera: usize,
    pub species: usize,
    pub rulesets: usize,
}

/// Summarize a catalog that already passed validation while loading.
pub fn handle_validate(catalog: &Catalog) -> ValidationReport {
    let rulesets = catalog
        .genera()
        .flat_map(|genus| &genus.species)
        .map(|species| species.rulesets.len())
        .sum();
    ValidationReport {
        source: catalog.source_path().map(PathBuf::from),
        genera: catalog.genus_count(),
        species: catalog.species_count(),
        rulesets,
    }
}
