//! Species catalog: genus → species → rulesets, plus color tables.
//!
//! - [`ruleset`] - the predicate record evaluated against body snapshots
//! - [`species`] - genus and species definitions with their color tables
//!
//! The catalog is loaded from JSON and validated once. Any duplicate or
//! malformed entry aborts loading; there is no partial catalog. An embedded
//! catalog is available through [`Catalog::builtin`].
//!
//! # Example
//!
//! ```
//! use exobio_lib::Catalog;
//!
//! let catalog = Catalog::builtin().expect("embedded catalog is valid");
//! let aleoida = catalog.genus("aleoida").expect("genus present");
//! assert_eq!(aleoida.name, "Aleoida");
//! ```

pub mod ruleset;
pub mod species;

use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Error, Result};

pub use ruleset::{
    AtmosphereRule, Bounds, RegionEntry, Ruleset, SpecialCondition, StarRequirement,
    VolcanismRule,
};
pub use species::{Genus, Species, SpeciesColors};

const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

static BUILTIN: OnceCell<Catalog> = OnceCell::new();

/// Similarity threshold for genus name suggestions.
const SUGGESTION_THRESHOLD: f64 = 0.8;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    genera: Vec<Genus>,
}

/// Validated, immutable species catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    genera: Vec<Genus>,
    genus_index: HashMap<String, usize>,
    name_index: HashMap<String, usize>,
    species_index: HashMap<String, (usize, usize)>,
    source: Option<PathBuf>,
}

impl Catalog {
    /// The embedded catalog, parsed and validated on first use.
    pub fn builtin() -> Result<&'static Catalog> {
        BUILTIN.get_or_try_init(|| Self::from_json_str(BUILTIN_CATALOG))
    }

    /// Load a catalog from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;
        let mut catalog = Self::from_reader(file)?;
        catalog.source = Some(path.to_path_buf());
        Ok(catalog)
    }

    /// Load a catalog from a reader (e.g. file or in-memory buffer).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let file: CatalogFile = serde_json::from_reader(reader)?;
        Self::from_genera(file.genera)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::from_genera(file.genera)
    }

    /// Validate and index a list of genera.
    pub fn from_genera(genera: Vec<Genus>) -> Result<Self> {
        if genera.is_empty() {
            return Err(Error::validation("catalog contains no genera"));
        }

        let mut genus_index = HashMap::new();
        let mut name_index = HashMap::new();
        let mut species_index = HashMap::new();
        let mut species_names: HashMap<String, String> = HashMap::new();

        for (g, genus) in genera.iter().enumerate() {
            genus.validate()?;

            if genus_index.insert(genus.id.clone(), g).is_some()
                || name_index.insert(normalize_name(&genus.name), g).is_some()
            {
                return Err(Error::DuplicateGenus {
                    id: genus.id.clone(),
                });
            }

            for (s, species) in genus.species.iter().enumerate() {
                let duplicate_id = species_index.insert(species.id.clone(), (g, s)).is_some();
                let duplicate_name = species_names
                    .insert(normalize_name(&species.name), genus.id.clone())
                    .is_some();
                if duplicate_id || duplicate_name {
                    return Err(Error::DuplicateSpecies {
                        name: species.name.clone(),
                        genus: genus.id.clone(),
                    });
                }
            }
            debug!(genus = %genus.id, species = genus.species.len(), "indexed genus");
        }

        info!(
            genera = genera.len(),
            species = species_index.len(),
            "loaded species catalog"
        );

        Ok(Self {
            genera,
            genus_index,
            name_index,
            species_index,
            source: None,
        })
    }

    /// Lookup a genus by identifier, falling back to a case-insensitive
    /// display name match.
    pub fn genus(&self, key: &str) -> Option<&Genus> {
        self.genus_index
            .get(key)
            .or_else(|| self.name_index.get(&normalize_name(key)))
            .map(|&index| &self.genera[index])
    }

    /// Like [`Catalog::genus`] but reports close matches on failure.
    pub fn require_genus(&self, key: &str) -> Result<&Genus> {
        self.genus(key).ok_or_else(|| Error::UnknownGenus {
            name: key.to_string(),
            suggestions: self.fuzzy_genus_matches(key, 3),
        })
    }

    /// Species and its genus by species identifier.
    pub fn species(&self, id: &str) -> Option<(&Genus, &Species)> {
        self.species_index.get(id).map(|&(g, s)| {
            let genus = &self.genera[g];
            (genus, &genus.species[s])
        })
    }

    /// Genera in catalog order.
    pub fn genera(&self) -> impl Iterator<Item = &Genus> {
        self.genera.iter()
    }

    pub fn genus_count(&self) -> usize {
        self.genera.len()
    }

    pub fn species_count(&self) -> usize {
        self.species_index.len()
    }

    /// Get the source path if the catalog was loaded from a file.
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Genus display names most similar to `name`, best first.
    pub fn fuzzy_genus_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = normalize_name(name);
        let mut scored: Vec<(f64, &str)> = self
            .genera
            .iter()
            .map(|genus| {
                let score = strsim::jaro_winkler(&needle, &normalize_name(&genus.name));
                (score, genus.name.as_str())
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, name)| name.to_string())
            .collect()
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
