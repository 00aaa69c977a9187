//! `genera` subcommand: catalog listing.

use anyhow::Result;
use serde::Serialize;

use exobio_lib::{Catalog, Genus};

/// One row of the genus listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenusSummary {
    pub id: String,
    pub name: String,
    pub colony_range: u32,
    pub species_count: usize,
    pub min_value: u64,
    pub max_value: u64,
}

impl GenusSummary {
    fn from_genus(genus: &Genus) -> Self {
        let (min_value, max_value) = genus.value_span();
        Self {
            id: genus.id.clone(),
            name: genus.name.clone(),
            colony_range: genus.colony_range,
            species_count: genus.species.len(),
            min_value,
            max_value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeciesSummary {
    pub id: String,
    pub name: String,
    pub value: u64,
    pub rulesets: usize,
}

/// Species of a single genus, ascending by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenusDetail {
    #[serde(flatten)]
    pub summary: GenusSummary,
    pub species: Vec<SpeciesSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum GeneraReport {
    List(Vec<GenusSummary>),
    Detail(GenusDetail),
}

/// Handle the `genera` subcommand.
///
/// Without a genus every catalog genus is summarized in catalog order. With
/// one, its species are listed; unknown names fail with suggestions.
pub fn handle_genera(catalog: &Catalog, genus: Option<&str>) -> Result<GeneraReport> {
    let Some(key) = genus else {
        return Ok(GeneraReport::List(
            catalog.genera().map(GenusSummary::from_genus).collect(),
        ));
    };

    let genus = catalog.require_genus(key)?;
    let mut species: Vec<SpeciesSummary> = genus
        .species
        .iter()
        .map(|species| SpeciesSummary {
            id: species.id.clone(),
            name: species.name.clone(),
            value: species.value,
            rulesets: species.rulesets.len(),
        })
        .collect();
    species.sort_by_key(|species| species.value);

    Ok(GeneraReport::Detail(GenusDetail {
        summary: GenusSummary::from_genus(genus),
        species,
    }))
}
