//! Genus and species definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::ruleset::Ruleset;

/// Species-level color tables.
///
/// `star` is keyed by spectral class, `element` by lowercase material name.
/// When both are present the star table wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpeciesColors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub star: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<BTreeMap<String, String>>,
}

impl SpeciesColors {
    pub fn is_empty(&self) -> bool {
        self.star.is_none() && self.element.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Species {
    /// Stable identifier, e.g. `aleoida_arcus`.
    pub id: String,
    /// Display name, e.g. `Aleoida Arcus`.
    pub name: String,
    /// Base credit value.
    pub value: u64,
    pub rulesets: Vec<Ruleset>,
    #[serde(default, skip_serializing_if = "SpeciesColors::is_empty")]
    pub colors: SpeciesColors,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Genus {
    pub id: String,
    pub name: String,
    /// Minimum distance between distinct samples, in meters.
    pub colony_range: u32,
    /// Genus-wide color table keyed by spectral class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub star_colors: Option<BTreeMap<String, String>>,
    pub species: Vec<Species>,
}

impl Genus {
    pub fn species_by_id(&self, id: &str) -> Option<&Species> {
        self.species.iter().find(|species| species.id == id)
    }

    /// Lowest and highest base value across all species of the genus.
    pub fn value_span(&self) -> (u64, u64) {
        let min = self.species.iter().map(|s| s.value).min().unwrap_or(0);
        let max = self.species.iter().map(|s| s.value).max().unwrap_or(0);
        (min, max)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() || self.name.trim().is_empty() {
            return Err(Error::validation("genus id and name must not be empty"));
        }
        if self.species.is_empty() {
            return Err(Error::validation(format!(
                "genus {} has no species",
                self.name
            )));
        }
        if let Some(colors) = &self.star_colors {
            validate_color_table(colors, &self.name, "star_colors")?;
        }
        for species in &self.species {
            species.validate()?;
        }
        Ok(())
    }
}

impl Species {
    fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() || self.name.trim().is_empty() {
            return Err(Error::validation("species id and name must not be empty"));
        }
        if self.value == 0 {
            return Err(Error::validation(format!(
                "species {} must have a positive value",
                self.name
            )));
        }
        if self.rulesets.is_empty() {
            return Err(Error::validation(format!(
                "species {} has no rulesets",
                self.name
            )));
        }
        for ruleset in &self.rulesets {
            ruleset.validate(&self.name)?;
        }
        if let Some(star) = &self.colors.star {
            validate_color_table(star, &self.name, "star colors")?;
        }
        if let Some(element) = &self.colors.element {
            validate_color_table(element, &self.name, "element colors")?;
            if element.keys().any(|k| k.chars().any(char::is_uppercase)) {
                return Err(Error::validation(format!(
                    "species {} element colors must be keyed by lowercase material",
                    self.name
                )));
            }
        }
        Ok(())
    }
}

fn validate_color_table(table: &BTreeMap<String, String>, owner: &str, kind: &str) -> Result<()> {
    if table.is_empty() {
        return Err(Error::validation(format!("{owner} has an empty {kind} table")));
    }
    if table.iter().any(|(k, v)| k.trim().is_empty() || v.trim().is_empty()) {
        return Err(Error::validation(format!(
            "{owner} has a blank entry in its {kind} table"
        )));
    }
    Ok(())
}
