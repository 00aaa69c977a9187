//! Ruleset record: one alternative set of AND-combined predicates.
//!
//! Every predicate is a named optional field. An absent field imposes no
//! constraint. Rulesets are deserialized with `deny_unknown_fields` so a
//! misspelled predicate fails catalog loading instead of silently matching.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::region;

/// Inclusive numeric bounds; an unset side is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Bounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl Bounds {
    pub fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }

    fn validate(&self, field: &str) -> Result<()> {
        if self.min.is_none() && self.max.is_none() {
            return Err(Error::validation(format!("{field} bounds must set min or max")));
        }
        for value in [self.min, self.max].into_iter().flatten() {
            if !value.is_finite() {
                return Err(Error::validation(format!("{field} bounds must be finite")));
            }
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(Error::validation(format!(
                    "{field} bounds are inverted ({min} > {max})"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtmosphereRule {
    /// Any atmosphere at all.
    Any,
    /// The body must have no atmosphere.
    #[serde(rename = "none")]
    Absent,
    /// One of the listed atmosphere type tags.
    OneOf(BTreeSet<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolcanismRule {
    Absent,
    Present,
    /// Volcanism description must contain one of these substrings.
    Families(Vec<String>),
}

/// Region-set reference, optionally negated with a leading `!`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RegionEntry {
    pub name: String,
    pub negated: bool,
}

impl RegionEntry {
    pub fn include(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            negated: false,
        }
    }

    pub fn exclude(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            negated: true,
        }
    }
}

impl TryFrom<String> for RegionEntry {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        let trimmed = value.trim();
        let (negated, name) = match trimmed.strip_prefix('!') {
            Some(rest) => (true, rest.trim()),
            None => (false, trimmed),
        };
        if name.is_empty() {
            return Err(format!("empty region entry {value:?}"));
        }
        Ok(Self {
            name: name.to_string(),
            negated,
        })
    }
}

impl From<RegionEntry> for String {
    fn from(entry: RegionEntry) -> Self {
        entry.to_string()
    }
}

impl fmt::Display for RegionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "!{}", self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}

/// Acceptable parent star: `"B"` or `["A", "V"]` (class with luminosity).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StarRequirement {
    Class(String),
    ClassWithLuminosity(String, String),
}

impl StarRequirement {
    pub fn class(&self) -> &str {
        match self {
            StarRequirement::Class(class) | StarRequirement::ClassWithLuminosity(class, _) => {
                class
            }
        }
    }

    pub fn luminosity(&self) -> Option<&str> {
        match self {
            StarRequirement::Class(_) => None,
            StarRequirement::ClassWithLuminosity(_, luminosity) => Some(luminosity),
        }
    }
}

/// Named special-case conditions. Each variant has its own predicate in
/// [`crate::special`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialCondition {
    #[serde(rename = "nebula")]
    Nebula,
    #[serde(rename = "guardian")]
    Guardian,
    #[serde(rename = "life")]
    Life,
    #[serde(rename = "guardian+life")]
    GuardianLife,
    /// Parent star is a class A main-sequence star.
    #[serde(rename = "AV")]
    StarAv,
    /// Parent star is one of the A, F, G, K, M, S or MS classes.
    #[serde(rename = "AFGKMSS")]
    StarAfgkmss,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Ruleset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atmosphere: Option<AtmosphereRule>,
    /// Minimum percentage per atmosphere component gas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atmosphere_components: Option<BTreeMap<String, f64>>,
    /// Surface gravity in gee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gravity: Option<Bounds>,
    /// Surface temperature in Kelvin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Bounds>,
    /// Surface pressure in atmospheres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<Bounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volcanism: Option<VolcanismRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_type: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regions: Option<Vec<RegionEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub star: Option<Vec<StarRequirement>>,
    /// Minimum arrival distance in light-seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub special: Vec<SpecialCondition>,
}

impl Ruleset {
    /// Reject rulesets that could never be evaluated meaningfully.
    pub(crate) fn validate(&self, species: &str) -> Result<()> {
        let context = |err: Error| match err {
            Error::CatalogValidation { message } => {
                Error::validation(format!("species {species}: {message}"))
            }
            other => other,
        };

        if let Some(AtmosphereRule::OneOf(tags)) = &self.atmosphere {
            if tags.is_empty() {
                return Err(context(Error::validation("atmosphere list is empty")));
            }
        }
        if let Some(components) = &self.atmosphere_components {
            if components.is_empty() {
                return Err(context(Error::validation("atmosphere_components is empty")));
            }
            for (gas, percent) in components {
                if !percent.is_finite() || !(0.0..=100.0).contains(percent) {
                    return Err(context(Error::validation(format!(
                        "atmosphere component {gas} must be a percentage"
                    ))));
                }
            }
        }
        for (bounds, field) in [
            (&self.gravity, "gravity"),
            (&self.temperature, "temperature"),
            (&self.pressure, "pressure"),
        ] {
            if let Some(bounds) = bounds {
                bounds.validate(field).map_err(context)?;
            }
        }
        if let Some(VolcanismRule::Families(families)) = &self.volcanism {
            if families.is_empty() || families.iter().any(|f| f.trim().is_empty()) {
                return Err(context(Error::validation(
                    "volcanism families must be non-empty",
                )));
            }
        }
        if let Some(body_types) = &self.body_type {
            if body_types.is_empty() {
                return Err(context(Error::validation("body_type list is empty")));
            }
        }
        if let Some(regions) = &self.regions {
            if regions.is_empty() {
                return Err(context(Error::validation("regions list is empty")));
            }
            for entry in regions {
                if region::region_set(&entry.name).is_none() {
                    return Err(Error::UnknownRegionSet {
                        species: species.to_string(),
                        region: entry.name.clone(),
                    });
                }
            }
        }
        if let Some(stars) = &self.star {
            if stars.is_empty() || stars.iter().any(|s| s.class().trim().is_empty()) {
                return Err(context(Error::validation("star list must name classes")));
            }
        }
        if let Some(distance) = self.min_distance {
            if !distance.is_finite() || distance < 0.0 {
                return Err(context(Error::validation(
                    "min_distance must be finite and non-negative",
                )));
            }
        }
        Ok(())
    }
}
