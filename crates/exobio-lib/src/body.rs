//! Body snapshots: everything observed so far about one planet or moon.
//!
//! Every telemetry field is optional. `None` means "not scanned yet" and is
//! never treated as a negative observation by the predicate evaluator.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Journal body identifier, unique within a system. Stars share this id space.
pub type BodyId = u32;

/// Standard gravity in m/s², used to convert surface gravity to gee.
pub const STANDARD_GRAVITY: f64 = 9.80665;

/// One entry of a body's orbital parent chain, nearest parent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentRef {
    Star(BodyId),
    Planet(BodyId),
    #[serde(alias = "null")]
    Barycenter(u32),
}

/// Progress of an on-foot scan of a species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanStage {
    Logged,
    Sampled,
    Analysed,
}

/// A species visually confirmed on the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmedScan {
    /// Catalog species identifier.
    pub species: String,
    pub stage: ScanStage,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub id: BodyId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Journal planet class, e.g. `Rocky body`, `High metal content body`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_type: Option<String>,
    /// Journal atmosphere type tag; `None` or empty means no atmosphere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atmosphere: Option<String>,
    /// Atmosphere gas percentages keyed by journal component name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atmosphere_composition: Option<BTreeMap<String, f64>>,
    /// Surface gravity in m/s².
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gravity: Option<f64>,
    /// Surface temperature in Kelvin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Surface pressure in atmospheres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    /// Free-text volcanism description; empty when there is none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volcanism: Option<String>,
    /// Distance from the arrival point in light-seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_from_arrival: Option<f64>,
    /// Detected surface materials. `Some(empty)` means scanned with none found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materials: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<ParentRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landable: Option<bool>,
    #[serde(default)]
    pub mapped: bool,
    /// Genus identifiers reported by a biological signal scan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genera: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio_signals: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub confirmed: Vec<ConfirmedScan>,
}

impl BodySnapshot {
    pub fn new(id: BodyId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Display name, falling back to the body id.
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("Body {}", self.id))
    }

    /// Surface gravity in gee.
    pub fn gravity_g(&self) -> Option<f64> {
        self.gravity.map(|g| g / STANDARD_GRAVITY)
    }

    /// Whether the body has an atmosphere, if known.
    pub fn has_atmosphere(&self) -> Option<bool> {
        self.atmosphere.as_deref().map(|atmosphere| {
            let atmosphere = atmosphere.trim();
            !(atmosphere.is_empty() || atmosphere.eq_ignore_ascii_case("none"))
        })
    }

    /// Whether the body shows any volcanism, if known.
    pub fn has_volcanism(&self) -> Option<bool> {
        self.volcanism
            .as_deref()
            .map(|volcanism| !volcanism.trim().is_empty())
    }

    /// Whether a detected material matches `name`, ignoring case.
    ///
    /// Returns `None` while materials are unscanned.
    pub fn has_material(&self, name: &str) -> Option<bool> {
        self.materials.as_ref().map(|materials| {
            materials
                .iter()
                .any(|material| material.eq_ignore_ascii_case(name))
        })
    }

    /// Confirmed scan of any species in `species_ids`, most advanced first.
    pub fn confirmed_among<'a>(&'a self, species_ids: &[&str]) -> Option<&'a ConfirmedScan> {
        self.confirmed
            .iter()
            .filter(|scan| species_ids.contains(&scan.species.as_str()))
            .max_by_key(|scan| scan.stage)
    }
}
