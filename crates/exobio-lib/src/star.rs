//! Star snapshots and spectral class helpers.

use serde::{Deserialize, Serialize};

use crate::body::BodyId;

/// Everything observed so far about one star.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarSnapshot {
    pub id: BodyId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Journal star type tag, e.g. `K`, `DA`, `B_BlueWhiteSuperGiant`.
    pub star_type: String,
    /// Luminosity class, e.g. `V`, `Vab`, `III`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub luminosity: Option<String>,
    /// Distance from the arrival point in light-seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_from_arrival: Option<f64>,
    /// Barycenter group this star orbits, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barycenter: Option<u32>,
}

impl StarSnapshot {
    pub fn new(id: BodyId, star_type: impl Into<String>) -> Self {
        Self {
            id,
            name: None,
            star_type: star_type.into(),
            luminosity: None,
            distance_from_arrival: None,
            barycenter: None,
        }
    }

    #[must_use]
    pub fn with_luminosity(mut self, luminosity: impl Into<String>) -> Self {
        self.luminosity = Some(luminosity.into());
        self
    }

    #[must_use]
    pub fn with_distance(mut self, distance_ls: f64) -> Self {
        self.distance_from_arrival = Some(distance_ls);
        self
    }

    #[must_use]
    pub fn in_barycenter(mut self, barycenter: u32) -> Self {
        self.barycenter = Some(barycenter);
        self
    }

    /// Base spectral class with giant/supergiant suffixes removed.
    pub fn base_class(&self) -> &str {
        base_star_class(&self.star_type)
    }

    /// The arrival star sits at distance zero.
    pub fn is_primary(&self) -> bool {
        self.distance_from_arrival == Some(0.0)
    }

    /// Check this star against a class and optional luminosity requirement.
    ///
    /// A star with unknown luminosity does not fail a luminosity requirement.
    pub fn satisfies(&self, class: &str, luminosity: Option<&str>) -> bool {
        if self.base_class() != base_star_class(class) {
            return false;
        }
        match (luminosity, self.luminosity.as_deref()) {
            (Some(required), Some(actual)) => {
                normalize_luminosity(required) == normalize_luminosity(actual)
            }
            _ => true,
        }
    }
}

/// Strip giant and supergiant suffixes from a journal star type.
///
/// `B_BlueWhiteSuperGiant` is treated as `B`, `M_RedGiant` as `M`. Other
/// tags are returned unchanged.
pub fn base_star_class(star_type: &str) -> &str {
    match star_type.split_once('_') {
        Some((base, suffix)) if suffix.ends_with("Giant") && !base.is_empty() => base,
        _ => star_type,
    }
}

/// Collapse luminosity sub-classes (`Va`, `Vab`, `Vz`) onto their numeral.
pub fn normalize_luminosity(luminosity: &str) -> &str {
    luminosity.trim_end_matches(['a', 'b', 'z'])
}
