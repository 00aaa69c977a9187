//! Galactic region identifiers and the named region sets rulesets refer to.
//!
//! Point-in-region lookup is not performed here. Hosts supply it through the
//! [`RegionLookup`] trait; this module only owns the static tables that turn
//! a region id into membership of the named sets (`orion-cygnus`,
//! `exterior`, ...) used by region constraints.

use serde::{Deserialize, Serialize};

/// Numeric galactic region identifier (1-42).
pub type RegionId = u8;

/// Region returned by a [`RegionLookup`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    pub name: String,
}

impl Region {
    /// Build a region from a known id, resolving its display name.
    pub fn from_id(id: RegionId) -> Option<Self> {
        region_name(id).map(|name| Self {
            id,
            name: name.to_string(),
        })
    }
}

/// Spatial lookup collaborator: maps galactic coordinates (ly) to a region.
///
/// Returning `None` means the region is not resolvable yet; region
/// predicates then do not eliminate anything.
pub trait RegionLookup {
    fn region_of(&self, coords: [f64; 3]) -> Option<Region>;
}

impl<F> RegionLookup for F
where
    F: Fn([f64; 3]) -> Option<Region>,
{
    fn region_of(&self, coords: [f64; 3]) -> Option<Region> {
        self(coords)
    }
}

/// Lookup that never resolves a region.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRegionLookup;

impl RegionLookup for NoRegionLookup {
    fn region_of(&self, _coords: [f64; 3]) -> Option<Region> {
        None
    }
}

/// Lookup that reports the same region for every coordinate.
///
/// Useful when the host already knows the current region (for example from a
/// snapshot file) and in tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedRegion(pub Option<Region>);

impl FixedRegion {
    pub fn new(id: RegionId) -> Self {
        Self(Region::from_id(id))
    }
}

impl RegionLookup for FixedRegion {
    fn region_of(&self, _coords: [f64; 3]) -> Option<Region> {
        self.0.clone()
    }
}

const REGION_NAMES: [&str; 42] = [
    "Galactic Centre",
    "Empyrean Straits",
    "Ryker's Hope",
    "Odin's Hold",
    "Norma Arm",
    "Arcadian Stream",
    "Izanami",
    "Inner Orion-Perseus Conflux",
    "Inner Scutum-Centaurus Arm",
    "Norma Expanse",
    "Trojan Belt",
    "The Veils",
    "Newton's Vault",
    "The Conduit",
    "Outer Orion-Perseus Conflux",
    "Orion-Cygnus Arm",
    "Temple",
    "Inner Orion Spur",
    "Hawking's Gap",
    "Dryman's Point",
    "Sagittarius-Carina Arm",
    "Mare Somnia",
    "Acheron",
    "Formorian Frontier",
    "Hieronymus Delta",
    "Outer Scutum-Centaurus Arm",
    "Outer Arm",
    "Aquila's Halo",
    "Errant Marches",
    "Perseus Arm",
    "Formidine Rift",
    "Vulcan Gate",
    "Elysian Shore",
    "Sanguineous Rim",
    "Outer Orion Spur",
    "Achilles's Altar",
    "Xibalba",
    "Lyra's Song",
    "Tenebrae",
    "The Abyss",
    "Kepler's Crest",
    "The Void",
];

/// Display name for a region id.
pub fn region_name(id: RegionId) -> Option<&'static str> {
    let index = usize::from(id).checked_sub(1)?;
    REGION_NAMES.get(index).copied()
}

/// Named region sets referenced by ruleset region constraints.
const REGION_SETS: &[(&str, &[RegionId])] = &[
    ("center", &[1, 2, 3]),
    ("empyrean-straits", &[2]),
    ("orion-cygnus", &[1, 4, 7, 8, 16, 17, 18, 35]),
    ("orion-cygnus-1", &[4, 7, 8, 16, 17, 18, 35]),
    ("orion-cygnus-core", &[7, 8, 16, 17, 18, 35]),
    ("sagittarius-carina", &[1, 4, 9, 18, 19, 20, 21, 22, 23, 40]),
    ("sagittarius-carina-core", &[9, 18, 19, 20, 21, 22, 23, 40]),
    ("sagittarius-carina-core-9", &[18, 19, 20, 21, 22, 23, 40]),
    ("scutum-centaurus", &[1, 4, 9, 10, 11, 12, 24, 25, 26, 42, 28]),
    ("scutum-centaurus-core", &[9, 10, 11, 12, 24, 25, 26, 42, 28]),
    ("outer", &[1, 2, 5, 6, 13, 14, 27, 29, 31, 41, 37]),
    ("perseus", &[1, 3, 7, 15, 30, 32, 33, 34, 36, 38, 39]),
    ("perseus-core", &[3, 7, 15, 30, 32, 33, 34, 36, 38, 39]),
    (
        "exterior",
        &[
            14, 21, 22, 23, 24, 25, 26, 27, 28, 29, 31, 34, 36, 37, 38, 39, 40, 41, 42,
        ],
    ),
    ("anemone-a", &[7, 8, 13, 14, 15, 16, 17, 18, 27, 32]),
    ("amphora", &[10, 19, 20, 21, 22]),
    ("brain-tree", &[2, 9, 10, 17, 18, 35]),
    ("tuber-a", &[1, 2, 3, 4, 9, 10, 11, 12]),
    ("tuber-b", &[2, 15, 16, 17, 18, 20, 21]),
];

/// Member region ids of a named region set.
pub fn region_set(name: &str) -> Option<&'static [RegionId]> {
    REGION_SETS
        .iter()
        .find(|(set_name, _)| *set_name == name)
        .map(|(_, ids)| *ids)
}

/// Names of every known region set, in table order.
pub fn region_set_names() -> impl Iterator<Item = &'static str> {
    REGION_SETS.iter().map(|(name, _)| *name)
}
