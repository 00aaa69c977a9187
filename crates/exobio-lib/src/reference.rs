//! Fixed reference points for the proximity-based special conditions.
//!
//! Nebulae and guardian sites are stored in small KD-trees (k=3, galactic
//! coordinates in light-years). A system counts as "near" a reference set
//! when it lies strictly within [`PROXIMITY_LY`] of any point, or when its
//! name starts with one of the set's sector prefixes.

use kiddo::float::kdtree::KdTree;
use kiddo::SquaredEuclidean;
use once_cell::sync::Lazy;
use tracing::debug;

/// Radius used by the `nebula` and `guardian` conditions.
pub const PROXIMITY_LY: f64 = 100.0;

/// KD-tree bucket size (kiddo default).
const BUCKET_SIZE: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferencePoint {
    pub name: &'static str,
    pub coords: [f64; 3],
}

const fn point(name: &'static str, x: f64, y: f64, z: f64) -> ReferencePoint {
    ReferencePoint {
        name,
        coords: [x, y, z],
    }
}

const NEBULAE: &[ReferencePoint] = &[
    point("Bubble Nebula", -6573.63, 24.69, -2682.66),
    point("California Nebula", -299.06, -229.25, -876.13),
    point("Carina Nebula", 8579.59, -140.53, 2719.88),
    point("Cone Nebula", 855.44, 84.45, -2025.11),
    point("Crab Nebula", 558.5, -707.38, -6941.73),
    point("Eagle Nebula", -2046.09, 104.84, 6699.66),
    point("Heart Nebula", -5321.13, 117.88, -5284.13),
    point("Lagoon Nebula", -469.19, -84.84, 4456.13),
    point("North America Nebula", -1893.84, -33.16, 149.03),
    point("Omega Nebula", -1432.63, -76.79, 2318.47),
    point("Orion Nebula", 582.03, -425.41, -1079.94),
    point("Pelican Nebula", -1891.56, 54.53, 174.5),
    point("Pleiades Nebula", -81.06, -149.0, -343.38),
    point("Rosette Nebula", 2346.97, -175.72, -4748.75),
    point("Soul Nebula", -5095.88, 117.13, -5502.28),
    point("Trifid Nebula", -633.91, -27.22, 5161.16),
    point("Witch Head Nebula", 355.75, -400.5, -707.22),
];

const NEBULA_SECTORS: &[&str] = &[
    "Bubble Sector",
    "California Sector",
    "Cone Sector",
    "Crab Sector",
    "Eagle Sector",
    "Heart Sector",
    "Lagoon Sector",
    "North America Sector",
    "Omega Sector",
    "Pelican Sector",
    "Pleiades Sector",
    "Rosette Sector",
    "Soul Sector",
    "Trifid Sector",
    "Witch Head Sector",
];

const GUARDIAN_SITES: &[ReferencePoint] = &[
    point("Synuefe XR-H d11-102", 357.34, -49.34, -74.75),
    point("Synuefe EU-Q c21-10", 758.66, -176.72, -134.25),
    point("Synuefe LY-I b42-2", 814.72, -222.78, -151.16),
    point("Col 173 Sector LY-Q d5-8", 1006.56, -143.5, -59.63),
    point("IC 2391 Sector ZE-A d101", 596.31, -103.5, -35.0),
    point("Vela Dark Region KR-W c1-24", 1000.94, -17.75, -99.59),
    point("NGC 3199 Sector", 14577.19, -261.78, 3526.59),
];

const GUARDIAN_SECTORS: &[&str] = &[
    "Col 173 Sector",
    "IC 2391 Sector",
    "Synuefe",
    "Vela Dark Region",
    "NGC 3199 Sector",
];

/// One family of reference points plus the sector prefixes that imply them.
pub struct ReferenceSet {
    tree: KdTree<f32, usize, 3, BUCKET_SIZE, u32>,
    points: Vec<ReferencePoint>,
    sector_prefixes: Vec<&'static str>,
}

impl ReferenceSet {
    pub fn new(points: &[ReferencePoint], sector_prefixes: &[&'static str]) -> Self {
        let mut tree: KdTree<f32, usize, 3, BUCKET_SIZE, u32> = KdTree::new();
        for (index, point) in points.iter().enumerate() {
            tree.add(&to_f32(point.coords), index);
        }
        Self {
            tree,
            points: points.to_vec(),
            sector_prefixes: sector_prefixes.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Closest reference point and its distance in light-years.
    pub fn nearest(&self, coords: [f64; 3]) -> Option<(&ReferencePoint, f64)> {
        if self.points.is_empty() {
            return None;
        }
        self.tree
            .nearest_n::<SquaredEuclidean>(&to_f32(coords), 1)
            .into_iter()
            .next()
            .map(|neighbor| {
                let point = &self.points[neighbor.item];
                (point, distance(point.coords, coords))
            })
    }

    /// Whether any reference point lies strictly within `radius` ly.
    pub fn is_within(&self, coords: [f64; 3], radius: f64) -> bool {
        match self.nearest(coords) {
            Some((point, distance)) => {
                debug!(reference = point.name, distance, "nearest reference point");
                distance < radius
            }
            None => false,
        }
    }

    /// Whether the system name lies in one of the set's sectors.
    pub fn in_sector(&self, system_name: &str) -> bool {
        self.sector_prefixes
            .iter()
            .any(|prefix| system_name.starts_with(prefix))
    }
}

/// Reference sets consulted by the special-condition predicates.
pub struct ReferenceIndex {
    pub nebulae: ReferenceSet,
    pub guardian: ReferenceSet,
}

static BUILTIN: Lazy<ReferenceIndex> = Lazy::new(|| ReferenceIndex {
    nebulae: ReferenceSet::new(NEBULAE, NEBULA_SECTORS),
    guardian: ReferenceSet::new(GUARDIAN_SITES, GUARDIAN_SECTORS),
});

impl ReferenceIndex {
    /// The embedded nebula and guardian reference data.
    pub fn builtin() -> &'static ReferenceIndex {
        &BUILTIN
    }
}

fn to_f32(coords: [f64; 3]) -> [f32; 3] {
    [coords[0] as f32, coords[1] as f32, coords[2] as f32]
}

fn distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}
