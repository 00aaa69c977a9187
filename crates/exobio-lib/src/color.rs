//! Second elimination pass: map survivors to color variants.

use std::collections::BTreeMap;

use tracing::debug;

use crate::body::BodySnapshot;
use crate::catalog::{Genus, Species};
use crate::estimate::Candidate;
use crate::predicate::EvalEnv;
use crate::star::StarSnapshot;

/// Survivors of color resolution, plus the ids of species it removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorResolution {
    pub candidates: Vec<Candidate>,
    pub eliminated: Vec<String>,
}

enum Outcome {
    Uncolored,
    Colored(String),
    /// The deciding telemetry has not arrived; keep the species without a color.
    Deferred,
    Missing,
}

/// Resolve colors for `survivors`, preserving their order.
///
/// A genus-wide star table decides for the whole genus: once the parent star
/// is known and not listed, every candidate is removed. Otherwise each species
/// consults its own star table, then its element table.
pub fn resolve_colors(
    genus: &Genus,
    survivors: Vec<&Species>,
    body: &BodySnapshot,
    env: &EvalEnv<'_>,
) -> ColorResolution {
    let star = env.context().parent_star(body);

    if let Some(table) = &genus.star_colors {
        // Unresolved star: defer, keeping every survivor uncolored.
        let Some(star) = star else {
            return ColorResolution {
                candidates: survivors
                    .into_iter()
                    .map(|species| Candidate::new(species, None))
                    .collect(),
                eliminated: Vec::new(),
            };
        };
        return match star_color(table, star) {
            Some(color) => ColorResolution {
                candidates: survivors
                    .into_iter()
                    .map(|species| Candidate::new(species, Some(color.clone())))
                    .collect(),
                eliminated: Vec::new(),
            },
            None => {
                debug!(
                    body = body.id,
                    genus = %genus.id,
                    star = %star.star_type,
                    "star class has no color for genus"
                );
                ColorResolution {
                    candidates: Vec::new(),
                    eliminated: survivors.iter().map(|s| s.id.clone()).collect(),
                }
            }
        };
    }

    let mut resolution = ColorResolution::default();
    for species in survivors {
        match species_color(species, star, body) {
            Outcome::Colored(color) => resolution
                .candidates
                .push(Candidate::new(species, Some(color))),
            Outcome::Uncolored | Outcome::Deferred => {
                resolution.candidates.push(Candidate::new(species, None))
            }
            Outcome::Missing => {
                debug!(
                    body = body.id,
                    species = %species.id,
                    "no color variant matches; species eliminated"
                );
                resolution.eliminated.push(species.id.clone());
            }
        }
    }
    resolution
}

fn species_color(species: &Species, star: Option<&StarSnapshot>, body: &BodySnapshot) -> Outcome {
    if let Some(table) = &species.colors.star {
        return match star {
            Some(star) => star_color(table, star).map_or(Outcome::Missing, Outcome::Colored),
            None => Outcome::Deferred,
        };
    }
    if let Some(table) = &species.colors.element {
        if body.materials.is_none() {
            return Outcome::Deferred;
        }
        return element_color(table, body).map_or(Outcome::Missing, Outcome::Colored);
    }
    Outcome::Uncolored
}

/// Color for a star: exact journal type first, then its base class.
pub fn star_color(table: &BTreeMap<String, String>, star: &StarSnapshot) -> Option<String> {
    table
        .get(&star.star_type)
        .or_else(|| table.get(star.base_class()))
        .cloned()
}

/// First table entry, in key order, whose material was detected on `body`.
pub fn element_color(table: &BTreeMap<String, String>, body: &BodySnapshot) -> Option<String> {
    table
        .iter()
        .find(|(element, _)| body.has_material(element) == Some(true))
        .map(|(_, color)| color.clone())
}
