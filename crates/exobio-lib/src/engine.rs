//! Elimination engine: narrows a genus to the species a body can host.

use tracing::debug;

use crate::body::BodySnapshot;
use crate::catalog::{Genus, Species};
use crate::color::resolve_colors;
use crate::estimate::{Candidate, GenusEstimate};
use crate::predicate::{self, EvalEnv};

/// Full pipeline for one genus on one body.
///
/// A visually confirmed species short-circuits evaluation. Otherwise the
/// rulesets eliminate, color resolution eliminates again, and the survivors
/// collapse into an empty, unique or ranged estimate.
pub fn estimate_genus(genus: &Genus, body: &BodySnapshot, env: &EvalEnv<'_>) -> GenusEstimate {
    let ids: Vec<&str> = genus.species.iter().map(|s| s.id.as_str()).collect();
    if let Some(scan) = body.confirmed_among(&ids) {
        if let Some(species) = genus.species_by_id(&scan.species) {
            let color = resolve_colors(genus, vec![species], body, env)
                .candidates
                .into_iter()
                .next()
                .and_then(|candidate| candidate.color);
            debug!(body = body.id, species = %species.id, stage = ?scan.stage, "confirmed scan");
            return GenusEstimate::confirmed(genus, Candidate::new(species, color), scan.stage);
        }
    }

    let survivors = evaluate_genus(genus, body, env);
    let resolution = resolve_colors(genus, survivors, body, env);
    GenusEstimate::from_candidates(genus, resolution.candidates)
}

/// Evaluate every species of `genus` against `body`.
///
/// A species survives when at least one of its rulesets matches; evaluation
/// stops at the first matching ruleset. Eliminated species are never added
/// back. Survivors are sorted by ascending base value, ties keeping catalog
/// order.
pub fn evaluate_genus<'g>(
    genus: &'g Genus,
    body: &BodySnapshot,
    env: &EvalEnv<'_>,
) -> Vec<&'g Species> {
    let mut survivors: Vec<&Species> = genus
        .species
        .iter()
        .filter(|species| {
            let matched = species_matches(species, body, env);
            if !matched {
                debug!(
                    body = body.id,
                    genus = %genus.id,
                    species = %species.id,
                    "species eliminated"
                );
            }
            matched
        })
        .collect();

    survivors.sort_by_key(|species| species.value);

    debug!(
        body = body.id,
        genus = %genus.id,
        survivors = survivors.len(),
        total = genus.species.len(),
        "evaluated genus"
    );
    survivors
}

/// OR across the species' rulesets.
pub fn species_matches(species: &Species, body: &BodySnapshot, env: &EvalEnv<'_>) -> bool {
    species
        .rulesets
        .iter()
        .any(|ruleset| predicate::matches(ruleset, body, env))
}
