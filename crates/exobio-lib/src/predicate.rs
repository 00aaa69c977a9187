//! Ruleset evaluation against one body snapshot.
//!
//! Every present predicate must pass (AND). A predicate whose input has not
//! been observed yet is skipped: scans arrive incrementally and partial
//! information must never eliminate a species.

use std::cell::OnceCell;

use tracing::trace;

use crate::body::BodySnapshot;
use crate::catalog::{AtmosphereRule, Bounds, RegionEntry, Ruleset, VolcanismRule};
use crate::context::SystemContext;
use crate::reference::ReferenceIndex;
use crate::region::{self, Region, RegionId, RegionLookup};
use crate::special;

/// Everything besides the body itself that predicates may consult.
pub struct EvalEnv<'a> {
    context: &'a SystemContext,
    regions: &'a dyn RegionLookup,
    references: &'a ReferenceIndex,
    region: OnceCell<Option<Region>>,
}

impl<'a> EvalEnv<'a> {
    pub fn new(context: &'a SystemContext, regions: &'a dyn RegionLookup) -> Self {
        Self::with_references(context, regions, ReferenceIndex::builtin())
    }

    pub fn with_references(
        context: &'a SystemContext,
        regions: &'a dyn RegionLookup,
        references: &'a ReferenceIndex,
    ) -> Self {
        Self {
            context,
            regions,
            references,
            region: OnceCell::new(),
        }
    }

    pub fn context(&self) -> &'a SystemContext {
        self.context
    }

    pub fn references(&self) -> &'a ReferenceIndex {
        self.references
    }

    /// Region of the current system, looked up once per environment.
    pub fn region(&self) -> Option<&Region> {
        self.region
            .get_or_init(|| {
                self.context
                    .coordinates()
                    .and_then(|coords| self.regions.region_of(coords))
            })
            .as_ref()
    }
}

type Check = fn(&Ruleset, &BodySnapshot, &EvalEnv<'_>) -> bool;

const CHECKS: &[(&str, Check)] = &[
    ("atmosphere", atmosphere),
    ("atmosphere_components", atmosphere_components),
    ("gravity", gravity),
    ("temperature", temperature),
    ("pressure", pressure),
    ("volcanism", volcanism),
    ("body_type", body_type),
    ("min_distance", min_distance),
    ("star", star),
    ("regions", regions),
    ("special", special_conditions),
];

/// Whether `body` satisfies every present predicate of `ruleset`.
pub fn matches(ruleset: &Ruleset, body: &BodySnapshot, env: &EvalEnv<'_>) -> bool {
    for (name, check) in CHECKS {
        if !check(ruleset, body, env) {
            trace!(body = body.id, predicate = *name, "ruleset rejected");
            return false;
        }
    }
    true
}

fn atmosphere(ruleset: &Ruleset, body: &BodySnapshot, _env: &EvalEnv<'_>) -> bool {
    let (Some(rule), Some(present)) = (&ruleset.atmosphere, body.has_atmosphere()) else {
        return true;
    };
    match rule {
        AtmosphereRule::Any => present,
        AtmosphereRule::Absent => !present,
        AtmosphereRule::OneOf(tags) => {
            present
                && body
                    .atmosphere
                    .as_deref()
                    .is_some_and(|atmosphere| tags.contains(atmosphere.trim()))
        }
    }
}

fn atmosphere_components(ruleset: &Ruleset, body: &BodySnapshot, _env: &EvalEnv<'_>) -> bool {
    let (Some(required), Some(actual)) =
        (&ruleset.atmosphere_components, &body.atmosphere_composition)
    else {
        return true;
    };
    required
        .iter()
        .all(|(gas, minimum)| actual.get(gas).is_some_and(|percent| percent >= minimum))
}

fn within(bounds: Option<&Bounds>, value: Option<f64>) -> bool {
    match (bounds, value) {
        (Some(bounds), Some(value)) => bounds.contains(value),
        _ => true,
    }
}

fn gravity(ruleset: &Ruleset, body: &BodySnapshot, _env: &EvalEnv<'_>) -> bool {
    within(ruleset.gravity.as_ref(), body.gravity_g())
}

fn temperature(ruleset: &Ruleset, body: &BodySnapshot, _env: &EvalEnv<'_>) -> bool {
    within(ruleset.temperature.as_ref(), body.temperature)
}

fn pressure(ruleset: &Ruleset, body: &BodySnapshot, _env: &EvalEnv<'_>) -> bool {
    within(ruleset.pressure.as_ref(), body.pressure)
}

fn volcanism(ruleset: &Ruleset, body: &BodySnapshot, _env: &EvalEnv<'_>) -> bool {
    let (Some(rule), Some(active)) = (&ruleset.volcanism, body.has_volcanism()) else {
        return true;
    };
    match rule {
        VolcanismRule::Absent => !active,
        VolcanismRule::Present => active,
        VolcanismRule::Families(families) => body.volcanism.as_deref().is_some_and(|description| {
            families
                .iter()
                .any(|family| description.contains(family.as_str()))
        }),
    }
}

fn body_type(ruleset: &Ruleset, body: &BodySnapshot, _env: &EvalEnv<'_>) -> bool {
    match (&ruleset.body_type, body.body_type.as_deref()) {
        (Some(accepted), Some(kind)) => accepted.contains(kind),
        _ => true,
    }
}

fn min_distance(ruleset: &Ruleset, body: &BodySnapshot, _env: &EvalEnv<'_>) -> bool {
    match (ruleset.min_distance, body.distance_from_arrival) {
        (Some(minimum), Some(distance)) => distance >= minimum,
        _ => true,
    }
}

fn star(ruleset: &Ruleset, body: &BodySnapshot, env: &EvalEnv<'_>) -> bool {
    let Some(requirements) = &ruleset.star else {
        return true;
    };
    let Some(star) = env.context().parent_star(body) else {
        return true;
    };
    requirements
        .iter()
        .any(|requirement| star.satisfies(requirement.class(), requirement.luminosity()))
}

fn regions(ruleset: &Ruleset, _body: &BodySnapshot, env: &EvalEnv<'_>) -> bool {
    match (&ruleset.regions, env.region()) {
        (Some(entries), Some(region)) => region_constraint_matches(entries, region.id),
        _ => true,
    }
}

fn special_conditions(ruleset: &Ruleset, body: &BodySnapshot, env: &EvalEnv<'_>) -> bool {
    ruleset
        .special
        .iter()
        .all(|condition| special::holds(*condition, body, env))
}

/// Apply a region constraint to a resolved region id.
///
/// A negated entry covering the region eliminates regardless of the other
/// entries. Otherwise at least one positive entry must cover the region, if
/// any positive entries exist.
pub fn region_constraint_matches(entries: &[RegionEntry], region: RegionId) -> bool {
    let covers = |entry: &RegionEntry| {
        region::region_set(&entry.name).is_some_and(|members| members.contains(&region))
    };

    if entries.iter().any(|entry| entry.negated && covers(entry)) {
        return false;
    }

    let mut positives = entries.iter().filter(|entry| !entry.negated).peekable();
    if positives.peek().is_none() {
        return true;
    }
    positives.any(covers)
}
