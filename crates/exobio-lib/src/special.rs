//! Predicates for the named special conditions.
//!
//! Each [`SpecialCondition`] maps to one independent function. None of them
//! eliminate on missing information: unknown coordinates, an unscanned
//! parent star or an incompletely scanned system all count as a pass.

use crate::body::BodySnapshot;
use crate::catalog::SpecialCondition;
use crate::predicate::EvalEnv;
use crate::reference::{ReferenceSet, PROXIMITY_LY};
use crate::star::normalize_luminosity;

/// Body classes whose presence elsewhere in the system satisfies `life`.
pub const LIFE_BODY_TYPES: [&str; 3] = ["Earthlike body", "Water world", "Ammonia world"];

/// Star classes accepted by the `AFGKMSS` shortcut.
const AFGKMSS_CLASSES: [&str; 7] = ["A", "F", "G", "K", "M", "S", "MS"];

pub fn holds(condition: SpecialCondition, body: &BodySnapshot, env: &EvalEnv<'_>) -> bool {
    match condition {
        SpecialCondition::Nebula => near_nebula(env),
        SpecialCondition::Guardian => near_guardian_site(env),
        SpecialCondition::Life => life_in_system(body, env),
        SpecialCondition::GuardianLife => near_guardian_site(env) && life_in_system(body, env),
        SpecialCondition::StarAv => main_sequence_a_star(body, env),
        SpecialCondition::StarAfgkmss => afgkmss_star(body, env),
    }
}

pub fn near_nebula(env: &EvalEnv<'_>) -> bool {
    near_reference(&env.references().nebulae, env)
}

pub fn near_guardian_site(env: &EvalEnv<'_>) -> bool {
    near_reference(&env.references().guardian, env)
}

fn near_reference(set: &ReferenceSet, env: &EvalEnv<'_>) -> bool {
    let Some(coords) = env.context().coordinates() else {
        return true;
    };
    let in_sector = env
        .context()
        .system_name()
        .is_some_and(|name| set.in_sector(name));
    in_sector || set.is_within(coords, PROXIMITY_LY)
}

/// Another body in the system is Earthlike, a Water world or an Ammonia world.
///
/// Only eliminates once every body in the system has been observed.
pub fn life_in_system(body: &BodySnapshot, env: &EvalEnv<'_>) -> bool {
    let context = env.context();
    context.has_other_body_of_type(body.id, &LIFE_BODY_TYPES) || !context.is_fully_scanned()
}

pub fn main_sequence_a_star(body: &BodySnapshot, env: &EvalEnv<'_>) -> bool {
    let Some(star) = env.context().parent_star(body) else {
        return true;
    };
    star.base_class() == "A"
        && star
            .luminosity
            .as_deref()
            .map_or(true, |luminosity| normalize_luminosity(luminosity) == "V")
}

pub fn afgkmss_star(body: &BodySnapshot, env: &EvalEnv<'_>) -> bool {
    env.context()
        .parent_star(body)
        .map_or(true, |star| AFGKMSS_CLASSES.contains(&star.base_class()))
}
