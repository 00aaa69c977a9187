//! Explicit per-system telemetry context.
//!
//! The host owns one [`SystemContext`], feeds it body and star telemetry as
//! it arrives, and passes it into every evaluation. Mutators bump revision
//! tokens that the result cache compares against, so stale entries are
//! detected without flags inside cached values:
//!
//! - the *system revision* changes on anything that can affect every body
//!   (star scans, coordinates, system name, a body's classification)
//! - a *body revision* changes whenever that body's snapshot changes

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::body::{BodyId, BodySnapshot, ParentRef};
use crate::error::{Error, Result};
use crate::region::RegionId;
use crate::star::StarSnapshot;

/// Serializable picture of a system, as read from snapshot files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_name: Option<String>,
    /// Galactic coordinates in light-years.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<[f64; 3]>,
    /// Region id reported by an external lookup, if the host has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<RegionId>,
    /// Total number of bodies (stars included) reported by a discovery scan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_count: Option<u32>,
    #[serde(default)]
    pub stars: Vec<StarSnapshot>,
    #[serde(default)]
    pub bodies: Vec<BodySnapshot>,
}

impl SystemSnapshot {
    /// Read a snapshot from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|err| Error::SnapshotParse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct SystemContext {
    system_name: Option<String>,
    coordinates: Option<[f64; 3]>,
    body_count: Option<u32>,
    stars: BTreeMap<BodyId, StarSnapshot>,
    bodies: BTreeMap<BodyId, BodySnapshot>,
    counter: u64,
    /// Bumped by [`SystemContext::enter_system`]; body ids restart per system.
    generation: u64,
    system_revision: u64,
    body_revisions: HashMap<BodyId, u64>,
}

impl SystemContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context from a snapshot, as if every entry arrived in order.
    pub fn from_snapshot(snapshot: SystemSnapshot) -> Self {
        let mut context = Self::new();
        context.enter_system(snapshot.system_name, snapshot.coordinates);
        if let Some(count) = snapshot.body_count {
            context.set_body_count(count);
        }
        for star in snapshot.stars {
            context.upsert_star(star);
        }
        for body in snapshot.bodies {
            context.upsert_body(body);
        }
        context
    }

    /// Reset all tables for a newly entered system.
    pub fn enter_system(&mut self, name: Option<String>, coordinates: Option<[f64; 3]>) {
        debug!(system = ?name, "entering system; clearing body and star tables");
        self.system_name = name;
        self.coordinates = coordinates;
        self.body_count = None;
        self.stars.clear();
        self.bodies.clear();
        self.body_revisions.clear();
        self.generation += 1;
        self.bump_system();
    }

    /// Number of systems entered so far.
    pub fn system_generation(&self) -> u64 {
        self.generation
    }

    pub fn system_name(&self) -> Option<&str> {
        self.system_name.as_deref()
    }

    pub fn coordinates(&self) -> Option<[f64; 3]> {
        self.coordinates
    }

    pub fn set_system_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.system_name.as_deref() != Some(name.as_str()) {
            self.system_name = Some(name);
            self.bump_system();
        }
    }

    pub fn set_coordinates(&mut self, coordinates: [f64; 3]) {
        if self.coordinates != Some(coordinates) {
            self.coordinates = Some(coordinates);
            self.bump_system();
        }
    }

    /// Record the system's total body count from a discovery scan.
    pub fn set_body_count(&mut self, count: u32) {
        if self.body_count != Some(count) {
            self.body_count = Some(count);
            self.bump_system();
        }
    }

    pub fn body_count(&self) -> Option<u32> {
        self.body_count
    }

    /// Whether every body in the system has been observed.
    pub fn is_fully_scanned(&self) -> bool {
        self.body_count
            .is_some_and(|count| self.stars.len() + self.bodies.len() >= count as usize)
    }

    /// Insert or replace a star. Star scans can change any body's result.
    pub fn upsert_star(&mut self, star: StarSnapshot) {
        if self.stars.get(&star.id) != Some(&star) {
            self.stars.insert(star.id, star);
            self.bump_system();
        }
    }

    pub fn star(&self, id: BodyId) -> Option<&StarSnapshot> {
        self.stars.get(&id)
    }

    pub fn stars(&self) -> impl Iterator<Item = &StarSnapshot> {
        self.stars.values()
    }

    /// Insert or replace a body snapshot.
    pub fn upsert_body(&mut self, body: BodySnapshot) {
        let id = body.id;
        self.update_body(id, move |existing| *existing = body);
    }

    /// Mutate a body in place, creating it on first observation.
    ///
    /// Bumps the body revision when the snapshot changed, and the system
    /// revision when its classification changed (other bodies' `life`
    /// conditions depend on it).
    pub fn update_body<F>(&mut self, id: BodyId, update: F)
    where
        F: FnOnce(&mut BodySnapshot),
    {
        let before = self.bodies.get(&id).cloned();
        let mut body = before.clone().unwrap_or_else(|| BodySnapshot::new(id));
        update(&mut body);
        body.id = id;

        if before.as_ref() == Some(&body) {
            return;
        }

        let reclassified = before.as_ref().map(|b| b.body_type.as_deref())
            != Some(body.body_type.as_deref());
        self.bodies.insert(id, body);
        let revision = self.next_revision();
        self.body_revisions.insert(id, revision);
        if reclassified {
            self.bump_system();
        }
    }

    pub fn body(&self, id: BodyId) -> Option<&BodySnapshot> {
        self.bodies.get(&id)
    }

    pub fn bodies(&self) -> impl Iterator<Item = &BodySnapshot> {
        self.bodies.values()
    }

    /// Lookup a body by case-insensitive name.
    pub fn body_by_name(&self, name: &str) -> Option<&BodySnapshot> {
        self.bodies.values().find(|body| {
            body.name
                .as_deref()
                .is_some_and(|n| n.eq_ignore_ascii_case(name.trim()))
        })
    }

    /// Like [`Self::body_by_name`], failing with [`Error::UnknownBody`].
    pub fn require_body(&self, name: &str) -> Result<&BodySnapshot> {
        self.body_by_name(name).ok_or_else(|| Error::UnknownBody {
            name: name.trim().to_string(),
        })
    }

    pub fn system_revision(&self) -> u64 {
        self.system_revision
    }

    pub fn body_revision(&self, id: BodyId) -> Option<u64> {
        self.body_revisions.get(&id).copied()
    }

    /// Resolve the star a body orbits.
    ///
    /// Walks the parent chain nearest-first: a direct star parent wins, a
    /// barycenter resolves to its lowest-id member star. Returns `None` while
    /// the relevant star has not been scanned.
    pub fn parent_star(&self, body: &BodySnapshot) -> Option<&StarSnapshot> {
        for parent in &body.parents {
            match *parent {
                ParentRef::Star(id) => {
                    let star = self.stars.get(&id);
                    if star.is_none() {
                        debug!(body = body.id, star = id, "parent star not scanned yet");
                    }
                    return star;
                }
                ParentRef::Barycenter(group) => {
                    if let Some(star) = self.barycenter_primary(group) {
                        return Some(star);
                    }
                }
                ParentRef::Planet(_) => {}
            }
        }
        if body.parents.is_empty() {
            return self.primary_star();
        }
        debug!(body = body.id, "unable to resolve parent star");
        None
    }

    /// Lowest-id star of a barycenter group.
    pub fn barycenter_primary(&self, group: u32) -> Option<&StarSnapshot> {
        self.stars
            .values()
            .filter(|star| star.barycenter == Some(group))
            .min_by_key(|star| star.id)
    }

    /// The arrival star, falling back to the lowest-id star.
    pub fn primary_star(&self) -> Option<&StarSnapshot> {
        self.stars
            .values()
            .find(|star| star.is_primary())
            .or_else(|| self.stars.values().next())
    }

    /// Whether any body other than `exclude` has one of `body_types`.
    pub fn has_other_body_of_type(&self, exclude: BodyId, body_types: &[&str]) -> bool {
        self.bodies.values().any(|body| {
            body.id != exclude
                && body
                    .body_type
                    .as_deref()
                    .is_some_and(|kind| body_types.contains(&kind))
        })
    }

    fn next_revision(&mut self) -> u64 {
        self.counter += 1;
        self.counter
    }

    fn bump_system(&mut self) {
        self.system_revision = self.next_revision();
    }
}
