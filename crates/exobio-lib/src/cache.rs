//! Memoized (body, genus) estimates.
//!
//! Entries carry a [`Stamp`] of the revision tokens they were computed
//! against. An entry is fresh while the stamp still matches the context and
//! the cache's own reset epochs; stale entries keep their value so the last
//! known estimate remains readable until it is recomputed.

use std::collections::hash_map::Entry as MapEntry;
use std::collections::HashMap;

use tracing::{debug, trace};

use crate::body::BodyId;
use crate::context::SystemContext;
use crate::estimate::GenusEstimate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Stamp {
    system: u64,
    body: Option<u64>,
    epoch: u64,
    body_epoch: u64,
}

#[derive(Debug, Clone)]
struct Entry {
    stamp: Stamp,
    value: GenusEstimate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    /// Never computed.
    Missing,
    /// Computed against older telemetry or reset since.
    Stale,
    Fresh,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

#[derive(Debug, Default)]
pub struct ResultCache {
    entries: HashMap<(BodyId, String), Entry>,
    /// System generation the stored entries belong to.
    generation: u64,
    epoch: u64,
    body_epochs: HashMap<BodyId, u64>,
    hits: u64,
    misses: u64,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn stamp(&self, context: &SystemContext, body: BodyId) -> Stamp {
        Stamp {
            system: context.system_revision(),
            body: context.body_revision(body),
            epoch: self.epoch,
            body_epoch: self.body_epochs.get(&body).copied().unwrap_or(0),
        }
    }

    fn same_system(&self, context: &SystemContext) -> bool {
        self.generation == context.system_generation()
    }

    /// Drop entries left over from a previously entered system.
    fn follow_system(&mut self, context: &SystemContext) {
        if !self.same_system(context) {
            if !self.entries.is_empty() {
                debug!(
                    dropped = self.entries.len(),
                    "system changed; discarding cached estimates"
                );
            }
            self.clear();
            self.generation = context.system_generation();
        }
    }

    pub fn state(&self, context: &SystemContext, body: BodyId, genus: &str) -> EntryState {
        if !self.same_system(context) {
            return EntryState::Missing;
        }
        match self.entries.get(&(body, genus.to_string())) {
            None => EntryState::Missing,
            Some(entry) if entry.stamp == self.stamp(context, body) => EntryState::Fresh,
            Some(_) => EntryState::Stale,
        }
    }

    /// Return the fresh entry for `(body, genus)`, recomputing it otherwise.
    pub fn get_or_compute<F>(
        &mut self,
        context: &SystemContext,
        body: BodyId,
        genus: &str,
        compute: F,
    ) -> &GenusEstimate
    where
        F: FnOnce() -> GenusEstimate,
    {
        self.follow_system(context);
        let stamp = self.stamp(context, body);
        let entry = match self.entries.entry((body, genus.to_string())) {
            MapEntry::Occupied(occupied) if occupied.get().stamp == stamp => {
                self.hits += 1;
                occupied.into_mut()
            }
            MapEntry::Occupied(mut occupied) => {
                self.misses += 1;
                trace!(body, genus, "recomputing stale estimate");
                occupied.insert(Entry {
                    stamp,
                    value: compute(),
                });
                occupied.into_mut()
            }
            MapEntry::Vacant(vacant) => {
                self.misses += 1;
                trace!(body, genus, "computing estimate");
                vacant.insert(Entry {
                    stamp,
                    value: compute(),
                })
            }
        };
        &entry.value
    }

    /// Stored estimate regardless of freshness, as long as it was computed
    /// for the system `context` currently describes.
    pub fn last_known(
        &self,
        context: &SystemContext,
        body: BodyId,
        genus: &str,
    ) -> Option<&GenusEstimate> {
        if !self.same_system(context) {
            return None;
        }
        self.entries
            .get(&(body, genus.to_string()))
            .map(|entry| &entry.value)
    }

    /// Mark every entry (or every entry of one body) stale, keeping values.
    pub fn reset(&mut self, body: Option<BodyId>) {
        match body {
            Some(id) => *self.body_epochs.entry(id).or_insert(0) += 1,
            None => self.epoch += 1,
        }
    }

    /// Drop all stored values.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.body_epochs.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::star::StarSnapshot;

    fn estimate(key: &str) -> GenusEstimate {
        GenusEstimate::not_applicable(key)
    }

    #[test]
    fn fresh_entries_are_reused() {
        let mut context = SystemContext::new();
        context.update_body(1, |b| b.temperature = Some(180.0));
        let mut cache = ResultCache::new();

        cache.get_or_compute(&context, 1, "aleoida", || estimate("first"));
        let second = cache
            .get_or_compute(&context, 1, "aleoida", || estimate("second"))
            .clone();
        assert_eq!(second.genus(), "first");
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn telemetry_changes_mark_entries_stale() {
        let mut context = SystemContext::new();
        context.update_body(1, |b| b.temperature = Some(180.0));
        context.update_body(2, |b| b.temperature = Some(90.0));
        let mut cache = ResultCache::new();
        cache.get_or_compute(&context, 1, "aleoida", || estimate("a"));
        cache.get_or_compute(&context, 2, "aleoida", || estimate("b"));

        context.update_body(1, |b| b.gravity = Some(1.0));
        assert_eq!(cache.state(&context, 1, "aleoida"), EntryState::Stale);
        assert_eq!(cache.state(&context, 2, "aleoida"), EntryState::Fresh);

        context.upsert_star(StarSnapshot::new(0, "G"));
        assert_eq!(cache.state(&context, 2, "aleoida"), EntryState::Stale);
        assert_eq!(cache.state(&context, 3, "aleoida"), EntryState::Missing);
    }

    #[test]
    fn reset_keeps_last_known_value() {
        let mut context = SystemContext::new();
        context.update_body(1, |b| b.temperature = Some(180.0));
        let mut cache = ResultCache::new();
        cache.get_or_compute(&context, 1, "aleoida", || estimate("kept"));
        cache.get_or_compute(&context, 2, "aleoida", || estimate("other"));

        cache.reset(Some(1));
        assert_eq!(cache.state(&context, 1, "aleoida"), EntryState::Stale);
        assert_eq!(cache.state(&context, 2, "aleoida"), EntryState::Fresh);
        assert_eq!(
            cache.last_known(&context, 1, "aleoida").map(GenusEstimate::genus),
            Some("kept")
        );

        cache.reset(None);
        assert_eq!(cache.state(&context, 2, "aleoida"), EntryState::Stale);
        assert!(cache.last_known(&context, 2, "aleoida").is_some());

        cache.clear();
        assert!(cache.last_known(&context, 1, "aleoida").is_none());
    }

    #[test]
    fn entering_a_system_discards_previous_entries() {
        let mut context = SystemContext::new();
        context.enter_system(Some("Alpha".to_string()), None);
        context.update_body(3, |b| b.temperature = Some(180.0));
        let mut cache = ResultCache::new();
        cache.get_or_compute(&context, 3, "aleoida", || estimate("alpha"));
        assert!(cache.last_known(&context, 3, "aleoida").is_some());

        context.enter_system(Some("Beta".to_string()), None);
        context.update_body(3, |b| b.temperature = Some(90.0));
        assert_eq!(cache.state(&context, 3, "aleoida"), EntryState::Missing);
        assert!(cache.last_known(&context, 3, "aleoida").is_none());

        let recomputed = cache
            .get_or_compute(&context, 3, "aleoida", || estimate("beta"))
            .clone();
        assert_eq!(recomputed.genus(), "beta");
        assert_eq!(cache.stats().entries, 1);
    }
}
