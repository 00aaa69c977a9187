//! Host-facing facade tying the catalog, context and cache together.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::body::BodyId;
use crate::cache::{CacheStats, ResultCache};
use crate::catalog::{Catalog, Genus};
use crate::context::SystemContext;
use crate::engine::estimate_genus;
use crate::estimate::GenusEstimate;
use crate::predicate::EvalEnv;
use crate::reference::ReferenceIndex;
use crate::region::{NoRegionLookup, RegionLookup};

/// Incremental species estimator for one commander session.
///
/// The host feeds telemetry through [`BioScanner::context_mut`] and queries
/// estimates as needed. Queries take `&mut self` because they populate the
/// result cache.
///
/// # Example
///
/// ```
/// use exobio_lib::{BioScanner, BodySnapshot, Catalog};
///
/// let catalog = Catalog::builtin().expect("embedded catalog is valid");
/// let mut scanner = BioScanner::new(catalog);
///
/// let mut body = BodySnapshot::new(3);
/// body.gravity = Some(3.5 * 9.80665);
/// scanner.context_mut().upsert_body(body);
///
/// let estimate = scanner.value_estimate(3, "aleoida");
/// assert!(estimate.is_empty());
/// ```
pub struct BioScanner<'c, R = NoRegionLookup> {
    catalog: &'c Catalog,
    regions: R,
    references: &'static ReferenceIndex,
    context: SystemContext,
    cache: ResultCache,
}

impl<'c> BioScanner<'c, NoRegionLookup> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self::with_regions(catalog, NoRegionLookup)
    }
}

impl<'c, R: RegionLookup> BioScanner<'c, R> {
    pub fn with_regions(catalog: &'c Catalog, regions: R) -> Self {
        Self {
            catalog,
            regions,
            references: ReferenceIndex::builtin(),
            context: SystemContext::new(),
            cache: ResultCache::new(),
        }
    }

    /// Replace the context wholesale, e.g. after loading a snapshot.
    pub fn with_context(mut self, context: SystemContext) -> Self {
        self.context = context;
        self
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn context(&self) -> &SystemContext {
        &self.context
    }

    /// Mutable access for telemetry ingestion.
    ///
    /// Cache entries affected by a mutation become stale through revision
    /// tokens; no explicit invalidation call is needed.
    pub fn context_mut(&mut self) -> &mut SystemContext {
        &mut self.context
    }

    /// Estimate one genus on one body.
    ///
    /// An unknown genus or body yields a not-applicable estimate.
    pub fn value_estimate(&mut self, body: BodyId, genus: &str) -> GenusEstimate {
        let Some(genus) = self.catalog.genus(genus) else {
            debug!(genus, "genus not in catalog");
            return GenusEstimate::not_applicable(genus);
        };
        if self.context.body(body).is_none() {
            debug!(body, "body not observed");
            return GenusEstimate::not_applicable(&genus.name);
        }
        let env = EvalEnv::with_references(&self.context, &self.regions, self.references);
        estimate_cached(&mut self.cache, &env, body, genus).clone()
    }

    /// Estimates for every plausible genus on `body`, keyed by genus name.
    ///
    /// With detected genera known, every listed genus is reported, including
    /// empty ones. Otherwise every catalog genus is evaluated and only those
    /// with candidates are kept. A body reporting zero biological signals
    /// has no estimates.
    pub fn get_possible_values(&mut self, body: BodyId) -> BTreeMap<String, GenusEstimate> {
        let mut values = BTreeMap::new();
        let Some(snapshot) = self.context.body(body) else {
            return values;
        };
        if snapshot.bio_signals == Some(0) {
            return values;
        }

        let env = EvalEnv::with_references(&self.context, &self.regions, self.references);
        match &snapshot.genera {
            Some(detected) => {
                for key in detected {
                    let estimate = match self.catalog.genus(key) {
                        Some(genus) => estimate_cached(&mut self.cache, &env, body, genus).clone(),
                        None => {
                            warn!(genus = %key, body, "detected genus missing from catalog");
                            GenusEstimate::not_applicable(key)
                        }
                    };
                    values.insert(estimate.genus().to_string(), estimate);
                }
            }
            None => {
                for genus in self.catalog.genera() {
                    let estimate = estimate_cached(&mut self.cache, &env, body, genus);
                    if !estimate.is_empty() {
                        values.insert(genus.name.clone(), estimate.clone());
                    }
                }
            }
        }
        values
    }

    /// Sum of the per-genus ranges reported by [`Self::get_possible_values`].
    pub fn body_value_range(&mut self, body: BodyId) -> (u64, u64) {
        self.get_possible_values(body)
            .values()
            .fold((0, 0), |(min, max), estimate| {
                (min + estimate.min_value(), max + estimate.max_value())
            })
    }

    /// Reset the context for a newly entered system and drop every cached
    /// estimate; body ids are only unique within one system.
    pub fn enter_system(&mut self, name: Option<String>, coordinates: Option<[f64; 3]>) {
        self.context.enter_system(name, coordinates);
        self.cache.clear();
    }

    /// Mark cached estimates stale, for one body or all of them.
    pub fn reset_cache(&mut self, body: Option<BodyId>) {
        self.cache.reset(body);
    }

    /// The stored estimate for `(body, genus)`, fresh or not.
    pub fn last_known(&self, body: BodyId, genus: &str) -> Option<&GenusEstimate> {
        let genus = self.catalog.genus(genus)?;
        self.cache.last_known(&self.context, body, &genus.id)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

fn estimate_cached<'a>(
    cache: &'a mut ResultCache,
    env: &EvalEnv<'_>,
    body: BodyId,
    genus: &Genus,
) -> &'a GenusEstimate {
    let context = env.context();
    cache.get_or_compute(context, body, &genus.id, || match context.body(body) {
        Some(snapshot) => estimate_genus(genus, snapshot, env),
        None => GenusEstimate::not_applicable(&genus.name),
    })
}
