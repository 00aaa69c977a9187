//! Exobiology species-elimination library.
//!
//! Narrows a catalog of biological species down to the ones consistent with
//! what is known about a planet or moon, then reports a credit value range
//! and, where only one species remains, an identification with its color
//! variant. Telemetry arrives incrementally through [`SystemContext`];
//! [`BioScanner`] caches estimates per body and genus until the telemetry they
//! depend on changes.
//!
//! Higher-level consumers (the CLI) should only depend on the items exported
//! here instead of reimplementing evaluation.

pub mod body;
pub mod cache;
pub mod catalog;
pub mod color;
pub mod context;
pub mod engine;
pub mod error;
pub mod estimate;
pub mod predicate;
pub mod reference;
pub mod region;
pub mod scanner;
pub mod special;
pub mod star;

pub use body::{BodyId, BodySnapshot, ConfirmedScan, ParentRef, ScanStage, STANDARD_GRAVITY};
pub use cache::{CacheStats, EntryState, ResultCache};
pub use catalog::{
    AtmosphereRule, Bounds, Catalog, Genus, RegionEntry, Ruleset, Species, SpeciesColors,
    SpecialCondition, StarRequirement, VolcanismRule,
};
pub use color::{resolve_colors, ColorResolution};
pub use context::{SystemContext, SystemSnapshot};
pub use engine::{estimate_genus, evaluate_genus};
pub use error::{Error, Result};
pub use estimate::{Candidate, GenusEstimate, Identification};
pub use predicate::EvalEnv;
pub use reference::{ReferenceIndex, ReferenceSet};
pub use region::{FixedRegion, NoRegionLookup, Region, RegionId, RegionLookup};
pub use scanner::BioScanner;
pub use star::StarSnapshot;
