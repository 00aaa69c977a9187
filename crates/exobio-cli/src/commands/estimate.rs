//! `estimate` subcommand: value estimates for a system snapshot.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use exobio_lib::region::region_name;
use exobio_lib::{
    BioScanner, BodyId, Catalog, FixedRegion, GenusEstimate, RegionId, SystemContext,
    SystemSnapshot,
};

/// Arguments for one `estimate` run.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimateRequest<'a> {
    pub body: Option<&'a str>,
    pub genus: Option<&'a str>,
    /// Overrides the region recorded in the snapshot.
    pub region: Option<RegionId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BodyReport {
    pub id: BodyId,
    pub name: String,
    pub min_value: u64,
    pub max_value: u64,
    pub genera: Vec<GenusEstimate>,
}

impl BodyReport {
    fn new(id: BodyId, name: String, genera: Vec<GenusEstimate>) -> Self {
        let (min_value, max_value) = genera.iter().fold((0, 0), |(min, max), estimate| {
            (min + estimate.min_value(), max + estimate.max_value())
        });
        Self {
            id,
            name,
            min_value,
            max_value,
            genera,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub fully_scanned: bool,
    pub bodies: Vec<BodyReport>,
}

impl SystemReport {
    pub fn total_range(&self) -> (u64, u64) {
        self.bodies.iter().fold((0, 0), |(min, max), body| {
            (min + body.min_value, max + body.max_value)
        })
    }
}

/// Handle the `estimate` subcommand for the snapshot at `path`.
pub fn handle_estimate(
    catalog: &Catalog,
    path: &Path,
    request: EstimateRequest<'_>,
) -> Result<SystemReport> {
    let snapshot = SystemSnapshot::from_path(path)
        .with_context(|| format!("failed to read system snapshot {}", path.display()))?;
    estimate_snapshot(catalog, snapshot, request)
}

/// Evaluate an already-parsed snapshot.
pub fn estimate_snapshot(
    catalog: &Catalog,
    snapshot: SystemSnapshot,
    request: EstimateRequest<'_>,
) -> Result<SystemReport> {
    let region = request.region.or(snapshot.region);
    let regions = region.map(FixedRegion::new).unwrap_or_default();
    let context = SystemContext::from_snapshot(snapshot);

    let targets: Vec<(BodyId, String)> = match request.body {
        Some(name) => {
            let body = context.require_body(name)?;
            vec![(body.id, body.display_name())]
        }
        None => context
            .bodies()
            .map(|body| (body.id, body.display_name()))
            .collect(),
    };
    let genus = request
        .genus
        .map(|key| catalog.require_genus(key))
        .transpose()?;

    let mut scanner = BioScanner::with_regions(catalog, regions).with_context(context);
    let mut bodies = Vec::with_capacity(targets.len());
    for (id, name) in targets {
        let genera = match genus {
            Some(genus) => vec![scanner.value_estimate(id, &genus.id)],
            None => scanner.get_possible_values(id).into_values().collect(),
        };
        debug!(body = id, genera = genera.len(), "estimated body");
        bodies.push(BodyReport::new(id, name, genera));
    }

    let report = SystemReport {
        system: scanner.context().system_name().map(str::to_string),
        region: region.and_then(region_name).map(str::to_string),
        fully_scanned: scanner.context().is_fully_scanned(),
        bodies,
    };
    let (min, max) = report.total_range();
    info!(
        bodies = report.bodies.len(),
        min_value = min,
        max_value = max,
        "estimate complete"
    );
    Ok(report)
}
