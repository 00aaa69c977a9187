//! Common test utilities and fixture helpers.

use std::path::PathBuf;

use exobio_lib::{BodyId, BodySnapshot, ParentRef, STANDARD_GRAVITY};

/// Path to fixtures directory used by tests (snapshots, override catalogs).
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Builder to create `BodySnapshot` instances in tests.
///
/// Every field starts unknown; setters take the units used in catalogs where
/// that is friendlier (gravity in gee).
#[allow(dead_code)]
pub struct BodyBuilder {
    body: BodySnapshot,
}

#[allow(dead_code)]
impl BodyBuilder {
    #[must_use]
    pub fn new(id: BodyId) -> Self {
        Self {
            body: BodySnapshot::new(id),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.body.name = Some(name.to_string());
        self
    }

    pub fn body_type(mut self, body_type: &str) -> Self {
        self.body.body_type = Some(body_type.to_string());
        self
    }

    pub fn atmosphere(mut self, atmosphere: &str) -> Self {
        self.body.atmosphere = Some(atmosphere.to_string());
        self
    }

    pub fn gravity_ms2(mut self, gravity: f64) -> Self {
        self.body.gravity = Some(gravity);
        self
    }

    pub fn gravity_g(mut self, gravity: f64) -> Self {
        self.body.gravity = Some(gravity * STANDARD_GRAVITY);
        self
    }

    pub fn temperature(mut self, kelvin: f64) -> Self {
        self.body.temperature = Some(kelvin);
        self
    }

    pub fn volcanism(mut self, description: &str) -> Self {
        self.body.volcanism = Some(description.to_string());
        self
    }

    pub fn materials(mut self, materials: &[&str]) -> Self {
        self.body.materials = Some(materials.iter().map(|m| m.to_string()).collect());
        self
    }

    pub fn orbits_star(mut self, star: BodyId) -> Self {
        self.body.parents.push(ParentRef::Star(star));
        self
    }

    pub fn genera(mut self, genera: &[&str]) -> Self {
        self.body.genera = Some(genera.iter().map(|g| g.to_string()).collect());
        self
    }

    pub fn build(self) -> BodySnapshot {
        self.body
    }
}

/// Rocky carbon-dioxide world matching exactly one Aleoida species.
#[allow(dead_code)]
pub fn arcus_body(id: BodyId) -> BodySnapshot {
    BodyBuilder::new(id)
        .body_type("Rocky body")
        .atmosphere("CarbonDioxide")
        .gravity_ms2(2.0)
        .temperature(182.0)
        .volcanism("")
        .build()
}
