// Test utilities used across `exobio-cli` tests.
// Kept under `#[cfg(test)]` so it is not part of the public crate API.
use exobio_lib::{Candidate, GenusEstimate, Genus, ScanStage};

/// Builder for tests that constructs `GenusEstimate` values without running
/// the elimination engine.
pub struct EstimateBuilder {
    genus: Genus,
    candidates: Vec<Candidate>,
}

impl EstimateBuilder {
    /// Start an estimate for a genus with the given display name.
    pub fn new(genus: &str) -> Self {
        Self {
            genus: Genus {
                id: genus.to_lowercase(),
                name: genus.to_string(),
                colony_range: 100,
                star_colors: None,
                species: Vec::new(),
            },
            candidates: Vec::new(),
        }
    }

    /// Add a surviving species. Call in ascending value order.
    pub fn candidate(mut self, species: &str, value: u64) -> Self {
        self.candidates.push(Candidate {
            species_id: species.to_lowercase().replace(' ', "_"),
            name: species.to_string(),
            value,
            color: None,
        });
        self
    }

    /// Set the color of the most recently added candidate.
    pub fn color(mut self, color: &str) -> Self {
        if let Some(last) = self.candidates.last_mut() {
            last.color = Some(color.to_string());
        }
        self
    }

    pub fn build(self) -> GenusEstimate {
        GenusEstimate::from_candidates(&self.genus, self.candidates)
    }

    /// Build a confirmed estimate from the first candidate.
    pub fn confirmed(mut self, stage: ScanStage) -> GenusEstimate {
        let candidate = self.candidates.remove(0);
        GenusEstimate::confirmed(&self.genus, candidate, stage)
    }
}
