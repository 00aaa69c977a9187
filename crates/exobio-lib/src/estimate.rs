//! Typed results handed to the display layer.

use std::fmt;

use serde::Serialize;

use crate::body::ScanStage;
use crate::catalog::{Genus, Species};

/// One surviving species with its resolved color variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub species_id: String,
    pub name: String,
    pub value: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Candidate {
    pub fn new(species: &Species, color: Option<String>) -> Self {
        Self {
            species_id: species.id.clone(),
            name: species.name.clone(),
            value: species.value,
            color,
        }
    }

    /// Species name with its color variant, e.g. `Aleoida Arcus - Yellow`.
    pub fn label(&self) -> String {
        match &self.color {
            Some(color) => format!("{} - {}", self.name, color),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Identification {
    /// The genus is not in the catalog, or the body is unknown.
    NotApplicable,
    /// Every species was eliminated.
    Empty,
    /// Exactly one species survived.
    Unique { candidate: Candidate },
    /// Visually confirmed on the body; reported without evaluation.
    Confirmed {
        candidate: Candidate,
        stage: ScanStage,
    },
    /// Several species remain plausible, ascending by value.
    Range { candidates: Vec<Candidate> },
}

/// Estimate for one genus on one body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenusEstimate {
    genus_id: String,
    genus: String,
    colony_range: u32,
    min_value: u64,
    max_value: u64,
    identification: Identification,
}

impl GenusEstimate {
    /// Result for a genus or body the catalog cannot evaluate.
    pub fn not_applicable(key: &str) -> Self {
        Self {
            genus_id: key.to_string(),
            genus: key.to_string(),
            colony_range: 0,
            min_value: 0,
            max_value: 0,
            identification: Identification::NotApplicable,
        }
    }

    /// Collapse an ordered candidate list into an estimate.
    ///
    /// `candidates` must already be sorted ascending by value.
    pub fn from_candidates(genus: &Genus, mut candidates: Vec<Candidate>) -> Self {
        let min_value = candidates.first().map_or(0, |c| c.value);
        let max_value = candidates.last().map_or(0, |c| c.value);
        let identification = if candidates.len() > 1 {
            Identification::Range { candidates }
        } else {
            match candidates.pop() {
                Some(candidate) => Identification::Unique { candidate },
                None => Identification::Empty,
            }
        };
        Self::new(genus, min_value, max_value, identification)
    }

    pub fn confirmed(genus: &Genus, candidate: Candidate, stage: ScanStage) -> Self {
        let value = candidate.value;
        Self::new(
            genus,
            value,
            value,
            Identification::Confirmed { candidate, stage },
        )
    }

    fn new(genus: &Genus, min_value: u64, max_value: u64, identification: Identification) -> Self {
        debug_assert!(min_value <= max_value);
        Self {
            genus_id: genus.id.clone(),
            genus: genus.name.clone(),
            colony_range: genus.colony_range,
            min_value,
            max_value,
            identification,
        }
    }

    pub fn genus_id(&self) -> &str {
        &self.genus_id
    }

    /// Genus display name.
    pub fn genus(&self) -> &str {
        &self.genus
    }

    /// Minimum distance between distinct samples, in meters.
    pub fn colony_range(&self) -> u32 {
        self.colony_range
    }

    pub fn min_value(&self) -> u64 {
        self.min_value
    }

    pub fn max_value(&self) -> u64 {
        self.max_value
    }

    pub fn identification(&self) -> &Identification {
        &self.identification
    }

    /// Surviving species, ascending by value.
    pub fn breakdown(&self) -> &[Candidate] {
        match &self.identification {
            Identification::NotApplicable | Identification::Empty => &[],
            Identification::Unique { candidate } | Identification::Confirmed { candidate, .. } => {
                std::slice::from_ref(candidate)
            }
            Identification::Range { candidates } => candidates,
        }
    }

    /// Species label when identified, genus name otherwise.
    pub fn display_name(&self) -> String {
        match &self.identification {
            Identification::Unique { candidate } | Identification::Confirmed { candidate, .. } => {
                candidate.label()
            }
            _ => self.genus.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.breakdown().is_empty()
    }

    pub fn is_applicable(&self) -> bool {
        self.identification != Identification::NotApplicable
    }
}

impl fmt::Display for GenusEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.identification {
            Identification::NotApplicable => write!(f, "{}: not applicable", self.genus),
            Identification::Empty => write!(f, "{}: no match", self.genus),
            Identification::Unique { .. } | Identification::Confirmed { .. } => {
                write!(f, "{}: {} Cr", self.display_name(), self.min_value)
            }
            Identification::Range { candidates } => write!(
                f,
                "{}: {} - {} Cr ({} species)",
                self.genus,
                self.min_value,
                self.max_value,
                candidates.len()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Ruleset, SpeciesColors};

    fn genus() -> Genus {
        Genus {
            id: "stratum".to_string(),
            name: "Stratum".to_string(),
            colony_range: 500,
            star_colors: None,
            species: vec![],
        }
    }

    fn candidate(name: &str, value: u64) -> Candidate {
        Candidate::new(
            &Species {
                id: name.to_lowercase(),
                name: name.to_string(),
                value,
                rulesets: vec![Ruleset::default()],
                colors: SpeciesColors::default(),
            },
            None,
        )
    }

    #[test]
    fn empty_estimate_has_zero_range() {
        let estimate = GenusEstimate::from_candidates(&genus(), vec![]);
        assert_eq!((estimate.min_value(), estimate.max_value()), (0, 0));
        assert!(estimate.is_empty());
        assert_eq!(estimate.to_string(), "Stratum: no match");
    }

    #[test]
    fn single_candidate_is_unique() {
        let mut only = candidate("Stratum Tectonicas", 19_010_800);
        only.color = Some("Lime".to_string());
        let estimate = GenusEstimate::from_candidates(&genus(), vec![only]);
        assert_eq!(estimate.display_name(), "Stratum Tectonicas - Lime");
        assert_eq!(estimate.min_value(), estimate.max_value());
        assert_eq!(estimate.breakdown().len(), 1);
    }

    #[test]
    fn several_candidates_form_a_range() {
        let estimate = GenusEstimate::from_candidates(
            &genus(),
            vec![
                candidate("Stratum Paleas", 1_362_000),
                candidate("Stratum Excutitus", 2_448_900),
                candidate("Stratum Tectonicas", 19_010_800),
            ],
        );
        assert_eq!(estimate.min_value(), 1_362_000);
        assert_eq!(estimate.max_value(), 19_010_800);
        assert_eq!(estimate.display_name(), "Stratum");
        assert_eq!(
            estimate.to_string(),
            "Stratum: 1362000 - 19010800 Cr (3 species)"
        );
    }

    #[test]
    fn serializes_with_kind_tag() {
        let estimate =
            GenusEstimate::from_candidates(&genus(), vec![candidate("Stratum Paleas", 1)]);
        let json = serde_json::to_value(&estimate).expect("serializes");
        assert_eq!(json["identification"]["kind"], "unique");
        assert_eq!(json["identification"]["candidate"]["name"], "Stratum Paleas");
        assert_eq!(json["min_value"], 1);
    }
}
