//! Output formatting for command reports.
//!
//! Text renderers build a `String` so they can be unit tested; `main.rs`
//! writes the result to stdout. JSON output serializes the report types
//! directly.

use std::fmt::Write as _;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use exobio_lib::{GenusEstimate, Identification};

use crate::commands::estimate::{BodyReport, SystemReport};
use crate::commands::genera::{GeneraReport, GenusDetail, GenusSummary};
use crate::commands::validate::ValidationReport;
use crate::terminal::{branch, format_with_separators, ColorPalette};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Pretty-printed JSON for any report.
pub fn to_json<T: Serialize>(report: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Credits with thousand separators, e.g. `7,252,500 Cr`.
fn credits(value: u64) -> String {
    format!("{} Cr", format_with_separators(value))
}

fn credit_range(min: u64, max: u64) -> String {
    if min == max {
        credits(min)
    } else {
        format!("{} - {}", format_with_separators(min), credits(max))
    }
}

/// Text renderer honoring color and unicode capabilities.
#[derive(Debug, Clone, Copy)]
pub struct TextRenderer {
    palette: ColorPalette,
    unicode: bool,
}

impl TextRenderer {
    pub fn new(palette: ColorPalette, unicode: bool) -> Self {
        Self { palette, unicode }
    }

    /// Uncolored ASCII output.
    pub fn plain() -> Self {
        Self::new(ColorPalette::plain(), false)
    }

    pub fn render_estimate(&self, report: &SystemReport) -> String {
        let p = &self.palette;
        let mut out = String::new();

        let system = report.system.as_deref().unwrap_or("<unknown system>");
        let _ = write!(out, "{}{}{}", p.heading, system, p.reset);
        if let Some(region) = &report.region {
            let _ = write!(out, " ({region})");
        }
        out.push('\n');
        if !report.fully_scanned {
            let _ = writeln!(out, "{}system not fully scanned{}", p.muted, p.reset);
        }

        for body in &report.bodies {
            self.render_body(&mut out, body);
        }

        if report.bodies.len() > 1 {
            let (min, max) = report.total_range();
            let _ = writeln!(
                out,
                "\nTotal: {}{}{}",
                p.range,
                credit_range(min, max),
                p.reset
            );
        }
        out
    }

    fn render_body(&self, out: &mut String, body: &BodyReport) {
        let p = &self.palette;
        if body.genera.is_empty() {
            let _ = writeln!(
                out,
                "{}{}{}: {}no biological signals{}",
                p.heading, body.name, p.reset, p.muted, p.reset
            );
            return;
        }

        let _ = writeln!(
            out,
            "{}{}{}: {}{}{}",
            p.heading,
            body.name,
            p.reset,
            p.range,
            credit_range(body.min_value, body.max_value),
            p.reset
        );
        let count = body.genera.len();
        for (index, estimate) in body.genera.iter().enumerate() {
            let last = index + 1 == count;
            self.render_genus(out, estimate, last);
        }
    }

    fn render_genus(&self, out: &mut String, estimate: &GenusEstimate, last: bool) {
        let p = &self.palette;
        let connector = branch(last, self.unicode);
        let _ = write!(out, " {}{}{} ", p.muted, connector, p.reset);

        match estimate.identification() {
            Identification::NotApplicable => {
                let _ = writeln!(
                    out,
                    "{}: {}not applicable{}",
                    estimate.genus(),
                    p.warning,
                    p.reset
                );
            }
            Identification::Empty => {
                let _ = writeln!(
                    out,
                    "{}: {}no match{}",
                    estimate.genus(),
                    p.muted,
                    p.reset
                );
            }
            Identification::Unique { candidate } => {
                let _ = writeln!(
                    out,
                    "{}: {}{}{}{}",
                    self.label(&candidate.name, candidate.color.as_deref()),
                    p.value,
                    credits(candidate.value),
                    p.reset,
                    self.colony(estimate)
                );
            }
            Identification::Confirmed { candidate, stage } => {
                let _ = writeln!(
                    out,
                    "{}: {}{}{} {}({:?}){}{}",
                    self.label(&candidate.name, candidate.color.as_deref()),
                    p.value,
                    credits(candidate.value),
                    p.reset,
                    p.muted,
                    stage,
                    p.reset,
                    self.colony(estimate)
                );
            }
            Identification::Range { candidates } => {
                let _ = writeln!(
                    out,
                    "{}: {}{}{} ({} species){}",
                    estimate.genus(),
                    p.range,
                    credit_range(estimate.min_value(), estimate.max_value()),
                    p.reset,
                    candidates.len(),
                    self.colony(estimate)
                );
                let rail = match (last, self.unicode) {
                    (true, _) => " ",
                    (false, true) => "│",
                    (false, false) => "|",
                };
                for candidate in candidates {
                    let _ = writeln!(
                        out,
                        " {}{}{}    {}: {}",
                        p.muted,
                        rail,
                        p.reset,
                        self.label(&candidate.name, candidate.color.as_deref()),
                        credits(candidate.value)
                    );
                }
            }
        }
    }

    /// Sampling distance suffix, e.g. ` [colony 150m]`.
    fn colony(&self, estimate: &GenusEstimate) -> String {
        let p = &self.palette;
        format!(" {}[colony {}m]{}", p.muted, estimate.colony_range(), p.reset)
    }

    fn label(&self, name: &str, color: Option<&str>) -> String {
        let p = &self.palette;
        match color {
            Some(color) => format!("{name} - {}{color}{}", p.variant, p.reset),
            None => name.to_string(),
        }
    }

    pub fn render_genera(&self, report: &GeneraReport) -> String {
        match report {
            GeneraReport::List(rows) => self.render_genus_list(rows),
            GeneraReport::Detail(detail) => self.render_genus_detail(detail),
        }
    }

    fn render_genus_list(&self, rows: &[GenusSummary]) -> String {
        let p = &self.palette;
        let mut out = String::new();
        let _ = writeln!(out, "Genera ({}):", rows.len());
        let _ = writeln!(
            out,
            "{:<20} {:>8} {:>8} {:>26}",
            "Name", "Range", "Species", "Value"
        );
        for row in rows {
            let _ = writeln!(
                out,
                "{}{:<20}{} {:>7}m {:>8} {:>26}",
                p.heading,
                row.name,
                p.reset,
                row.colony_range,
                row.species_count,
                credit_range(row.min_value, row.max_value)
            );
        }
        out
    }

    fn render_genus_detail(&self, detail: &GenusDetail) -> String {
        let p = &self.palette;
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{}{}{} (colony range {}m, {} species)",
            p.heading,
            detail.summary.name,
            p.reset,
            detail.summary.colony_range,
            detail.summary.species_count
        );
        let count = detail.species.len();
        for (index, species) in detail.species.iter().enumerate() {
            let connector = branch(index + 1 == count, self.unicode);
            let _ = writeln!(
                out,
                " {}{}{} {:<28} {}{:>14}{}",
                p.muted,
                connector,
                p.reset,
                species.name,
                p.value,
                credits(species.value),
                p.reset
            );
        }
        out
    }

    pub fn render_validation(&self, report: &ValidationReport) -> String {
        let source = report
            .source
            .as_ref()
            .map_or_else(|| "builtin".to_string(), |path| path.display().to_string());
        format!(
            "Catalog {} is valid: {} genera, {} species, {} rulesets\n",
            source, report.genera, report.species, report.rulesets
        )
    }
}
