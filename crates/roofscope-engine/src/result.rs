//! The immutable measurement result snapshot.

use serde::{Deserialize, Serialize};

use roofscope_classify::ComponentTotals;
use roofscope_measure::{Pitch, SectionId};

/// Per-section line item in a result. Areas are rounded to 2 decimal
/// places for display stability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSummary {
    /// Section id.
    pub id: SectionId,
    /// Section name.
    pub name: String,
    /// Flat area in square feet, rounded.
    pub flat_sqft: f64,
    /// Pitch selection.
    pub pitch: Pitch,
    /// Pitch-adjusted area in square feet, rounded.
    pub adjusted_sqft: f64,
}

/// A section excluded from the totals, with the reason surfaced to the
/// caller rather than swallowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedSection {
    /// Section id.
    pub id: SectionId,
    /// Section name.
    pub name: String,
    /// Human-readable reason the section could not be measured.
    pub reason: String,
}

/// The engine's output: one coherent measurement across all sections.
///
/// An immutable snapshot — every aggregation produces a fresh value and
/// never mutates a prior one, so callers can hold a previous result
/// while a new measurement is in flight. Totals are summed from
/// unrounded per-section areas and rounded once at this boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementResult {
    /// Total flat area in square feet.
    pub total_flat_sqft: f64,
    /// Total pitch-adjusted area in square feet.
    pub total_adjusted_sqft: f64,
    /// Per-section breakdown, ordered by section id.
    pub sections: Vec<SectionSummary>,
    /// Linear footage per roof component category. Heuristic estimates.
    pub component_totals: ComponentTotals,
    /// Sections excluded from the totals (e.g. missing image scale).
    pub skipped: Vec<SkippedSection>,
}

impl MeasurementResult {
    /// Number of sections included in the totals.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Roofing squares: adjusted area divided by 100.
    pub fn squares(&self) -> f64 {
        roofscope_math::round2(self.total_adjusted_sqft / 100.0)
    }
}
