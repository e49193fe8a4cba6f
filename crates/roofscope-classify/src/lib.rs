#![warn(missing_docs)]

//! Heuristic classification of roof edges into construction-relevant
//! component categories.
//!
//! Every boundary edge of a section is assigned linear footage across
//! seven categories (eave, rake, ridge, hip, valley, step, wall) from
//! its direction-agnostic bearing alone. This is a documented
//! best-effort heuristic, not a structural roof model: a true
//! classification would need roof-plane adjacency (which plane is
//! uphill of which edge), which the engine does not attempt. The band
//! weights are empirically chosen multipliers on raw edge length, and
//! totals should be presented as estimates.

use serde::{Deserialize, Serialize};

use roofscope_measure::EdgeMetric;

/// The seven roof component categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentCategory {
    /// Lower horizontal roof boundary.
    Eave,
    /// Sloped gable-end edge.
    Rake,
    /// Upper horizontal intersection of planes.
    Ridge,
    /// Convex diagonal intersection of planes.
    Hip,
    /// Concave diagonal intersection of planes.
    Valley,
    /// Step flashing along staggered wall joints. Never derived from
    /// geometry; stays zero unless externally annotated.
    Step,
    /// Wall/flashing detail trim, accrued by every edge.
    Wall,
}

impl ComponentCategory {
    /// All categories in display order.
    pub const ALL: [ComponentCategory; 7] = [
        ComponentCategory::Eave,
        ComponentCategory::Rake,
        ComponentCategory::Ridge,
        ComponentCategory::Hip,
        ComponentCategory::Valley,
        ComponentCategory::Step,
        ComponentCategory::Wall,
    ];

    /// Lowercase label as used in results and documents.
    pub fn label(self) -> &'static str {
        match self {
            ComponentCategory::Eave => "eave",
            ComponentCategory::Rake => "rake",
            ComponentCategory::Ridge => "ridge",
            ComponentCategory::Hip => "hip",
            ComponentCategory::Valley => "valley",
            ComponentCategory::Step => "step",
            ComponentCategory::Wall => "wall",
        }
    }
}

/// Accumulated linear feet per component category.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ComponentTotals {
    /// Eave footage.
    pub eave: f64,
    /// Rake footage.
    pub rake: f64,
    /// Ridge footage.
    pub ridge: f64,
    /// Hip footage.
    pub hip: f64,
    /// Valley footage.
    pub valley: f64,
    /// Step flashing footage (annotation-only, see [`ComponentCategory::Step`]).
    pub step: f64,
    /// Wall/flashing footage.
    pub wall: f64,
}

impl ComponentTotals {
    /// All-zero totals.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Footage for one category.
    pub fn get(&self, category: ComponentCategory) -> f64 {
        match category {
            ComponentCategory::Eave => self.eave,
            ComponentCategory::Rake => self.rake,
            ComponentCategory::Ridge => self.ridge,
            ComponentCategory::Hip => self.hip,
            ComponentCategory::Valley => self.valley,
            ComponentCategory::Step => self.step,
            ComponentCategory::Wall => self.wall,
        }
    }

    /// Element-wise accumulate another section's totals.
    pub fn merge(&mut self, other: &ComponentTotals) {
        self.eave += other.eave;
        self.rake += other.rake;
        self.ridge += other.ridge;
        self.hip += other.hip;
        self.valley += other.valley;
        self.step += other.step;
        self.wall += other.wall;
    }

    /// Sum across all categories, for sanity checks and display.
    pub fn total(&self) -> f64 {
        ComponentCategory::ALL.iter().map(|&c| self.get(c)).sum()
    }
}

/// Eave share of a near-horizontal edge.
pub const EAVE_WEIGHT: f64 = 0.3;
/// Ridge share of a near-horizontal edge.
pub const RIDGE_WEIGHT: f64 = 0.2;
/// Rake share of a near-vertical edge.
pub const RAKE_WEIGHT: f64 = 0.5;
/// Hip share of a 30°–60° diagonal edge.
pub const HIP_WEIGHT: f64 = 0.4;
/// Valley share of a 120°–150° diagonal edge.
pub const VALLEY_WEIGHT: f64 = 0.3;
/// Flat wall/flashing share accrued by every edge.
pub const WALL_WEIGHT: f64 = 0.1;

/// The mutually exclusive bearing bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Band {
    Horizontal,
    Vertical,
    HipDiagonal,
    ValleyDiagonal,
}

/// Band membership for a bearing in `[0, 180)`. Edges in the gap
/// ranges (e.g. 15°–30°, 60°–75°) belong to no band and accrue only
/// the wall weight.
fn band(bearing_deg: f64) -> Option<Band> {
    if bearing_deg < 15.0 || bearing_deg > 165.0 {
        Some(Band::Horizontal)
    } else if (75.0..=105.0).contains(&bearing_deg) {
        Some(Band::Vertical)
    } else if (30.0..=60.0).contains(&bearing_deg) {
        Some(Band::HipDiagonal)
    } else if (120.0..=150.0).contains(&bearing_deg) {
        Some(Band::ValleyDiagonal)
    } else {
        None
    }
}

/// Classify a section's boundary edges into component footage.
///
/// Each edge falls in at most one bearing band; the horizontal band
/// splits its contribution between eave and ridge since bearing alone
/// cannot tell the lower boundary from the upper one. Every edge also
/// accrues the flat wall weight.
pub fn classify_edges(edges: &[EdgeMetric]) -> ComponentTotals {
    let mut totals = ComponentTotals::zero();
    for edge in edges {
        let len = edge.length_ft;
        totals.wall += len * WALL_WEIGHT;
        match band(edge.bearing_deg) {
            Some(Band::Horizontal) => {
                totals.eave += len * EAVE_WEIGHT;
                totals.ridge += len * RIDGE_WEIGHT;
            }
            Some(Band::Vertical) => totals.rake += len * RAKE_WEIGHT,
            Some(Band::HipDiagonal) => totals.hip += len * HIP_WEIGHT,
            Some(Band::ValleyDiagonal) => totals.valley += len * VALLEY_WEIGHT,
            None => {}
        }
    }
    totals
}
