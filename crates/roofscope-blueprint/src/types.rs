//! Drawing-instruction types for the exported blueprint.

use serde::{Deserialize, Serialize};

use roofscope_measure::SectionId;

/// A point in blueprint canvas space (pixels, top-left origin).
///
/// A custom serializable type so the payload round-trips without
/// enabling nalgebra's serde feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasPoint {
    /// X coordinate in canvas pixels.
    pub x: f64,
    /// Y coordinate in canvas pixels.
    pub y: f64,
}

impl CanvasPoint {
    /// Create a new canvas point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Fixed fill palette, assigned to sections round-robin. Colors carry
/// no semantic meaning.
pub const PALETTE: [&str; 8] = [
    "#e74c3c", "#3498db", "#2ecc71", "#f39c12", "#9b59b6", "#1abc9c", "#e67e22", "#34495e",
];

/// Text block anchored inside a drawn section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeLabel {
    /// Label lines: name, adjusted area, pitch.
    pub lines: Vec<String>,
    /// Anchor point (polygon centroid) for the first line.
    pub anchor: CanvasPoint,
}

/// One section's polygon in canvas space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlueprintShape {
    /// The section this shape renders.
    pub section: SectionId,
    /// Polygon vertices in canvas space, draw order preserved.
    pub points: Vec<CanvasPoint>,
    /// Fill/stroke color from [`PALETTE`].
    pub color: String,
    /// The section's label.
    pub label: ShapeLabel,
}

/// The always-drawn summary block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    /// Number of sections drawn.
    pub section_count: usize,
    /// Total pitch-adjusted area in square feet.
    pub total_adjusted_sqft: f64,
    /// Roofing squares (area ÷ 100).
    pub squares: f64,
    /// Sections drawn on the live map.
    pub live_sections: usize,
    /// Sections traced over captured images.
    pub captured_sections: usize,
}

/// A composed blueprint: polygons, labels, and legend on one canvas.
///
/// This is the renderable payload handed to the exporter; serialize it
/// as JSON for a vector consumer or call
/// [`Blueprint::to_svg`](crate::Blueprint::to_svg) for a static image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Section polygons in draw order.
    pub shapes: Vec<BlueprintShape>,
    /// Summary legend.
    pub legend: Legend,
}

/// Geographic bounding box across all live-map sections, used by the
/// affine-fit projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    /// Minimum latitude.
    pub min_lat: f64,
    /// Minimum longitude.
    pub min_lng: f64,
    /// Maximum latitude.
    pub max_lat: f64,
    /// Maximum longitude.
    pub max_lng: f64,
}

impl GeoBounds {
    /// An empty (invalid) bounding box.
    pub fn empty() -> Self {
        Self {
            min_lat: f64::INFINITY,
            min_lng: f64::INFINITY,
            max_lat: f64::NEG_INFINITY,
            max_lng: f64::NEG_INFINITY,
        }
    }

    /// Expand to include a coordinate.
    pub fn include(&mut self, lat: f64, lng: f64) {
        self.min_lat = self.min_lat.min(lat);
        self.min_lng = self.min_lng.min(lng);
        self.max_lat = self.max_lat.max(lat);
        self.max_lng = self.max_lng.max(lng);
    }

    /// Whether any coordinate has been included.
    pub fn is_valid(&self) -> bool {
        self.min_lat <= self.max_lat && self.min_lng <= self.max_lng
    }

    /// Latitude span in degrees.
    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Longitude span in degrees.
    pub fn lng_span(&self) -> f64 {
        self.max_lng - self.min_lng
    }

    /// Grow the box by `fraction` of each span on every side.
    pub fn padded(&self, fraction: f64) -> Self {
        let d_lat = self.lat_span() * fraction;
        let d_lng = self.lng_span() * fraction;
        Self {
            min_lat: self.min_lat - d_lat,
            min_lng: self.min_lng - d_lng,
            max_lat: self.max_lat + d_lat,
            max_lng: self.max_lng + d_lng,
        }
    }
}

impl Default for GeoBounds {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_geo_bounds_include_and_pad() {
        let mut bounds = GeoBounds::empty();
        assert!(!bounds.is_valid());

        bounds.include(37.0, -122.0);
        bounds.include(37.001, -121.999);
        assert!(bounds.is_valid());
        assert_relative_eq!(bounds.lat_span(), 0.001, max_relative = 1e-9);

        let padded = bounds.padded(0.1);
        assert_relative_eq!(padded.lat_span(), 0.0012, max_relative = 1e-9);
        assert!(padded.min_lat < bounds.min_lat);
        assert!(padded.max_lng > bounds.max_lng);
    }

    #[test]
    fn test_palette_cycles() {
        assert_eq!(PALETTE.len(), 8);
        assert!(PALETTE.iter().all(|c| c.starts_with('#')));
    }
}
