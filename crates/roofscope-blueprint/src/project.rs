//! Projection strategies mapping section vertices into canvas space.

use roofscope_measure::{CapturedImage, Section, SectionGeometry};

use crate::types::{CanvasPoint, GeoBounds};

/// The rectangle of canvas space available for drawing (legend and
/// margins excluded).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasFrame {
    /// Left edge in canvas pixels.
    pub x: f64,
    /// Top edge in canvas pixels.
    pub y: f64,
    /// Frame width in pixels.
    pub width: f64,
    /// Frame height in pixels.
    pub height: f64,
}

impl CanvasFrame {
    /// Map unit-square coordinates `(u, v)` in `[0, 1]²` into the frame.
    fn place(&self, u: f64, v: f64) -> CanvasPoint {
        CanvasPoint::new(self.x + u * self.width, self.y + v * self.height)
    }
}

/// How one section's vertices reach canvas space.
///
/// Raster sections are normalized to a `[0,1]²` unit square per their
/// source image and treated as an independent local frame. Geographic
/// sections share one affine fit of the global lat/lng bounding box
/// (10% padding) — a plain linear map, not a map projection, which is
/// acceptable because drawn polygons are tiny relative to Earth's
/// curvature. Both frames land on the same canvas rectangle; the
/// overlay of incompatible coordinate systems is deliberate and
/// documented, not an accident of the composer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionStrategy {
    /// Per-image unit-square normalization for raster sections.
    RasterNormalize {
        /// Source image pixel width.
        width_px: f64,
        /// Source image pixel height.
        height_px: f64,
    },
    /// Shared padded-bounding-box affine fit for geographic sections.
    GeographicAffineFit {
        /// Padded bounds across all geographic vertices.
        bounds: GeoBounds,
    },
}

impl ProjectionStrategy {
    /// Select the strategy for a section by its coordinate kind.
    ///
    /// `image` must be present for raster sections (the composer skips
    /// unresolvable sections before projecting); `geo_bounds` is the
    /// already-padded box across every geographic section.
    pub fn for_section(
        section: &Section,
        image: Option<&CapturedImage>,
        geo_bounds: &GeoBounds,
    ) -> Self {
        match section.geometry() {
            SectionGeometry::Raster { .. } => {
                let (w, h) = image
                    .map(|img| (img.width_px as f64, img.height_px as f64))
                    .unwrap_or((1.0, 1.0));
                ProjectionStrategy::RasterNormalize {
                    width_px: w,
                    height_px: h,
                }
            }
            SectionGeometry::Geographic { .. } => ProjectionStrategy::GeographicAffineFit {
                bounds: *geo_bounds,
            },
        }
    }

    /// Project every vertex of `section` into `frame`, preserving draw
    /// order.
    pub fn project(&self, section: &Section, frame: &CanvasFrame) -> Vec<CanvasPoint> {
        match (self, section.geometry()) {
            (
                ProjectionStrategy::RasterNormalize { width_px, height_px },
                SectionGeometry::Raster { vertices, .. },
            ) => vertices
                .iter()
                .map(|v| frame.place(v.x / width_px.max(1.0), v.y / height_px.max(1.0)))
                .collect(),
            (
                ProjectionStrategy::GeographicAffineFit { bounds },
                SectionGeometry::Geographic { vertices },
            ) => vertices
                .iter()
                .map(|v| {
                    let u = if bounds.lng_span() > 0.0 {
                        (v.lng - bounds.min_lng) / bounds.lng_span()
                    } else {
                        0.5
                    };
                    // Latitude grows north, canvas y grows down.
                    let w = if bounds.lat_span() > 0.0 {
                        (bounds.max_lat - v.lat) / bounds.lat_span()
                    } else {
                        0.5
                    };
                    frame.place(u, w)
                })
                .collect(),
            // Kind mismatch cannot arise through for_section.
            _ => Vec::new(),
        }
    }
}
