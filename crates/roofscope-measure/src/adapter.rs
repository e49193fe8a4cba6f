//! Coordinate adapter: canonical per-edge metrics for both kinds.

use roofscope_math::{normalize_axis_deg, GeoPoint, Point2};

use crate::image::CapturedImage;
use crate::section::SectionGeometry;
use crate::{MeasureError, Result};

/// Length and direction of one polygon boundary edge, in the
/// coordinate-kind-independent form the rest of the engine consumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeMetric {
    /// Edge length in feet.
    pub length_ft: f64,
    /// Direction-agnostic bearing in degrees, folded to `[0, 180)`.
    /// 0° is horizontal (east-west on the map, left-right on screen).
    pub bearing_deg: f64,
}

/// Walk a section's boundary (including the closing edge) and produce
/// one [`EdgeMetric`] per edge, in vertex order.
///
/// Geographic edges use the great-circle haversine distance; raster
/// edges use pixel distance times the image's feet-per-pixel scale.
///
/// # Errors
///
/// [`MeasureError::DegenerateGeometry`] for fewer than 3 vertices;
/// [`MeasureError::MissingScaleMetadata`] for raster geometry without
/// its matching image.
pub fn edge_metrics(
    geometry: &SectionGeometry,
    image: Option<&CapturedImage>,
) -> Result<Vec<EdgeMetric>> {
    geometry.ensure_polygon()?;

    match geometry {
        SectionGeometry::Geographic { vertices } => {
            let points: Vec<GeoPoint> = vertices.iter().map(|&v| v.into()).collect();
            let mut edges = Vec::with_capacity(points.len());
            for i in 0..points.len() {
                let a = points[i];
                let b = points[(i + 1) % points.len()];
                edges.push(EdgeMetric {
                    length_ft: a.distance_ft(&b),
                    bearing_deg: a.axis_bearing_deg(&b),
                });
            }
            Ok(edges)
        }
        SectionGeometry::Raster { vertices, image: id } => {
            let img = image
                .filter(|img| img.id == *id)
                .ok_or(MeasureError::MissingScaleMetadata(*id))?;
            let fpp = img.feet_per_pixel();
            let points: Vec<Point2> = vertices.iter().map(|&v| v.into()).collect();
            let mut edges = Vec::with_capacity(points.len());
            for i in 0..points.len() {
                let a = points[i];
                let b = points[(i + 1) % points.len()];
                let d = b - a;
                edges.push(EdgeMetric {
                    length_ft: d.norm() * fpp,
                    bearing_deg: normalize_axis_deg(d.y.atan2(d.x).to_degrees()),
                });
            }
            Ok(edges)
        }
    }
}
