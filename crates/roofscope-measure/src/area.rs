//! Flat polygon area for both coordinate kinds.

use roofscope_math::{shoelace_area, spherical_area_sqft, GeoPoint, Point2, SQM_TO_SQFT};

use crate::image::CapturedImage;
use crate::section::SectionGeometry;
use crate::{MeasureError, Result};

/// Compute the unsigned flat area of a closed section polygon in
/// square feet.
///
/// Raster geometry uses the planar shoelace formula in pixel², scaled
/// by the image's (meters-per-pixel)² and converted to ft². Geographic
/// geometry uses the spherical-excess method. Vertex winding order
/// carries no meaning; only the magnitude is returned.
///
/// # Errors
///
/// [`MeasureError::DegenerateGeometry`] for polygons with fewer than 3
/// vertices or non-positive area; [`MeasureError::MissingScaleMetadata`]
/// for raster geometry without its matching image.
pub fn flat_area_sqft(geometry: &SectionGeometry, image: Option<&CapturedImage>) -> Result<f64> {
    geometry.ensure_polygon()?;

    let area = match geometry {
        SectionGeometry::Geographic { vertices } => {
            let points: Vec<GeoPoint> = vertices.iter().map(|&v| v.into()).collect();
            spherical_area_sqft(&points)
        }
        SectionGeometry::Raster { vertices, image: id } => {
            let img = image
                .filter(|img| img.id == *id)
                .ok_or(MeasureError::MissingScaleMetadata(*id))?;
            let points: Vec<Point2> = vertices.iter().map(|&v| v.into()).collect();
            let mpp = img.meters_per_pixel();
            shoelace_area(&points).abs() * mpp * mpp * SQM_TO_SQFT
        }
    };

    // Collinear vertices land at (or within float noise of) zero.
    if area <= f64::EPSILON {
        return Err(MeasureError::DegenerateGeometry(
            "computed area is not positive".to_string(),
        ));
    }
    Ok(area)
}
