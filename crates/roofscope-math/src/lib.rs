#![warn(missing_docs)]

//! Math primitives for the roofscope measurement engine.
//!
//! Thin wrappers around nalgebra plus the small set of planar and
//! geodesic formulas the engine is built on: shoelace polygon area,
//! haversine distance, spherical-excess polygon area, and edge
//! bearing angles. All distances are in feet and all areas in square
//! feet unless a function says otherwise.

use nalgebra::Vector2;

/// A point in 2D pixel or canvas space.
pub type Point2 = nalgebra::Point2<f64>;

/// A vector in 2D space.
pub type Vec2 = Vector2<f64>;

/// Mean Earth radius in feet. Used for both haversine distances and
/// spherical polygon areas, so results come out in feet directly.
pub const EARTH_RADIUS_FT: f64 = 20_902_231.0;

/// Web-map ground resolution at zoom 0 on the equator, in meters per
/// pixel (2π · 6378137 / 256). The standard tile-pyramid constant.
pub const GROUND_RESOLUTION_M: f64 = 156_543.033_92;

/// Meters to feet.
pub const METERS_TO_FEET: f64 = 3.28084;

/// Square meters to square feet.
pub const SQM_TO_SQFT: f64 = 10.7639;

/// A geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Latitude in decimal degrees, positive north.
    pub lat: f64,
    /// Longitude in decimal degrees, positive east.
    pub lng: f64,
}

impl GeoPoint {
    /// Create a new geographic point.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle (haversine) distance to `other`, in feet.
    ///
    /// No flattening correction is applied; at suburban polygon sizes
    /// the spherical model is within ±0.1% of the ellipsoid.
    pub fn distance_ft(&self, other: &Self) -> f64 {
        let phi1 = self.lat.to_radians();
        let phi2 = other.lat.to_radians();
        let d_phi = (other.lat - self.lat).to_radians();
        let d_lambda = (other.lng - self.lng).to_radians();

        let a = (d_phi / 2.0).sin().powi(2)
            + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_FT * a.sqrt().asin()
    }

    /// Local-tangent bearing of the segment toward `other`, in degrees
    /// folded to `[0, 180)`.
    ///
    /// Measured from the east axis (a due east-west segment reads 0°, a
    /// due north-south segment reads 90°), matching the screen-space
    /// convention used for pixel edges. The longitude delta is scaled
    /// by cos(lat) so the angle reflects ground geometry, not degrees.
    pub fn axis_bearing_deg(&self, other: &Self) -> f64 {
        let d_lat = other.lat - self.lat;
        let d_lng = (other.lng - self.lng) * self.lat.to_radians().cos();
        normalize_axis_deg(d_lat.atan2(d_lng).to_degrees())
    }
}

/// Fold an angle in degrees into `[0, 180)`, treating a segment and its
/// reverse as the same direction.
pub fn normalize_axis_deg(deg: f64) -> f64 {
    let mut d = deg % 180.0;
    if d < 0.0 {
        d += 180.0;
    }
    d
}

/// Signed shoelace area of a closed polygon, in the square of the
/// input unit (pixels² for pixel-space polygons).
///
/// The closing edge from the last vertex back to the first is implied.
/// Sign depends on winding order; callers that only care about
/// magnitude take the absolute value.
pub fn shoelace_area(vertices: &[Point2]) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..vertices.len() {
        let a = vertices[i];
        let b = vertices[(i + 1) % vertices.len()];
        sum += a.x * b.y - b.x * a.y;
    }
    sum / 2.0
}

/// Unsigned area of a closed geographic polygon in square feet, by the
/// spherical-excess method.
///
/// Sums each edge's longitude delta weighted by the sines of its
/// endpoint latitudes, scaled by R²/2 with R in feet. Winding order
/// does not affect the result.
pub fn spherical_area_sqft(vertices: &[GeoPoint]) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..vertices.len() {
        let a = vertices[i];
        let b = vertices[(i + 1) % vertices.len()];
        let d_lambda = (b.lng - a.lng).to_radians();
        sum += d_lambda * (2.0 + a.lat.to_radians().sin() + b.lat.to_radians().sin());
    }
    (sum * EARTH_RADIUS_FT * EARTH_RADIUS_FT / 2.0).abs()
}

/// Round to 2 decimal places, for display-stable square footage.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
