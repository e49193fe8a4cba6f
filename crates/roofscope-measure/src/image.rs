//! Captured map imagery and its ground scale.

use serde::{Deserialize, Serialize};

use crate::section::GeoVertex;
use crate::ImageId;

/// A static raster snapshot of a map view, used as a drawing surface.
///
/// The meters-per-pixel scale is derived once at construction from the
/// capture zoom level and center latitude, and is immutable thereafter:
/// re-deriving it later would invalidate previously measured areas. It
/// is serialized along with the rest of the struct so reloaded projects
/// keep the exact scale they were measured at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapturedImage {
    /// Unique identifier.
    pub id: ImageId,
    /// Geographic coordinate at the center of the capture.
    pub center: GeoVertex,
    /// Web-map zoom level at capture time.
    pub zoom: f64,
    /// Pixel width of the capture.
    pub width_px: u32,
    /// Pixel height of the capture.
    pub height_px: u32,
    /// Capture time as unix seconds.
    pub captured_at_unix: i64,
    meters_per_pixel: f64,
}

impl CapturedImage {
    /// Create a captured image, deriving its ground scale from zoom
    /// and center latitude via the standard web-map resolution formula
    /// `156543.03392 × cos(lat) / 2^zoom`.
    ///
    /// This is the only place the tile-resolution constant enters the
    /// engine; an imagery provider with a different resolution model
    /// replaces this constructor, not the area math.
    pub fn new(
        id: ImageId,
        center: GeoVertex,
        zoom: f64,
        width_px: u32,
        height_px: u32,
        captured_at_unix: i64,
    ) -> Self {
        let meters_per_pixel =
            roofscope_math::GROUND_RESOLUTION_M * center.lat.to_radians().cos() / 2f64.powf(zoom);
        Self {
            id,
            center,
            zoom,
            width_px,
            height_px,
            captured_at_unix,
            meters_per_pixel,
        }
    }

    /// Ground resolution of this capture in meters per pixel.
    pub fn meters_per_pixel(&self) -> f64 {
        self.meters_per_pixel
    }

    /// Ground resolution of this capture in feet per pixel.
    pub fn feet_per_pixel(&self) -> f64 {
        self.meters_per_pixel * roofscope_math::METERS_TO_FEET
    }
}
