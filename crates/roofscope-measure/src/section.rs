//! The section value type: one user-drawn closed roof facet polygon.

use serde::{Deserialize, Serialize};

use roofscope_math::{GeoPoint, Point2};

use crate::image::CapturedImage;
use crate::pitch::Pitch;
use crate::{area, ImageId, MeasureError, Result, SectionId};

/// A polygon vertex in decimal degrees.
///
/// A custom serializable type rather than a math-crate point so that
/// documents round-trip without enabling nalgebra's serde feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoVertex {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
}

impl From<GeoVertex> for GeoPoint {
    fn from(v: GeoVertex) -> Self {
        GeoPoint::new(v.lat, v.lng)
    }
}

/// A polygon vertex in pixels, relative to the source image's top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelVertex {
    /// X in pixels, growing right.
    pub x: f64,
    /// Y in pixels, growing down.
    pub y: f64,
}

impl From<PixelVertex> for Point2 {
    fn from(v: PixelVertex) -> Self {
        Point2::new(v.x, v.y)
    }
}

/// Ordered boundary vertices of a section, in one of the two supported
/// coordinate kinds.
///
/// Vertex order defines the polygon boundary and edge adjacency; it is
/// preserved exactly as drawn and never reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionGeometry {
    /// Drawn on the live interactive map.
    Geographic {
        /// Boundary vertices in draw order.
        vertices: Vec<GeoVertex>,
    },
    /// Traced over a captured raster image.
    Raster {
        /// Boundary vertices in draw order.
        vertices: Vec<PixelVertex>,
        /// The owning captured image.
        image: ImageId,
    },
}

impl SectionGeometry {
    /// Number of boundary vertices.
    pub fn vertex_count(&self) -> usize {
        match self {
            SectionGeometry::Geographic { vertices } => vertices.len(),
            SectionGeometry::Raster { vertices, .. } => vertices.len(),
        }
    }

    /// The source image for raster geometry, `None` for geographic.
    pub fn image(&self) -> Option<ImageId> {
        match self {
            SectionGeometry::Geographic { .. } => None,
            SectionGeometry::Raster { image, .. } => Some(*image),
        }
    }

    /// Validate that this geometry can form a polygon (≥3 vertices).
    pub(crate) fn ensure_polygon(&self) -> Result<()> {
        let n = self.vertex_count();
        if n < 3 {
            return Err(MeasureError::DegenerateGeometry(format!(
                "{n} vertices cannot form a polygon"
            )));
        }
        Ok(())
    }
}

/// One measured roof facet.
///
/// The engine owns this value; the drawing surface reports vertex and
/// pitch changes into it and renders from it, never the other way
/// around. Derived areas are stored unrounded — rounding happens only
/// at the result-snapshot boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    id: SectionId,
    name: String,
    geometry: SectionGeometry,
    pitch: Pitch,
    flat_sqft: f64,
    adjusted_sqft: f64,
}

impl Section {
    /// Create a section, computing its flat and adjusted areas.
    ///
    /// `image` must be the section's source image for raster geometry;
    /// it is ignored for geographic geometry.
    ///
    /// # Errors
    ///
    /// [`MeasureError::DegenerateGeometry`] if the polygon has fewer
    /// than 3 vertices or non-positive area;
    /// [`MeasureError::MissingScaleMetadata`] if raster geometry has no
    /// matching image.
    pub fn new(
        id: SectionId,
        name: impl Into<String>,
        geometry: SectionGeometry,
        pitch: Pitch,
        image: Option<&CapturedImage>,
    ) -> Result<Self> {
        let flat_sqft = area::flat_area_sqft(&geometry, image)?;
        Ok(Self {
            id,
            name: name.into(),
            geometry,
            pitch,
            flat_sqft,
            adjusted_sqft: flat_sqft * pitch.multiplier(),
        })
    }

    /// Unique identifier.
    pub fn id(&self) -> SectionId {
        self.id
    }

    /// Human-readable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Boundary geometry.
    pub fn geometry(&self) -> &SectionGeometry {
        &self.geometry
    }

    /// Current pitch selection.
    pub fn pitch(&self) -> Pitch {
        self.pitch
    }

    /// Flat (un-pitched) area in square feet, unrounded.
    pub fn flat_sqft(&self) -> f64 {
        self.flat_sqft
    }

    /// Pitch-adjusted area in square feet, unrounded.
    pub fn adjusted_sqft(&self) -> f64 {
        self.adjusted_sqft
    }

    /// Source image id for raster sections.
    pub fn source_image(&self) -> Option<ImageId> {
        self.geometry.image()
    }

    /// Replace the vertex set (last-writer-wins, whole-set replace) and
    /// recompute both areas.
    ///
    /// On error the section is left unchanged, so a bad drag edit never
    /// corrupts a previously valid measurement.
    pub fn replace_vertices(
        &mut self,
        geometry: SectionGeometry,
        image: Option<&CapturedImage>,
    ) -> Result<()> {
        let flat_sqft = area::flat_area_sqft(&geometry, image)?;
        self.geometry = geometry;
        self.flat_sqft = flat_sqft;
        self.adjusted_sqft = flat_sqft * self.pitch.multiplier();
        Ok(())
    }

    /// Change the pitch selection, recomputing only the adjusted area.
    /// Flat area and vertices are untouched.
    pub fn set_pitch(&mut self, pitch: Pitch) {
        self.pitch = pitch;
        self.adjusted_sqft = self.flat_sqft * pitch.multiplier();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square_raster(image: ImageId) -> SectionGeometry {
        SectionGeometry::Raster {
            vertices: vec![
                PixelVertex { x: 0.0, y: 0.0 },
                PixelVertex { x: 100.0, y: 0.0 },
                PixelVertex { x: 100.0, y: 100.0 },
                PixelVertex { x: 0.0, y: 100.0 },
            ],
            image,
        }
    }

    fn test_image(id: ImageId) -> CapturedImage {
        CapturedImage::new(id, GeoVertex { lat: 0.0, lng: 0.0 }, 20.0, 640, 640, 0)
    }

    #[test]
    fn test_two_vertices_rejected_before_area() {
        let geometry = SectionGeometry::Raster {
            vertices: vec![PixelVertex { x: 0.0, y: 0.0 }, PixelVertex { x: 5.0, y: 5.0 }],
            image: 1,
        };
        let err = Section::new(1, "stub", geometry, Pitch::Flat, Some(&test_image(1))).unwrap_err();
        assert!(matches!(err, MeasureError::DegenerateGeometry(_)));
    }

    #[test]
    fn test_pitch_change_is_local() {
        let image = test_image(1);
        let mut section =
            Section::new(1, "main", square_raster(1), Pitch::Flat, Some(&image)).unwrap();
        let flat = section.flat_sqft();
        assert_relative_eq!(section.adjusted_sqft(), flat);

        section.set_pitch(Pitch::Rise6);
        assert_relative_eq!(section.flat_sqft(), flat);
        assert_relative_eq!(section.adjusted_sqft(), flat * 1.12);
    }

    #[test]
    fn test_adjusted_monotone_in_pitch() {
        let image = test_image(1);
        let mut section =
            Section::new(1, "main", square_raster(1), Pitch::Flat, Some(&image)).unwrap();
        let mut prev = 0.0;
        for pitch in Pitch::ALL {
            section.set_pitch(pitch);
            assert!(section.adjusted_sqft() >= prev);
            prev = section.adjusted_sqft();
        }
    }

    #[test]
    fn test_replace_vertices_recomputes() {
        let image = test_image(1);
        let mut section =
            Section::new(1, "main", square_raster(1), Pitch::Rise4, Some(&image)).unwrap();
        let before = section.flat_sqft();

        let bigger = SectionGeometry::Raster {
            vertices: vec![
                PixelVertex { x: 0.0, y: 0.0 },
                PixelVertex { x: 200.0, y: 0.0 },
                PixelVertex { x: 200.0, y: 200.0 },
                PixelVertex { x: 0.0, y: 200.0 },
            ],
            image: 1,
        };
        section.replace_vertices(bigger, Some(&image)).unwrap();
        assert_relative_eq!(section.flat_sqft(), before * 4.0, max_relative = 1e-12);
        assert_relative_eq!(
            section.adjusted_sqft(),
            section.flat_sqft() * Pitch::Rise4.multiplier()
        );
    }

    #[test]
    fn test_bad_edit_leaves_section_unchanged() {
        let image = test_image(1);
        let mut section =
            Section::new(1, "main", square_raster(1), Pitch::Flat, Some(&image)).unwrap();
        let snapshot = section.clone();

        let collinear = SectionGeometry::Raster {
            vertices: vec![
                PixelVertex { x: 0.0, y: 0.0 },
                PixelVertex { x: 1.0, y: 1.0 },
                PixelVertex { x: 2.0, y: 2.0 },
            ],
            image: 1,
        };
        assert!(section.replace_vertices(collinear, Some(&image)).is_err());
        assert_eq!(section, snapshot);
    }

    #[test]
    fn test_geometry_serde_tagging() {
        let geometry = square_raster(3);
        let json = serde_json::to_string(&geometry).unwrap();
        assert!(json.contains("\"kind\":\"raster\""));
        let back: SectionGeometry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, geometry);
    }
}
