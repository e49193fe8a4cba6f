//! The JSON project document exchanged with the surrounding
//! application: captured images plus drawn sections.

use serde::{Deserialize, Serialize};

use roofscope_measure::{CapturedImage, Pitch, SectionGeometry, SectionId};

use crate::Result;

/// Current project document schema version.
pub const PROJECT_VERSION: u32 = 1;

/// A drawn section as reported by the polygon-drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionInput {
    /// Section id.
    pub id: SectionId,
    /// Human-readable name.
    pub name: String,
    /// Coordinate kind and vertices, tagged by `kind`.
    #[serde(flatten)]
    pub geometry: SectionGeometry,
    /// Pitch selection; documents may omit it for flat.
    #[serde(default)]
    pub pitch: Pitch,
}

/// A measurement project document.
///
/// Purely declarative: polygons, pitches, and capture metadata, no
/// derived areas. Measurement happens when the document is loaded into
/// a [`crate::MeasurementSession`]. Captured images serialize their
/// once-derived meters-per-pixel, so reloading never re-derives scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Schema version.
    pub version: u32,
    /// Captured images, if any sections were traced over static views.
    #[serde(default)]
    pub images: Vec<CapturedImage>,
    /// Drawn sections from both the live map and captured images.
    #[serde(default)]
    pub sections: Vec<SectionInput>,
}

impl Project {
    /// Create an empty project at the current schema version.
    pub fn new() -> Self {
        Self {
            version: PROJECT_VERSION,
            images: Vec::new(),
            sections: Vec::new(),
        }
    }

    /// Parse a project from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MeasurementSession;
    use roofscope_measure::{GeoVertex, PixelVertex};

    fn sample_project() -> Project {
        let mut project = Project::new();
        project.images.push(CapturedImage::new(
            1,
            GeoVertex {
                lat: 33.75,
                lng: -84.39,
            },
            20.0,
            1280,
            960,
            1_700_000_000,
        ));
        project.sections.push(SectionInput {
            id: 1,
            name: "garage".to_string(),
            geometry: SectionGeometry::Raster {
                vertices: vec![
                    PixelVertex { x: 10.0, y: 10.0 },
                    PixelVertex { x: 210.0, y: 10.0 },
                    PixelVertex { x: 210.0, y: 160.0 },
                    PixelVertex { x: 10.0, y: 160.0 },
                ],
                image: 1,
            },
            pitch: Pitch::Rise4,
        });
        project.sections.push(SectionInput {
            id: 2,
            name: "main".to_string(),
            geometry: SectionGeometry::Geographic {
                vertices: vec![
                    GeoVertex {
                        lat: 33.7501,
                        lng: -84.3901,
                    },
                    GeoVertex {
                        lat: 33.7501,
                        lng: -84.3897,
                    },
                    GeoVertex {
                        lat: 33.7504,
                        lng: -84.3897,
                    },
                    GeoVertex {
                        lat: 33.7504,
                        lng: -84.3901,
                    },
                ],
            },
            pitch: Pitch::Rise6,
        });
        project
    }

    #[test]
    fn test_roundtrip_document() {
        let project = sample_project();
        let json = project.to_json().unwrap();
        let back = Project::from_json(&json).unwrap();
        assert_eq!(back, project);
    }

    #[test]
    fn test_pitch_defaults_to_flat() {
        let json = r#"{
            "version": 1,
            "sections": [{
                "id": 3,
                "name": "shed",
                "kind": "geographic",
                "vertices": [
                    { "lat": 0.0, "lng": 0.0 },
                    { "lat": 0.0, "lng": 0.0002 },
                    { "lat": 0.0002, "lng": 0.0001 }
                ]
            }]
        }"#;
        let project = Project::from_json(json).unwrap();
        assert_eq!(project.sections[0].pitch, Pitch::Flat);
    }

    #[test]
    fn test_unknown_pitch_key_rejected() {
        let json = r#"{
            "version": 1,
            "sections": [{
                "id": 3,
                "name": "shed",
                "kind": "geographic",
                "pitch": "4:12",
                "vertices": [
                    { "lat": 0.0, "lng": 0.0 },
                    { "lat": 0.0, "lng": 0.0002 },
                    { "lat": 0.0002, "lng": 0.0001 }
                ]
            }]
        }"#;
        assert!(Project::from_json(json).is_err());
    }

    #[test]
    fn test_load_into_session() {
        let session = MeasurementSession::from_project(sample_project()).unwrap();
        let result = session.aggregate().unwrap();
        assert_eq!(result.sections.len(), 2);
        assert!(result.skipped.is_empty());
        assert!(result.total_flat_sqft > 0.0);
    }

    #[test]
    fn test_load_with_missing_image_surfaces_skip() {
        let mut project = sample_project();
        project.images.clear();
        let session = MeasurementSession::from_project(project).unwrap();
        let result = session.aggregate().unwrap();
        assert_eq!(result.sections.len(), 1);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].id, 1);
        assert!(result.skipped[0].reason.contains("image 1"));
    }
}
