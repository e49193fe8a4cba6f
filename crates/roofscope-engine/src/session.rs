//! The measurement session: owned images, sections, and aggregation.

use std::collections::HashMap;

use roofscope_classify::{classify_edges, ComponentTotals};
use roofscope_measure::{
    edge_metrics, CapturedImage, ImageId, MeasureError, Pitch, Section, SectionGeometry, SectionId,
};

use crate::result::{MeasurementResult, SectionSummary, SkippedSection};
use crate::{EngineError, Project, Result};

/// A section plus its cached component classification. The cache is
/// invalidated only by vertex replacement; pitch changes leave it
/// intact.
#[derive(Debug, Clone)]
struct SectionState {
    section: Section,
    components: ComponentTotals,
}

/// One roof measurement in progress.
///
/// Sections are owned exclusively by the session that created them;
/// vertex edits are whole-set replacements (last writer wins). All
/// recomputation is synchronous and scoped to the affected section.
#[derive(Debug, Clone, Default)]
pub struct MeasurementSession {
    images: HashMap<ImageId, CapturedImage>,
    sections: HashMap<SectionId, SectionState>,
    /// Sections from a loaded document that could not be measured,
    /// surfaced through [`MeasurementResult::skipped`].
    orphans: Vec<SkippedSection>,
}

impl MeasurementSession {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a captured image. Its scale was derived at capture
    /// time and is never re-derived here.
    pub fn add_image(&mut self, image: CapturedImage) -> Result<()> {
        if self.images.contains_key(&image.id) {
            return Err(EngineError::DuplicateImage(image.id));
        }
        self.images.insert(image.id, image);
        Ok(())
    }

    /// Look up a captured image.
    pub fn image(&self, id: ImageId) -> Option<&CapturedImage> {
        self.images.get(&id)
    }

    /// Remove a captured image. Raster sections that referenced it
    /// remain in the session but drop out of subsequent aggregations,
    /// reported as skipped.
    pub fn remove_image(&mut self, id: ImageId) -> Option<CapturedImage> {
        self.images.remove(&id)
    }

    /// Add a completed section drawing, computing its areas and edge
    /// classification.
    pub fn add_section(
        &mut self,
        id: SectionId,
        name: impl Into<String>,
        geometry: SectionGeometry,
        pitch: Pitch,
    ) -> Result<()> {
        if self.sections.contains_key(&id) {
            return Err(EngineError::DuplicateSection(id));
        }
        let image = self.resolve_image(&geometry)?;
        let section = Section::new(id, name, geometry, pitch, image)?;
        let components = classify_edges(&edge_metrics(section.geometry(), image)?);
        log::debug!(
            "section {id} added: {:.2} sq ft flat, pitch {}",
            section.flat_sqft(),
            section.pitch()
        );
        self.sections.insert(id, SectionState { section, components });
        Ok(())
    }

    /// Replace a section's vertex set and recompute its areas and
    /// classification. Other sections are untouched.
    pub fn replace_vertices(&mut self, id: SectionId, geometry: SectionGeometry) -> Result<()> {
        // Cloned so the image borrow does not overlap the mutable
        // section borrow below.
        let image = self.resolve_image(&geometry)?.cloned();
        let state = self
            .sections
            .get_mut(&id)
            .ok_or(EngineError::UnknownSection(id))?;
        state.section.replace_vertices(geometry, image.as_ref())?;
        state.components = classify_edges(&edge_metrics(state.section.geometry(), image.as_ref())?);
        log::debug!(
            "section {id} vertices replaced: {:.2} sq ft flat",
            state.section.flat_sqft()
        );
        Ok(())
    }

    /// Change a section's pitch. Recomputes only that section's
    /// adjusted area; its flat area, classification cache, and every
    /// other section are untouched.
    pub fn set_pitch(&mut self, id: SectionId, pitch: Pitch) -> Result<()> {
        let state = self
            .sections
            .get_mut(&id)
            .ok_or(EngineError::UnknownSection(id))?;
        state.section.set_pitch(pitch);
        log::debug!(
            "section {id} pitch set to {pitch}: {:.2} sq ft adjusted",
            state.section.adjusted_sqft()
        );
        Ok(())
    }

    /// Change a section's pitch from a UI key string. Unknown keys
    /// fail closed with [`MeasureError::InvalidPitchKey`].
    pub fn set_pitch_key(&mut self, id: SectionId, key: &str) -> Result<()> {
        let pitch = Pitch::from_key(key)?;
        self.set_pitch(id, pitch)
    }

    /// Delete a section, returning it to the caller. Any rendering
    /// resource tied to the section belongs to the caller and is
    /// released on its side.
    pub fn remove_section(&mut self, id: SectionId) -> Result<Section> {
        self.sections
            .remove(&id)
            .map(|state| state.section)
            .ok_or(EngineError::UnknownSection(id))
    }

    /// Look up a section.
    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.get(&id).map(|state| &state.section)
    }

    /// Iterate over all sections, in no particular order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.values().map(|state| &state.section)
    }

    /// Number of sections in the session (including any that would be
    /// skipped at aggregation time).
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    fn resolve_image(&self, geometry: &SectionGeometry) -> Result<Option<&CapturedImage>> {
        match geometry.image() {
            None => Ok(None),
            Some(id) => match self.images.get(&id) {
                Some(image) => Ok(Some(image)),
                None => Err(MeasureError::MissingScaleMetadata(id).into()),
            },
        }
    }

    /// Merge every measurable section into a fresh result snapshot.
    ///
    /// Totals are a summation over an unordered collection, so
    /// aggregation order cannot affect them, and a section's origin
    /// (live map versus captured image) is invisible to the totals. An
    /// empty session yields zero totals, not an error. Raster sections
    /// whose image is no longer present are excluded from the totals
    /// and reported in [`MeasurementResult::skipped`]. A section in a
    /// degenerate state aborts aggregation — by construction none can
    /// enter the session, so hitting this is a bug upstream.
    pub fn aggregate(&self) -> Result<MeasurementResult> {
        let mut total_flat = 0.0;
        let mut total_adjusted = 0.0;
        let mut component_totals = ComponentTotals::zero();
        let mut summaries = Vec::with_capacity(self.sections.len());
        let mut skipped = self.orphans.clone();

        for state in self.sections.values() {
            let section = &state.section;
            if section.geometry().vertex_count() < 3 {
                return Err(MeasureError::DegenerateGeometry(format!(
                    "section {} has fewer than 3 vertices",
                    section.id()
                ))
                .into());
            }
            if let Some(image_id) = section.source_image() {
                if !self.images.contains_key(&image_id) {
                    skipped.push(SkippedSection {
                        id: section.id(),
                        name: section.name().to_string(),
                        reason: MeasureError::MissingScaleMetadata(image_id).to_string(),
                    });
                    continue;
                }
            }
            total_flat += section.flat_sqft();
            total_adjusted += section.adjusted_sqft();
            component_totals.merge(&state.components);
            summaries.push(SectionSummary {
                id: section.id(),
                name: section.name().to_string(),
                flat_sqft: roofscope_math::round2(section.flat_sqft()),
                pitch: section.pitch(),
                adjusted_sqft: roofscope_math::round2(section.adjusted_sqft()),
            });
        }

        summaries.sort_by_key(|s| s.id);
        skipped.sort_by_key(|s| s.id);
        Ok(MeasurementResult {
            total_flat_sqft: roofscope_math::round2(total_flat),
            total_adjusted_sqft: roofscope_math::round2(total_adjusted),
            sections: summaries,
            component_totals,
            skipped,
        })
    }

    /// Build a session from a project document.
    ///
    /// Images are registered first. Sections that cannot be measured
    /// (missing image scale, degenerate geometry) are local failures:
    /// they are recorded as skipped and do not abort the load of the
    /// remaining valid sections.
    pub fn from_project(project: Project) -> Result<Self> {
        let mut session = Self::new();
        for image in project.images {
            session.add_image(image)?;
        }
        for input in project.sections {
            let id = input.id;
            let name = input.name.clone();
            match session.add_section(id, input.name, input.geometry, input.pitch) {
                Ok(()) => {}
                Err(EngineError::Measure(err)) => {
                    log::warn!("section {id} skipped on load: {err}");
                    session.orphans.push(SkippedSection {
                        id,
                        name,
                        reason: err.to_string(),
                    });
                }
                Err(other) => return Err(other),
            }
        }
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use roofscope_measure::{GeoVertex, PixelVertex};

    /// Capture with an exact meters-per-pixel, inverting the ground
    /// resolution formula at the equator.
    fn image_with_mpp(id: ImageId, mpp: f64) -> CapturedImage {
        let zoom = (roofscope_math::GROUND_RESOLUTION_M / mpp).log2();
        CapturedImage::new(id, GeoVertex { lat: 0.0, lng: 0.0 }, zoom, 640, 640, 0)
    }

    fn raster_square(image: ImageId, side_px: f64) -> SectionGeometry {
        SectionGeometry::Raster {
            vertices: vec![
                PixelVertex { x: 0.0, y: 0.0 },
                PixelVertex { x: side_px, y: 0.0 },
                PixelVertex {
                    x: side_px,
                    y: side_px,
                },
                PixelVertex { x: 0.0, y: side_px },
            ],
            image,
        }
    }

    fn geo_square() -> SectionGeometry {
        SectionGeometry::Geographic {
            vertices: vec![
                GeoVertex {
                    lat: 37.0,
                    lng: -122.0,
                },
                GeoVertex {
                    lat: 37.0,
                    lng: -121.9995,
                },
                GeoVertex {
                    lat: 37.0004,
                    lng: -121.9995,
                },
                GeoVertex {
                    lat: 37.0004,
                    lng: -122.0,
                },
            ],
        }
    }

    #[test]
    fn test_empty_session_aggregates_to_zero() {
        let result = MeasurementSession::new().aggregate().unwrap();
        assert_eq!(result.total_flat_sqft, 0.0);
        assert_eq!(result.total_adjusted_sqft, 0.0);
        assert!(result.sections.is_empty());
        assert!(result.skipped.is_empty());
        assert_eq!(result.component_totals.total(), 0.0);
    }

    #[test]
    fn test_raster_square_end_to_end() {
        // 100×100 px at 0.15 m/px ≈ 2421.88 sq ft, flat pitch.
        let mut session = MeasurementSession::new();
        session.add_image(image_with_mpp(1, 0.15)).unwrap();
        session
            .add_section(1, "main", raster_square(1, 100.0), Pitch::Flat)
            .unwrap();

        let result = session.aggregate().unwrap();
        let expected = 15.0 * 15.0 * roofscope_math::SQM_TO_SQFT;
        assert_relative_eq!(result.total_flat_sqft, expected, max_relative = 1e-4);
        assert_eq!(result.total_flat_sqft, result.total_adjusted_sqft);
    }

    #[test]
    fn test_pitch_change_scales_adjusted_only() {
        let mut session = MeasurementSession::new();
        session.add_image(image_with_mpp(1, 0.15)).unwrap();
        session
            .add_section(1, "main", raster_square(1, 100.0), Pitch::Flat)
            .unwrap();
        let before = session.aggregate().unwrap();

        session.set_pitch_key(1, "6/12").unwrap();
        let after = session.aggregate().unwrap();
        assert_eq!(after.total_flat_sqft, before.total_flat_sqft);
        assert_relative_eq!(
            after.total_adjusted_sqft,
            roofscope_math::round2(session.section(1).unwrap().flat_sqft() * 1.12),
            max_relative = 1e-9
        );
        // Prior snapshot is untouched.
        assert_eq!(before.total_adjusted_sqft, before.total_flat_sqft);
    }

    #[test]
    fn test_invalid_pitch_key_fails_closed() {
        let mut session = MeasurementSession::new();
        session.add_image(image_with_mpp(1, 0.15)).unwrap();
        session
            .add_section(1, "main", raster_square(1, 100.0), Pitch::Flat)
            .unwrap();
        assert!(matches!(
            session.set_pitch_key(1, "7-12"),
            Err(EngineError::Measure(MeasureError::InvalidPitchKey(_)))
        ));
        // Pitch unchanged.
        assert_eq!(session.section(1).unwrap().pitch(), Pitch::Flat);
    }

    #[test]
    fn test_aggregation_order_independent_and_origin_agnostic() {
        let image = image_with_mpp(1, 0.2);

        let mut forward = MeasurementSession::new();
        forward.add_image(image.clone()).unwrap();
        forward
            .add_section(1, "captured", raster_square(1, 80.0), Pitch::Rise4)
            .unwrap();
        forward
            .add_section(2, "live", geo_square(), Pitch::Rise8)
            .unwrap();

        let mut reverse = MeasurementSession::new();
        reverse.add_image(image).unwrap();
        reverse
            .add_section(2, "live", geo_square(), Pitch::Rise8)
            .unwrap();
        reverse
            .add_section(1, "captured", raster_square(1, 80.0), Pitch::Rise4)
            .unwrap();

        let a = forward.aggregate().unwrap();
        let b = reverse.aggregate().unwrap();
        assert_eq!(a, b);

        // Totals equal the sum of the individually measured sections.
        let s1 = forward.section(1).unwrap();
        let s2 = forward.section(2).unwrap();
        assert_relative_eq!(
            a.total_flat_sqft,
            roofscope_math::round2(s1.flat_sqft() + s2.flat_sqft())
        );
        assert_relative_eq!(
            a.total_adjusted_sqft,
            roofscope_math::round2(s1.adjusted_sqft() + s2.adjusted_sqft())
        );
    }

    #[test]
    fn test_two_vertex_section_rejected_before_totals() {
        let mut session = MeasurementSession::new();
        let geometry = SectionGeometry::Geographic {
            vertices: vec![
                GeoVertex { lat: 0.0, lng: 0.0 },
                GeoVertex {
                    lat: 0.001,
                    lng: 0.001,
                },
            ],
        };
        let err = session
            .add_section(1, "stub", geometry, Pitch::Flat)
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Measure(MeasureError::DegenerateGeometry(_))
        ));
        assert_eq!(session.section_count(), 0);
        assert!(session.aggregate().unwrap().sections.is_empty());
    }

    #[test]
    fn test_unknown_image_rejected_at_entry() {
        let mut session = MeasurementSession::new();
        let err = session
            .add_section(1, "main", raster_square(99, 100.0), Pitch::Flat)
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Measure(MeasureError::MissingScaleMetadata(99))
        ));
    }

    #[test]
    fn test_removed_image_surfaces_skipped_sections() {
        let mut session = MeasurementSession::new();
        session.add_image(image_with_mpp(1, 0.15)).unwrap();
        session
            .add_section(1, "captured", raster_square(1, 100.0), Pitch::Flat)
            .unwrap();
        session.add_section(2, "live", geo_square(), Pitch::Flat).unwrap();

        session.remove_image(1);
        let result = session.aggregate().unwrap();
        // The live section still measures; the raster one is excluded
        // and surfaced, not swallowed.
        assert_eq!(result.sections.len(), 1);
        assert_eq!(result.sections[0].id, 2);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].id, 1);
    }

    #[test]
    fn test_remove_section_drops_from_totals() {
        let mut session = MeasurementSession::new();
        session.add_section(1, "live", geo_square(), Pitch::Flat).unwrap();
        let removed = session.remove_section(1).unwrap();
        assert_eq!(removed.id(), 1);
        assert_eq!(session.aggregate().unwrap().section_count(), 0);
        assert!(matches!(
            session.remove_section(1),
            Err(EngineError::UnknownSection(1))
        ));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut session = MeasurementSession::new();
        session.add_section(1, "a", geo_square(), Pitch::Flat).unwrap();
        assert!(matches!(
            session.add_section(1, "b", geo_square(), Pitch::Flat),
            Err(EngineError::DuplicateSection(1))
        ));
        session.add_image(image_with_mpp(5, 0.3)).unwrap();
        assert!(matches!(
            session.add_image(image_with_mpp(5, 0.3)),
            Err(EngineError::DuplicateImage(5))
        ));
    }

    #[test]
    fn test_component_totals_accumulate_across_sections() {
        let mut session = MeasurementSession::new();
        session.add_section(1, "a", geo_square(), Pitch::Flat).unwrap();
        let one = session.aggregate().unwrap();
        session.add_section(2, "b", geo_square(), Pitch::Flat).unwrap();
        let two = session.aggregate().unwrap();
        assert_relative_eq!(
            two.component_totals.wall,
            one.component_totals.wall * 2.0,
            max_relative = 1e-9
        );
        assert_eq!(two.component_totals.step, 0.0);
    }
}
