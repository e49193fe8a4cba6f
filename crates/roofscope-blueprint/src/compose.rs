//! Blueprint composition: sections plus aggregate totals onto one
//! canvas.

use roofscope_engine::{MeasurementResult, MeasurementSession};
use roofscope_measure::SectionGeometry;

use crate::project::{CanvasFrame, ProjectionStrategy};
use crate::types::{Blueprint, BlueprintShape, CanvasPoint, GeoBounds, Legend, ShapeLabel, PALETTE};
use crate::{BlueprintError, Result};

/// Canvas margin around the drawing frame, in pixels.
const MARGIN: f64 = 24.0;

/// Height reserved at the bottom of the canvas for the legend block.
const LEGEND_HEIGHT: f64 = 96.0;

/// Padding fraction applied to the geographic bounding box.
const GEO_PADDING: f64 = 0.1;

/// Compose all of a session's drawable sections and the aggregate
/// totals into a blueprint of the given canvas size.
///
/// Sections are drawn in id order with round-robin palette colors and
/// labeled with name, adjusted area, and pitch. The legend is always
/// drawn. Raster sections whose image is no longer resolvable are left
/// out (they are already surfaced in the result's skipped list).
///
/// # Errors
///
/// [`BlueprintError::NothingToRender`] when no drawable section exists
/// — a blank canvas is never emitted silently.
pub fn compose(
    session: &MeasurementSession,
    result: &MeasurementResult,
    width: u32,
    height: u32,
) -> Result<Blueprint> {
    let mut sections: Vec<_> = session
        .sections()
        .filter(|s| match s.source_image() {
            Some(id) => session.image(id).is_some(),
            None => true,
        })
        .collect();
    sections.sort_by_key(|s| s.id());
    if sections.is_empty() {
        return Err(BlueprintError::NothingToRender);
    }

    let mut geo_bounds = GeoBounds::empty();
    for section in &sections {
        if let SectionGeometry::Geographic { vertices } = section.geometry() {
            for v in vertices {
                geo_bounds.include(v.lat, v.lng);
            }
        }
    }
    let geo_bounds = if geo_bounds.is_valid() {
        geo_bounds.padded(GEO_PADDING)
    } else {
        geo_bounds
    };

    let frame = CanvasFrame {
        x: MARGIN,
        y: MARGIN,
        width: (width as f64 - 2.0 * MARGIN).max(1.0),
        height: (height as f64 - 2.0 * MARGIN - LEGEND_HEIGHT).max(1.0),
    };

    let mut shapes = Vec::with_capacity(sections.len());
    let mut live = 0usize;
    let mut captured = 0usize;
    for (i, section) in sections.iter().enumerate() {
        let image = section.source_image().and_then(|id| session.image(id));
        match section.geometry() {
            SectionGeometry::Geographic { .. } => live += 1,
            SectionGeometry::Raster { .. } => captured += 1,
        }

        let strategy = ProjectionStrategy::for_section(section, image, &geo_bounds);
        let points = strategy.project(section, &frame);
        let anchor = centroid(&points);
        shapes.push(BlueprintShape {
            section: section.id(),
            points,
            color: PALETTE[i % PALETTE.len()].to_string(),
            label: ShapeLabel {
                lines: vec![
                    section.name().to_string(),
                    format!("{:.2} sq ft", roofscope_math::round2(section.adjusted_sqft())),
                    section.pitch().to_string(),
                ],
                anchor,
            },
        });
    }

    Ok(Blueprint {
        width,
        height,
        shapes,
        legend: Legend {
            section_count: sections.len(),
            total_adjusted_sqft: result.total_adjusted_sqft,
            squares: result.squares(),
            live_sections: live,
            captured_sections: captured,
        },
    })
}

fn centroid(points: &[CanvasPoint]) -> CanvasPoint {
    if points.is_empty() {
        return CanvasPoint::new(0.0, 0.0);
    }
    let n = points.len() as f64;
    CanvasPoint::new(
        points.iter().map(|p| p.x).sum::<f64>() / n,
        points.iter().map(|p| p.y).sum::<f64>() / n,
    )
}
