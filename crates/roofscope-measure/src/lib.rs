#![warn(missing_docs)]

//! Section measurement core for roofscope.
//!
//! A [`Section`] is one user-drawn closed polygon representing a planar
//! roof facet, expressed either in geographic coordinates (drawn on a
//! live map) or in pixel coordinates over a [`CapturedImage`] with a
//! known scale. This crate turns those polygons into flat square
//! footage, applies pitch multipliers, and exposes per-edge metrics for
//! downstream classification.
//!
//! # Example
//!
//! ```
//! use roofscope_measure::{Pitch, Section, SectionGeometry, PixelVertex, CapturedImage, GeoVertex};
//!
//! let image = CapturedImage::new(1, GeoVertex { lat: 0.0, lng: 0.0 }, 20.0, 640, 640, 0);
//! let geometry = SectionGeometry::Raster {
//!     vertices: vec![
//!         PixelVertex { x: 0.0, y: 0.0 },
//!         PixelVertex { x: 100.0, y: 0.0 },
//!         PixelVertex { x: 100.0, y: 100.0 },
//!         PixelVertex { x: 0.0, y: 100.0 },
//!     ],
//!     image: 1,
//! };
//! let section = Section::new(7, "front facet", geometry, Pitch::Flat, Some(&image)).unwrap();
//! assert!(section.flat_sqft() > 0.0);
//! assert_eq!(section.flat_sqft(), section.adjusted_sqft());
//! ```

mod adapter;
mod area;
mod image;
mod pitch;
mod section;

pub use adapter::{edge_metrics, EdgeMetric};
pub use area::flat_area_sqft;
pub use image::CapturedImage;
pub use pitch::Pitch;
pub use section::{GeoVertex, PixelVertex, Section, SectionGeometry};

use thiserror::Error;

/// Unique identifier for a section.
pub type SectionId = u64;

/// Unique identifier for a captured image.
pub type ImageId = u64;

/// Errors from section measurement.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MeasureError {
    /// The polygon cannot be measured: fewer than 3 vertices, or its
    /// computed area is not positive (e.g. all vertices collinear).
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// A raster section references an image with no resolved
    /// meters-per-pixel scale.
    #[error("no scale metadata resolved for image {0}")]
    MissingScaleMetadata(ImageId),

    /// A pitch key that is not in the fixed pitch table. Never
    /// defaulted to flat; a silently substituted pitch would produce a
    /// wrong, undetectable measurement.
    #[error("unknown pitch key {0:?}")]
    InvalidPitchKey(String),
}

/// Result type for measurement operations.
pub type Result<T> = std::result::Result<T, MeasureError>;
