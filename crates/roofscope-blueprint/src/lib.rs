#![warn(missing_docs)]

//! Blueprint composition and export for roofscope measurements.
//!
//! Projects every section of a measurement session — mixed geographic
//! and raster coordinate kinds — onto one shared 2D canvas, attaches
//! per-section labels and a summary legend, and serializes the result
//! as a standalone SVG.
//!
//! # Example
//!
//! ```
//! use roofscope_blueprint::compose;
//! use roofscope_engine::MeasurementSession;
//! use roofscope_measure::{GeoVertex, Pitch, SectionGeometry};
//!
//! let mut session = MeasurementSession::new();
//! session
//!     .add_section(
//!         1,
//!         "main",
//!         SectionGeometry::Geographic {
//!             vertices: vec![
//!                 GeoVertex { lat: 37.0, lng: -122.0 },
//!                 GeoVertex { lat: 37.0, lng: -121.9995 },
//!                 GeoVertex { lat: 37.0004, lng: -121.9998 },
//!             ],
//!         },
//!         Pitch::Rise6,
//!     )
//!     .unwrap();
//! let result = session.aggregate().unwrap();
//!
//! let blueprint = compose(&session, &result, 1200, 900).unwrap();
//! let svg = blueprint.to_svg();
//! assert!(svg.contains("<polygon"));
//! ```

mod compose;
mod project;
mod svg;
mod types;

pub use compose::compose;
pub use project::{CanvasFrame, ProjectionStrategy};
pub use types::{
    Blueprint, BlueprintShape, CanvasPoint, GeoBounds, Legend, ShapeLabel, PALETTE,
};

use thiserror::Error;

/// Errors from blueprint composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BlueprintError {
    /// No drawable sections were supplied; a blank canvas is never
    /// produced silently.
    #[error("nothing to render: no drawable sections")]
    NothingToRender,
}

/// Result type for blueprint operations.
pub type Result<T> = std::result::Result<T, BlueprintError>;
