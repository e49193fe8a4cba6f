#![warn(missing_docs)]

//! Measurement session and aggregation engine for roofscope.
//!
//! A [`MeasurementSession`] owns the captured images and sections of
//! one roof measurement. The drawing surface reports shape
//! completions, vertex edits, and pitch selections into it; each
//! mutation recomputes only the affected section. [`MeasurementSession::aggregate`]
//! merges every section — regardless of whether it was drawn on the
//! live map or a captured image — into an immutable
//! [`MeasurementResult`] snapshot.
//!
//! # Example
//!
//! ```
//! use roofscope_engine::MeasurementSession;
//! use roofscope_measure::{GeoVertex, Pitch, SectionGeometry};
//!
//! let mut session = MeasurementSession::new();
//! session
//!     .add_section(
//!         1,
//!         "main roof",
//!         SectionGeometry::Geographic {
//!             vertices: vec![
//!                 GeoVertex { lat: 37.0, lng: -122.0 },
//!                 GeoVertex { lat: 37.0, lng: -121.9995 },
//!                 GeoVertex { lat: 37.0004, lng: -121.9995 },
//!                 GeoVertex { lat: 37.0004, lng: -122.0 },
//!             ],
//!         },
//!         Pitch::Rise6,
//!     )
//!     .unwrap();
//!
//! let result = session.aggregate().unwrap();
//! assert_eq!(result.sections.len(), 1);
//! assert!(result.total_adjusted_sqft > result.total_flat_sqft);
//! ```

mod project;
mod result;
mod session;

pub use project::{Project, SectionInput, PROJECT_VERSION};
pub use result::{MeasurementResult, SectionSummary, SkippedSection};
pub use session::MeasurementSession;

use roofscope_measure::{ImageId, MeasureError, SectionId};
use thiserror::Error;

/// Errors from session bookkeeping and aggregation.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A section-level measurement error.
    #[error(transparent)]
    Measure(#[from] MeasureError),

    /// Operation referenced a section id not in the session.
    #[error("unknown section {0}")]
    UnknownSection(SectionId),

    /// A section with this id already exists.
    #[error("duplicate section id {0}")]
    DuplicateSection(SectionId),

    /// An image with this id already exists.
    #[error("duplicate image id {0}")]
    DuplicateImage(ImageId),

    /// The project document could not be parsed or written.
    #[error("invalid project document: {0}")]
    Document(#[from] serde_json::Error),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
