//! Per-feature misorientation statistics and slice motion analysis.
//!
//! This crate runs after segmentation and works on the feature id array it
//! produces:
//!
//! - [`reference_misorientations`] - Element misorientation to a feature
//!   reference orientation, with per-feature means
//! - [`c_axis_misorientations`] - Element c-axis deviation from the feature
//!   average c-axis, with means and standard deviations
//! - [`relative_motion`] - Patch-matching shift between volume slices
//! - [`FeatureStats`] - Per-feature mean and standard deviation
//!
//! # Parallelism
//!
//! Per-element values are computed in parallel with rayon. Per-feature
//! reductions alias across elements and run sequentially afterwards.
//!
//! # Example
//!
//! ```
//! use grain_grid::StructuredGrid;
//! use grain_stats::{FeatureElements, ReferenceParams, ReferenceSources, reference_misorientations};
//! use grain_symmetry::{CrystalStructureTable, LaueClass, SymmetryOperators};
//! use nalgebra::{UnitQuaternion, Vector3};
//!
//! let grid = StructuredGrid::new(3, 1, 1).unwrap();
//! let quats: Vec<_> = [0.0f64, 2.0, 4.0]
//!     .iter()
//!     .map(|d| UnitQuaternion::from_axis_angle(&Vector3::z_axis(), d.to_radians()))
//!     .collect();
//! let elements = FeatureElements {
//!     feature_ids: &[1, 1, 1],
//!     phases: &[1, 1, 1],
//!     orientations: &quats,
//! };
//! // Middle element sits deepest in the feature
//! let distances = [0.0, 1.0, 0.0];
//! let sources = ReferenceSources { boundary_distances: Some(&distances), ..Default::default() };
//! let table = CrystalStructureTable::from_classes(&[LaueClass::CubicHigh]);
//!
//! let result = reference_misorientations(
//!     &grid,
//!     &elements,
//!     &sources,
//!     &table,
//!     &SymmetryOperators::new(),
//!     &ReferenceParams::centroid(),
//! )
//! .unwrap();
//! assert!((result.feature_mean_degrees[1] - 4.0 / 3.0).abs() < 1e-9);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod accumulate;
mod caxis;
mod error;
mod motion;
mod params;
mod reference;

pub use accumulate::FeatureStats;
pub use caxis::{CAxisMisorientations, axis_misorientation_degrees, c_axis_misorientations};
pub use error::{StatsError, StatsResult};
pub use motion::{Sample, SliceData, relative_motion, relative_motion_typed};
pub use params::{MotionParams, Plane, ReferenceKind, ReferenceParams};
pub use reference::{
    FeatureElements, ReferenceMisorientations, ReferenceSources, reference_misorientations,
};
