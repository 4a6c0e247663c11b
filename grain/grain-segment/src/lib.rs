//! Region-growing feature segmentation.
//!
//! This crate partitions a voxel grid into features (grains) by flood fill:
//!
//! - [`Segmenter`] - Seed scan, 6-connected growth, id assignment
//! - [`GroupingStrategy`] - Pluggable similarity test between neighbors
//! - [`OrientationGrouping`] - Same phase and misorientation below tolerance
//! - [`VectorGrouping`] - Undirected axis angle below tolerance
//! - [`FeatureArena`] - Per-feature arrays that grow as features are seeded
//! - [`randomize_feature_ids`] - Id shuffle that keeps 0 fixed
//!
//! # Feature ids
//!
//! Id 0 means "not part of any feature". Growth assigns ids `1..=n` in the
//! order seeds are found by a linear scan of the grid. When randomization is
//! enabled the ids are shuffled afterwards; the partition does not change.
//!
//! # Example
//!
//! ```
//! use grain_grid::StructuredGrid;
//! use grain_segment::{OrientationInput, SegmentParams, segment_orientations};
//! use grain_symmetry::{CrystalStructureTable, LaueClass, SymmetryOperators};
//! use nalgebra::{UnitQuaternion, Vector3};
//!
//! let grid = StructuredGrid::new(3, 3, 1).unwrap();
//! let mut quats = vec![UnitQuaternion::identity(); 9];
//! quats[4] = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 10f64.to_radians());
//! let phases = vec![1; 9];
//! let table = CrystalStructureTable::from_classes(&[LaueClass::CubicHigh]);
//!
//! let input = OrientationInput {
//!     orientations: &quats,
//!     phases: &phases,
//!     structures: &table,
//!     mask: None,
//! };
//! let ops = SymmetryOperators::new();
//! let params = SegmentParams::sequential(5.0);
//!
//! let result = segment_orientations(&grid, &input, &ops, &params).unwrap();
//! assert_eq!(result.feature_count(), 2);
//! assert_eq!(result.feature_ids[4], 2);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod features;
mod grouping;
mod params;
mod randomize;
mod result;
mod segmenter;

pub use error::{SegmentError, SegmentResult};
pub use features::{ActiveFlags, FeatureArena, PerFeature};
pub use grouping::{GroupingStrategy, OrientationGrouping, VectorGrouping, axis_angle};
pub use params::{SegmentParams, Traversal};
pub use randomize::{feature_id_permutation, randomize_feature_ids};
pub use result::Segmentation;
pub use segmenter::{
    OrientationInput, SegmentProgress, SegmentState, Segmenter, segment_orientations,
    segment_vectors,
};
