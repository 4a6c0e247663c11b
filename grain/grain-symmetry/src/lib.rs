//! Crystal symmetry and misorientation math.
//!
//! This crate provides the orientation kernel used by segmentation and
//! feature statistics:
//!
//! - [`LaueClass`] - The 11 Laue classes with stable crystal structure codes
//! - [`SymmetryOperators`] - Precomputed rotation operators, misorientation angle
//! - [`CrystalStructureTable`] - Phase id to crystal structure lookup
//! - [`quaternions_from_xyzw`], [`vectors_from_flat`] - Flat array adapters
//! - [`c_axis`] - Crystal c-axis in the sample frame
//!
//! # Conventions
//!
//! Orientations are unit quaternions describing the passive rotation from
//! the sample frame into the crystal frame. Misorientation between `g1` and
//! `g2` is the smallest rotation angle of `S * g1 * g2⁻¹` over the symmetry
//! operators `S` of the crystal's Laue class.
//!
//! # Example
//!
//! ```
//! use grain_symmetry::{CrystalStructureTable, LaueClass, SymmetryOperators};
//! use nalgebra::{UnitQuaternion, Vector3};
//!
//! let ops = SymmetryOperators::new();
//! let table = CrystalStructureTable::from_classes(&[LaueClass::CubicHigh]);
//!
//! let a = UnitQuaternion::identity();
//! let b = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 95f64.to_radians());
//!
//! let class = table.laue_class(1).unwrap();
//! let angle = ops.misorientation(&a, &b, class);
//! assert!((angle.to_degrees() - 5.0).abs() < 1e-9);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod convert;
mod error;
mod kernel;
mod laue;
mod phase;

pub use convert::{c_axis, quaternions_from_xyzw, vectors_from_flat};
pub use error::{SymmetryError, SymmetryResult};
pub use kernel::{MAX_MISORIENTATION, SymmetryOperators};
pub use laue::{LaueClass, UNKNOWN_CRYSTAL_STRUCTURE};
pub use phase::CrystalStructureTable;

// Re-export nalgebra types for convenience
pub use nalgebra::{UnitQuaternion, Vector3};
