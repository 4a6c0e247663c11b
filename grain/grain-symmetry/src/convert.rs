//! Conversions from flat collaborator arrays.
//!
//! Upstream readers hand orientations and vectors over as flat `f32` tuples.
//! These helpers validate the tuple layout once and produce typed values.

use nalgebra::{Quaternion, UnitQuaternion, Vector3};

use crate::error::{SymmetryError, SymmetryResult};

const NORM_EPSILON: f64 = 1e-6;

/// Converts flat `(x, y, z, w)` quaternion tuples into unit quaternions.
///
/// Tuples are renormalized, so small drift from unit length in stored data
/// is tolerated.
///
/// # Errors
///
/// Returns [`SymmetryError::FlatLength`] if the length is not a multiple of
/// 4 and [`SymmetryError::DegenerateQuaternion`] for a (near) zero tuple.
///
/// # Example
///
/// ```
/// use grain_symmetry::quaternions_from_xyzw;
///
/// let flat = [0.0f32, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0];
/// let quats = quaternions_from_xyzw(&flat).unwrap();
/// assert_eq!(quats.len(), 2);
/// assert!(quats[0].angle() < 1e-12);
/// assert!((quats[1].angle() - std::f64::consts::PI).abs() < 1e-12);
/// ```
pub fn quaternions_from_xyzw(flat: &[f32]) -> SymmetryResult<Vec<UnitQuaternion<f64>>> {
    if flat.len() % 4 != 0 {
        return Err(SymmetryError::FlatLength {
            components: 4,
            len: flat.len(),
        });
    }
    flat.chunks_exact(4)
        .enumerate()
        .map(|(index, q)| {
            let q = Quaternion::new(
                f64::from(q[3]),
                f64::from(q[0]),
                f64::from(q[1]),
                f64::from(q[2]),
            );
            UnitQuaternion::try_new(q, NORM_EPSILON)
                .ok_or(SymmetryError::DegenerateQuaternion { index })
        })
        .collect()
}

/// Converts flat `(x, y, z)` tuples into vectors.
///
/// # Errors
///
/// Returns [`SymmetryError::FlatLength`] if the length is not a multiple of 3.
pub fn vectors_from_flat(flat: &[f32]) -> SymmetryResult<Vec<Vector3<f64>>> {
    if flat.len() % 3 != 0 {
        return Err(SymmetryError::FlatLength {
            components: 3,
            len: flat.len(),
        });
    }
    Ok(flat
        .chunks_exact(3)
        .map(|v| Vector3::new(f64::from(v[0]), f64::from(v[1]), f64::from(v[2])))
        .collect())
}

/// Direction of the crystal c-axis `[0001]` expressed in the sample frame.
///
/// # Example
///
/// ```
/// use grain_symmetry::c_axis;
/// use nalgebra::{UnitQuaternion, Vector3};
///
/// let tilted = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 90f64.to_radians());
/// let c = c_axis(&tilted);
/// assert!((c - Vector3::new(0.0, 1.0, 0.0)).norm() < 1e-12);
/// ```
#[must_use]
pub fn c_axis(orientation: &UnitQuaternion<f64>) -> Vector3<f64> {
    orientation.inverse_transform_vector(&Vector3::z())
}
