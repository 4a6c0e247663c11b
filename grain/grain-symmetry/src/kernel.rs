//! Misorientation between crystal orientations.

use nalgebra::UnitQuaternion;

use crate::laue::LaueClass;

/// Sentinel returned when two orientations cannot be compared.
///
/// Any tolerance test against this value fails, so callers treat the pair as
/// "do not group" without a separate branch.
pub const MAX_MISORIENTATION: f64 = f64::MAX;

/// Precomputed symmetry operators for every [`LaueClass`].
///
/// Build this once per process or session and pass it by reference into
/// every misorientation computation. The table is immutable after
/// construction and can be shared freely across threads.
///
/// Orientations are passive rotations taking the sample frame into the
/// crystal frame, so symmetry operators are applied on the left of the
/// relative rotation.
///
/// # Example
///
/// ```
/// use grain_symmetry::{LaueClass, SymmetryOperators};
/// use nalgebra::{UnitQuaternion, Vector3};
///
/// let ops = SymmetryOperators::new();
/// let a = UnitQuaternion::identity();
/// let b = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 10f64.to_radians());
///
/// let angle = ops.misorientation(&a, &b, LaueClass::CubicHigh);
/// assert!((angle.to_degrees() - 10.0).abs() < 1e-9);
///
/// // A 90 degree rotation about a cube axis is a symmetry operation
/// let c = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 90f64.to_radians());
/// assert!(ops.misorientation(&a, &c, LaueClass::CubicHigh) < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct SymmetryOperators {
    /// Operators indexed by [`LaueClass::code`].
    table: Vec<Vec<UnitQuaternion<f64>>>,
}

impl Default for SymmetryOperators {
    fn default() -> Self {
        Self::new()
    }
}

impl SymmetryOperators {
    /// Builds the operator table for all Laue classes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: LaueClass::ALL
                .iter()
                .map(|class| class.generate_operators())
                .collect(),
        }
    }

    /// Returns the operators of a class; the first is the identity.
    #[must_use]
    pub fn operators(&self, class: LaueClass) -> &[UnitQuaternion<f64>] {
        self.table
            .get(class.code() as usize)
            .map_or(&[], Vec::as_slice)
    }

    /// Minimum rotation angle (radians) between two orientations over all
    /// symmetry-equivalent representations of `class`.
    ///
    /// The result lies in `[0, π]` and is symmetric in its arguments.
    #[must_use]
    pub fn misorientation(
        &self,
        q1: &UnitQuaternion<f64>,
        q2: &UnitQuaternion<f64>,
        class: LaueClass,
    ) -> f64 {
        let delta = q1 * q2.inverse();
        let max_w = self
            .operators(class)
            .iter()
            .map(|op| (op * delta).w.abs())
            .fold(0.0_f64, f64::max);
        2.0 * max_w.clamp(-1.0, 1.0).acos()
    }

    /// Like [`misorientation`](Self::misorientation) but takes a raw crystal
    /// structure code.
    ///
    /// Unknown codes (including
    /// [`UNKNOWN_CRYSTAL_STRUCTURE`](crate::UNKNOWN_CRYSTAL_STRUCTURE))
    /// return [`MAX_MISORIENTATION`].
    #[must_use]
    pub fn misorientation_for_code(
        &self,
        q1: &UnitQuaternion<f64>,
        q2: &UnitQuaternion<f64>,
        code: u32,
    ) -> f64 {
        LaueClass::from_code(code).map_or(MAX_MISORIENTATION, |class| {
            self.misorientation(q1, q2, class)
        })
    }
}
